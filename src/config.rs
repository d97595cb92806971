use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "COGNITIVE_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 服务端地址
    pub api_base_url: String,
    /// 检查使用的用户ID
    pub user_id: u32,
    /// 每次检查请求的题目数量
    pub question_count: u32,
    /// 题目分类过滤（可选）
    pub category: Option<String>,
    /// 每道题的作答时间（秒）
    pub question_time_budget_secs: u64,
    /// 单次网络请求超时时间（秒）
    pub request_timeout_secs: u64,
    // --- 登录配置 ---
    pub auth_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            user_id: 2,
            question_count: 10,
            category: None,
            question_time_budget_secs: 30,
            request_timeout_secs: 20,
            auth_token: None,
            username: None,
            password: None,
            verbose_logging: false,
            output_log_file: "cognitive_log.txt".to_string(),
        }
    }
}

impl Config {
    /// 先读取 `COGNITIVE_CONFIG` 指向的 TOML 文件（如果有），再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Ok(Self::from_toml_file(path)?.overlay_env()),
            Err(_) => Ok(Self::from_env()),
        }
    }

    /// 默认配置 + 环境变量
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: path.to_string(),
                source,
            })
        })
    }

    fn overlay_env(self) -> Self {
        self.overlay(|key| std::env::var(key).ok())
    }

    /// 用 `var` 查到的值覆盖配置，空字符串视为未设置
    fn overlay(self, var: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| var(key).filter(|v| !v.is_empty());
        Self {
            api_base_url: text("API_BASE_URL").unwrap_or(self.api_base_url),
            user_id: text("USER_ID").and_then(|v| v.parse().ok()).unwrap_or(self.user_id),
            question_count: text("QUESTION_COUNT").and_then(|v| v.parse().ok()).unwrap_or(self.question_count),
            category: text("CATEGORY").or(self.category),
            question_time_budget_secs: text("QUESTION_TIME_BUDGET_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.question_time_budget_secs),
            request_timeout_secs: text("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            auth_token: text("AUTH_TOKEN").or(self.auth_token),
            username: text("LOGIN_USERNAME").or(self.username),
            password: text("LOGIN_PASSWORD").or(self.password),
            verbose_logging: text("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: text("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        }
    }

    pub fn question_time_budget(&self) -> Duration {
        Duration::from_secs(self.question_time_budget_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
