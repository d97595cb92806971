//! 检查记录写入服务
//!
//! 只负责把每次检查的结果追加到运行日志文件

use std::fs::OpenOptions;
use std::io::Write;

use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::ResultSummary;

/// 检查记录写入服务
pub struct ResultWriter {
    log_file_path: String,
}

impl ResultWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            log_file_path: path.into(),
        }
    }

    /// 写入一次成功的检查结果
    pub fn write_result(&self, session_id: i64, summary: &ResultSummary) -> AppResult<()> {
        let categories = summary
            .category_average
            .iter()
            .map(|(k, v)| format!("{}={:.1}", k, v))
            .collect::<Vec<_>>()
            .join(", ");

        self.append(&format!(
            "会话 {} | 总分 {:.1} | 等级 {} | 分类 [{}]\n",
            session_id, summary.total_score, summary.grade, categories
        ))
    }

    /// 写入一次失败的检查
    pub fn write_failure(&self, session_id: Option<i64>, reason: &str) -> AppResult<()> {
        let session = session_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        self.append(&format!("会话 {} | 失败: {}\n", session, reason))
    }

    /// 记录失败，写入出错时只打印警告
    ///
    /// 返回是否写入成功，调用方原本的错误不会被写文件的错误覆盖
    pub fn record_failure(&self, session_id: Option<i64>, reason: &str) -> bool {
        match self.write_failure(session_id, reason) {
            Ok(()) => true,
            Err(e) => {
                warn!("⚠️ 检查记录写入失败: {}", e);
                false
            }
        }
    }

    fn append(&self, line: &str) -> AppResult<()> {
        debug!("写入检查记录: {}", line.trim_end());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))?;

        file.write_all(line.as_bytes())
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))
    }
}
