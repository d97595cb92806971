use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 检查会话错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    ClientBuildFailed(#[source] reqwest::Error),
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非 2xx 状态码
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 题目列表为空
    #[error("API返回的题目列表为空")]
    EmptyQuestions,
    /// 题号不连续或重复
    #[error("题号必须从 1 开始连续且不重复: 位置 {position} 处为 {question_no}")]
    InvalidQuestionNo { position: usize, question_no: u32 },
}

/// 检查会话错误
///
/// `Fetch` / `Submit` 的消息会原样写入 `SessionUiState::Error`，
/// 是给用户看的提示文本。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// 获取题目失败，可以重新调用 `start_test`
    #[error("开始失败: {0}")]
    Fetch(String),
    /// 提交答案失败，可以在同一会话上重新调用 `submit`
    #[error("提交失败: {0}")]
    Submit(String),
    /// 没有会话时调用了 `submit`（调用方的逻辑错误）
    #[error("没有进行中的会话，无法提交")]
    InvalidSession,
    /// 上一个请求尚未完成
    #[error("请求进行中，不能重复调用 {0}")]
    Busy(&'static str),
    /// 会话已得到结果，需要先 reset
    #[error("会话已结束，请先调用 reset")]
    Finished,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

impl ApiError {
    /// 创建API请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
