use serde::{Deserialize, Serialize};

/// 单道题的作答记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerItem {
    pub question_no: u32,
    pub question_id: i64,
    /// 语音识别结果
    pub stt_text: Option<String>,
    /// 手动输入的答案
    pub typed_text: Option<String>,
    /// 作答耗时（毫秒）
    pub latency_ms: Option<u64>,
}

/// `cognitive/submit` 的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub session_id: i64,
    pub answers: Vec<AnswerItem>,
}
