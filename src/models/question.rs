use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// 检查题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// 会话内序号（从1开始）
    pub question_no: u32,
    pub question_id: i64,
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// `cognitive/start` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub session_id: i64,
    pub questions: Vec<Question>,
}

impl StartResponse {
    /// 按题号排序并校验：题目不能为空，题号必须是 1..=N 且不重复
    pub fn validated(mut self) -> Result<Self, ApiError> {
        if self.questions.is_empty() {
            return Err(ApiError::EmptyQuestions);
        }

        self.questions.sort_by_key(|q| q.question_no);

        for (position, question) in self.questions.iter().enumerate() {
            if question.question_no as usize != position + 1 {
                return Err(ApiError::InvalidQuestionNo {
                    position,
                    question_no: question.question_no,
                });
            }
        }

        Ok(self)
    }
}
