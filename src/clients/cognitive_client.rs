/// 认知检查 API 客户端
///
/// 封装 `cognitive/start` 与 `cognitive/submit` 两个接口
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::clients::http::{authorize, endpoint_url, read_json};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{AnswerItem, ResultSummary, StartResponse, SubmitRequest};

const START_ENDPOINT: &str = "cognitive/start";
const SUBMIT_ENDPOINT: &str = "cognitive/submit";

/// 检查会话与服务端之间的协议
///
/// 实现方不保存任何会话状态；不重试，也不做幂等去重。
#[async_trait]
pub trait CognitiveApi: Send + Sync {
    /// 创建会话并获取题目
    async fn fetch_questions(
        &self,
        user_id: u32,
        count: u32,
        category: Option<&str>,
    ) -> Result<StartResponse, ApiError>;

    /// 一次性提交整个会话的答案，返回评分结果
    async fn submit_answers(
        &self,
        session_id: i64,
        answers: &[AnswerItem],
    ) -> Result<ResultSummary, ApiError>;
}

#[derive(Debug, Serialize)]
struct StartQuery<'a> {
    user_id: u32,
    count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
}

/// 基于 reqwest 的检查 API 客户端
#[derive(Clone)]
pub struct HttpCognitiveClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCognitiveClient {
    /// 创建新的检查客户端
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::ClientBuildFailed)?;

        Ok(Self::with_http_client(http, &config.api_base_url).with_token(config.auth_token.clone()))
    }

    /// 使用已有的 reqwest 客户端
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: None,
        }
    }

    /// 设置 Bearer 令牌
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }
}

#[async_trait]
impl CognitiveApi for HttpCognitiveClient {
    async fn fetch_questions(
        &self,
        user_id: u32,
        count: u32,
        category: Option<&str>,
    ) -> Result<StartResponse, ApiError> {
        let url = endpoint_url(&self.base_url, START_ENDPOINT);
        let query = StartQuery {
            user_id,
            count,
            category: category.filter(|c| !c.is_empty()),
        };

        debug!("请求题目: {} {:?}", url, query);

        let response = authorize(self.http.get(&url).query(&query), self.token.as_deref())
            .send()
            .await
            .map_err(|e| ApiError::request_failed(START_ENDPOINT, e))?;

        let start: StartResponse = read_json(START_ENDPOINT, response).await?;

        info!(
            "✓ 获取题目成功 sessionId: {}, 题目数: {}",
            start.session_id,
            start.questions.len()
        );

        Ok(start)
    }

    async fn submit_answers(
        &self,
        session_id: i64,
        answers: &[AnswerItem],
    ) -> Result<ResultSummary, ApiError> {
        let url = endpoint_url(&self.base_url, SUBMIT_ENDPOINT);
        let body = SubmitRequest {
            session_id,
            answers: answers.to_vec(),
        };

        debug!("提交答案 Payload: {:?}", body);

        let response = authorize(self.http.post(&url).json(&body), self.token.as_deref())
            .send()
            .await
            .map_err(|e| ApiError::request_failed(SUBMIT_ENDPOINT, e))?;

        let summary: ResultSummary = read_json(SUBMIT_ENDPOINT, response).await?;

        info!(
            "✓ 提交成功 总分: {}, 等级: {}",
            summary.total_score, summary.grade
        );

        Ok(summary.normalized())
    }
}
