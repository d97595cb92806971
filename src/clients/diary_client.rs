/// 日记 API 客户端
///
/// 封装 `diary/list` 与 `diary/create`。修改已有日记也走 `diary/create`，
/// 由服务端按日期覆盖。
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::clients::http::{authorize, endpoint_url, read_json};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{entries_by_date, DiaryEntry, DiaryResponse, ResultDiary};

const LIST_ENDPOINT: &str = "diary/list";
const CREATE_ENDPOINT: &str = "diary/create/";

#[derive(Debug, Serialize)]
struct UserQuery {
    user_id: u32,
}

/// 基于 reqwest 的日记客户端
#[derive(Clone)]
pub struct DiaryClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl DiaryClient {
    /// 创建新的日记客户端
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::ClientBuildFailed)?;

        Ok(Self::with_http_client(http, &config.api_base_url).with_token(config.auth_token.clone()))
    }

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

    /// 获取用户的全部日记
    pub async fn list(&self, user_id: u32) -> Result<Vec<DiaryResponse>, ApiError> {
        let url = endpoint_url(&self.base_url, LIST_ENDPOINT);

        let response = authorize(
            self.http.get(&url).query(&UserQuery { user_id }),
            self.token.as_deref(),
        )
        .send()
        .await
        .map_err(|e| ApiError::request_failed(LIST_ENDPOINT, e))?;

        let list: Vec<DiaryResponse> = read_json(LIST_ENDPOINT, response).await?;
        info!("✓ 获取日记 userId: {}, 条数: {}", user_id, list.len());

        Ok(list)
    }

    /// 获取全部日记并按日期整理，供日历显示
    pub async fn list_by_date(
        &self,
        user_id: u32,
    ) -> Result<BTreeMap<NaiveDate, DiaryEntry>, ApiError> {
        Ok(entries_by_date(self.list(user_id).await?))
    }

    /// 保存某天的日记（新建或覆盖）
    pub async fn create(&self, user_id: u32, entry: &DiaryEntry) -> Result<ResultDiary, ApiError> {
        let url = endpoint_url(&self.base_url, CREATE_ENDPOINT);

        debug!("保存日记 Payload: {:?}", entry);

        let response = authorize(
            self.http
                .post(&url)
                .query(&UserQuery { user_id })
                .json(entry),
            self.token.as_deref(),
        )
        .send()
        .await
        .map_err(|e| ApiError::request_failed(CREATE_ENDPOINT, e))?;

        let saved: ResultDiary = read_json(CREATE_ENDPOINT, response).await?;
        info!("✓ 日记已保存 entryId: {}, 日期: {}", saved.entry_id, saved.entry_date);

        Ok(saved)
    }
}
