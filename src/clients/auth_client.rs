/// 登录 API 客户端
use tracing::{info, warn};

use crate::clients::http::{endpoint_url, read_json};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};
use crate::services::TokenStore;

const LOGIN_ENDPOINT: &str = "auth/login";

/// 登录客户端
///
/// 登录成功后把令牌写入 [`TokenStore`]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::ClientBuildFailed)?;

        Ok(Self::with_http_client(http, &config.api_base_url))
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// 表单方式登录
    pub async fn login(
        &self,
        store: &dyn TokenStore,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let url = endpoint_url(&self.base_url, LOGIN_ENDPOINT);

        let response = self
            .http
            .post(&url)
            .form(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| ApiError::request_failed(LOGIN_ENDPOINT, e))?;

        let login: LoginResponse = read_json(LOGIN_ENDPOINT, response).await?;

        if login.access_token.is_empty() {
            warn!("⚠️ 登录响应中没有令牌: {}", username);
        } else {
            store.save(&login.access_token);
            info!("✓ 登录成功: {}", username);
        }

        Ok(login)
    }

    /// 退出登录，只清除本地令牌
    pub fn logout(&self, store: &dyn TokenStore) {
        store.clear();
        info!("已清除登录令牌");
    }
}
