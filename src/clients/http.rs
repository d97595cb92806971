//! 各客户端共用的 HTTP 辅助函数

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::utils::logging::truncate_text;

/// 拼接服务端地址和接口路径
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// 有令牌时附加 `Authorization: Bearer ..`
pub(crate) fn authorize(
    request: reqwest::RequestBuilder,
    token: Option<&str>,
) -> reqwest::RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// 读取响应体并解析为 JSON
pub(crate) async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::request_failed(endpoint, e))?;

    debug!("{} 响应 ({}): {}", endpoint, status, truncate_text(&body, 300));

    parse_body(endpoint, status, &body)
}

/// 非 2xx 状态码直接报错，否则按 JSON 解析
pub(crate) fn parse_body<T: DeserializeOwned>(
    endpoint: &str,
    status: u16,
    body: &str,
) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::BadStatus {
            endpoint: endpoint.to_string(),
            status,
            body: truncate_text(body, 200),
        });
    }

    serde_json::from_str(body).map_err(|source| ApiError::JsonParseFailed {
        endpoint: endpoint.to_string(),
        source,
    })
}
