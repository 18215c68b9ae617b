//! HTTP 客户端封装
//!
//! 唯一配置好的 API 客户端：拼接基础 URL，在会话持有凭据时附加
//! `Authorization: Bearer <credential>`，非 2xx 响应原样交给调用方。
//! 不重试，不做本地错误翻译。

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::request::{HttpClient, HttpRequest};
use coursereg_shared::protocol::ApiRequest;
use coursereg_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION};
use std::rc::Rc;

/// 凭据来源
///
/// 客户端在每次发送时读取，而不是在构建时缓存，
/// 因此登录 / 注销后的下一次请求立即使用新状态。
pub trait CredentialSource {
    fn credential(&self) -> Option<String>;
}

impl<T: CredentialSource + ?Sized> CredentialSource for Rc<T> {
    fn credential(&self) -> Option<String> {
        (**self).credential()
    }
}

/// 固定凭据（或匿名），用于工具和端到端测试
impl CredentialSource for Option<String> {
    fn credential(&self) -> Option<String> {
        self.clone()
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient<C, K> {
    http: C,
    base_url: String,
    credentials: K,
}

impl<C, K> ApiClient<C, K> {
    pub fn new(http: C, base_url: impl Into<String>, credentials: K) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            credentials,
        }
    }

    pub fn from_config(http: C, config: &ClientConfig, credentials: K) -> Self {
        Self::new(http, config.api_base_url.clone(), credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    fn url(&self, path: &str, query: &[(&'static str, String)]) -> String {
        let mut url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        let mut separator = '?';
        for (key, value) in query {
            url.push(separator);
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            separator = '&';
        }
        url
    }
}

impl<C: HttpClient, K: CredentialSource> ApiClient<C, K> {
    /// 将类型化的请求转换为 HTTP 请求，附加认证头
    pub fn build_request<R: ApiRequest>(&self, req: &R) -> Result<HttpRequest, ApiError> {
        let url = self.url(&req.path(), &req.query());
        let mut http_req = HttpRequest::new(&url, R::METHOD).with_header("Accept", "application/json");

        if let Some(credential) = self.credentials.credential() {
            http_req = http_req.with_header(
                HEADER_AUTHORIZATION,
                &format!("{}{}", BEARER_PREFIX, credential),
            );
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req)
                .map_err(|e| ApiError::Transport(format!("failed to encode request body: {}", e)))?;
            http_req = http_req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        Ok(http_req)
    }

    /// 发送请求：2xx 解析为 `R::Response`，否则返回携带原始响应体的错误
    pub async fn send<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let path = req.path();
        let http_req = self.build_request(req)?;
        let resp = self.http.send(http_req).await?;

        if !resp.ok() {
            log_warn!("[Api] {} {} -> {}", R::METHOD.as_str(), path, resp.status);
            return Err(ApiError::from_response(resp.status, resp.body));
        }

        resp.json::<R::Response>().map_err(|e| match e {
            ApiError::Decode(msg) => {
                ApiError::Decode(format!("{} {}: {}", R::METHOD.as_str(), path, msg))
            }
            other => other,
        })
    }
}
