use std::fmt;

/// API 调用错误
///
/// 三类失败各自原样携带信息，不做任何恢复或翻译：
/// - 传输失败（网络不可达、请求无法构建）
/// - 服务端返回非 2xx（保留状态码、`detail` 与原始响应体）
/// - 响应体无法解析为期望的形状
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 网络请求失败
    Transport(String),
    /// 服务端报告的错误
    Server {
        status: u16,
        /// `{"detail": "..."}` 中的字符串消息
        detail: Option<String>,
        body: String,
    },
    /// 响应解析失败
    Decode(String),
}

impl ApiError {
    /// 从非 2xx 响应构造，提取 FastAPI 风格的 `detail` 字段
    pub fn from_response(status: u16, body: String) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .filter(|d| !d.is_empty());
        ApiError::Server {
            status,
            detail,
            body,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// 401：凭据过期或无效，由服务端判定
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// 界面提示文本：优先使用服务端的 detail，否则使用调用方给出的通用消息
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "network error: {}", msg),
            ApiError::Server {
                status,
                detail: Some(detail),
                ..
            } => write!(f, "server error {}: {}", status, detail),
            ApiError::Server { status, body, .. } => write!(f, "server error {}: {}", status, body),
            ApiError::Decode(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
