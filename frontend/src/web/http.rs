//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient` 契约，替代 `gloo-net`。

use coursereg::request::{HttpClient, HttpRequest, HttpResponse};
use coursereg::ApiError;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 基于浏览器 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

fn js_err(context: &str, e: JsValue) -> ApiError {
    ApiError::Transport(format!("{}: {:?}", context, e))
}

async fn read_text(response: &Response) -> Result<String, ApiError> {
    let promise = response
        .text()
        .map_err(|e| js_err("failed to read response body", e))?;

    let text = JsFuture::from(promise)
        .await
        .map_err(|e| js_err("failed to read response body", e))?;

    text.as_string()
        .ok_or_else(|| ApiError::Transport("response body is not a string".to_string()))
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let headers = Headers::new().map_err(|e| js_err("failed to create headers", e))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_err("failed to set header", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| js_err("failed to build request", e))?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Transport("window is not available".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_err("network error", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_err("unexpected fetch result", e))?;

        Ok(HttpResponse {
            status: response.status(),
            body: read_text(&response).await?,
        })
    }
}
