use crate::auth::AuthContext;
use crate::web::FetchHttpClient;
use coursereg::{ApiClient, ClientConfig};
use leptos::prelude::*;

/// 应用内唯一的 API 客户端：fetch 传输 + 认证上下文作为凭据来源
pub type Api = ApiClient<FetchHttpClient, AuthContext>;

pub fn provide_api(config: &ClientConfig, auth: AuthContext) {
    provide_context::<Api>(ApiClient::from_config(FetchHttpClient, config, auth));
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> Api {
    use_context::<Api>().expect("Api should be provided")
}
