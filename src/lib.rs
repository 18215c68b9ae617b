//! 选课系统客户端核心
//!
//! 与平台无关的部分：配置、日志、HTTP 契约、会话存储、路由守卫、
//! 各领域 API 以及页面共享的视图模型。浏览器端的 fetch / localStorage
//! 实现在 `frontend` 包中。

#[macro_use]
pub mod logging;

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod route;
pub mod session;
pub mod view_model;

pub use auth::{SessionWriter, sign_in, sign_out};
pub use client::{ApiClient, CredentialSource};
pub use config::ClientConfig;
pub use error::ApiError;
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use route::{AppRoute, GuardDecision, RouteRequirement, evaluate};
pub use session::{MemoryStorage, Session, SessionStorage, SessionStore};

pub use coursereg_shared as shared;
