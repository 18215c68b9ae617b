//! 领域 API 模块
//!
//! 每个函数对应一个服务端接口，只负责整理参数并交给 [`ApiClient`]，
//! 失败原样向上传递。
//!
//! [`ApiClient`]: crate::client::ApiClient

pub mod auth;
pub mod courses;
pub mod enrollments;
