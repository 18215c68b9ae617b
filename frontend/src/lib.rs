//! 选课系统前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `coursereg::route`: 路由定义与守卫（领域模型，位于核心库）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `api`: 带凭据的 API 客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod admin_panel;
    pub mod course_form;
    pub mod courses;
    pub mod dashboard;
    pub mod layout;
    pub mod login;
    pub mod my_courses;
    pub mod not_found;
    pub mod notification;
    pub mod profile;
}

use crate::auth::AuthContext;
use crate::components::admin_panel::AdminPanelPage;
use crate::components::courses::CoursesPage;
use crate::components::dashboard::DashboardPage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::my_courses::MyCoursesPage;
use crate::components::not_found::NotFoundPage;
use crate::components::profile::ProfilePage;

use coursereg::{AppRoute, ClientConfig};
use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod dialog;
    mod http;
    pub mod router;
    mod storage;

    pub use dialog::confirm;
    pub use http::FetchHttpClient;
    pub use storage::LocalStorage;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。守卫已在路由服务中执行，
/// 到达这里的路由都是允许渲染的。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
        AppRoute::Index | AppRoute::Dashboard => view! { <Layout><DashboardPage /></Layout> }.into_any(),
        AppRoute::Courses => view! { <Layout><CoursesPage /></Layout> }.into_any(),
        AppRoute::MyCourses => view! { <Layout><MyCoursesPage /></Layout> }.into_any(),
        AppRoute::Profile => view! { <Layout><ProfilePage /></Layout> }.into_any(),
        AppRoute::Admin => view! { <Layout><AdminPanelPage /></Layout> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置（API 地址、会话存储键）
    let config = ClientConfig::from_build_env();

    // 2. 创建认证上下文（从 LocalStorage 恢复会话）
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 3. API 客户端在每次请求时从认证上下文读取凭据
    api::provide_api(&config, auth_ctx);

    // 4. 获取会话信号，用于注入路由服务（解耦！）
    let session = auth_ctx.session_signal();

    view! {
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
