//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、它们的访问要求，以及唯一的守卫判定函数。

use crate::session::Session;
use std::fmt::Display;

/// 路由的访问要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRequirement {
    /// 任何人都可访问
    Public,
    /// 需要已认证的会话
    Authenticated,
    /// 需要管理员身份
    Admin,
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    #[default]
    Login,
    /// `/`：认证后直接转到面板
    Index,
    /// 面板（认证后的默认落地页）
    Dashboard,
    /// 全部课程
    Courses,
    /// 我的课程
    MyCourses,
    /// 个人资料
    Profile,
    /// 管理面板
    Admin,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match path {
            "" | "/" => Self::Index,
            "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/courses" => Self::Courses,
            "/my-courses" => Self::MyCourses,
            "/profile" => Self::Profile,
            "/admin" => Self::Admin,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Index => "/",
            Self::Dashboard => "/dashboard",
            Self::Courses => "/courses",
            Self::MyCourses => "/my-courses",
            Self::Profile => "/profile",
            Self::Admin => "/admin",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫元数据：该路由的访问要求**
    pub fn requirement(&self) -> RouteRequirement {
        match self {
            Self::Login | Self::NotFound => RouteRequirement::Public,
            Self::Admin => RouteRequirement::Admin,
            Self::Index | Self::Dashboard | Self::Courses | Self::MyCourses | Self::Profile => {
                RouteRequirement::Authenticated
            }
        }
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证后的默认落地页（权限不足时也回到这里）
    pub fn landing() -> Self {
        Self::Dashboard
    }

    /// 导航栏标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Index | Self::Dashboard => "Dashboard",
            Self::Courses => "All Courses",
            Self::MyCourses => "My Courses",
            Self::Profile => "Profile",
            Self::Admin => "Admin Panel",
            Self::NotFound => "Not Found",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 渲染目标页面
    Render(AppRoute),
    /// 重定向到另一个页面
    Redirect(AppRoute),
}

impl GuardDecision {
    /// 最终要显示的路由
    pub fn route(&self) -> AppRoute {
        match self {
            GuardDecision::Render(r) | GuardDecision::Redirect(r) => *r,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardDecision::Redirect(_))
    }
}

/// **核心守卫逻辑**
///
/// 纯函数：只依赖当前会话与目标路由的访问要求，没有副作用。
/// 1. 受保护页面且未认证 → 登录页
/// 2. 管理员页面且用户不是管理员 → 默认落地页
/// 3. 否则渲染（`/` 直接落到面板）
pub fn evaluate(target: AppRoute, session: &Session) -> GuardDecision {
    match target.requirement() {
        RouteRequirement::Public => GuardDecision::Render(target),
        _ if !session.is_authenticated() => {
            GuardDecision::Redirect(AppRoute::auth_failure_redirect())
        }
        RouteRequirement::Admin if !session.is_admin() => GuardDecision::Redirect(AppRoute::landing()),
        _ if target == AppRoute::Index => GuardDecision::Redirect(AppRoute::landing()),
        _ => GuardDecision::Render(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStorage, SessionStore};
    use coursereg_shared::{UserProfile, UserType};

    const PROTECTED: [AppRoute; 6] = [
        AppRoute::Index,
        AppRoute::Dashboard,
        AppRoute::Courses,
        AppRoute::MyCourses,
        AppRoute::Profile,
        AppRoute::Admin,
    ];

    fn store_as(user_type: UserType) -> SessionStore<MemoryStorage> {
        let mut store = SessionStore::open(MemoryStorage::new(), "k");
        let user = UserProfile {
            user_type,
            ..UserProfile::provisional("someone")
        };
        store.login(user, "tok");
        store
    }

    #[test]
    fn test_path_round_trip() {
        for route in PROTECTED.iter().chain([AppRoute::Login].iter()) {
            assert_eq!(AppRoute::from_path(route.to_path()), *route);
        }
        assert_eq!(AppRoute::from_path("/courses/"), AppRoute::Courses);
        assert_eq!(AppRoute::from_path("/admin?tab=1"), AppRoute::Admin);
        assert_eq!(AppRoute::from_path("/nowhere"), AppRoute::NotFound);
    }

    #[test]
    fn test_redirect_target_title() {
        // 重定向后的标题跟随实际渲染的路由
        let guest = SessionStore::open(MemoryStorage::new(), "k");
        assert_eq!(evaluate(AppRoute::Courses, guest.session()).route().title(), "Login");

        let student = store_as(UserType::Student);
        assert_eq!(evaluate(AppRoute::Admin, student.session()).route().title(), "Dashboard");
        assert_eq!(AppRoute::Index.title(), AppRoute::Dashboard.title());
    }

    #[test]
    fn test_logout_then_any_protected_route_redirects_to_login() {
        let mut store = store_as(UserType::Admin);
        store.logout();
        for route in PROTECTED {
            assert_eq!(
                evaluate(route, store.session()),
                GuardDecision::Redirect(AppRoute::Login),
                "route {}",
                route
            );
        }
    }

    #[test]
    fn test_public_routes_render_without_session() {
        let store = SessionStore::open(MemoryStorage::new(), "k");
        assert_eq!(
            evaluate(AppRoute::Login, store.session()),
            GuardDecision::Render(AppRoute::Login)
        );
        assert_eq!(
            evaluate(AppRoute::NotFound, store.session()),
            GuardDecision::Render(AppRoute::NotFound)
        );
    }

    #[test]
    fn test_admin_route_by_user_type() {
        let student = store_as(UserType::Student);
        assert_eq!(
            evaluate(AppRoute::Admin, student.session()),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );

        let teacher = store_as(UserType::Teacher);
        assert!(evaluate(AppRoute::Admin, teacher.session()).is_redirect());

        let admin = store_as(UserType::Admin);
        assert_eq!(
            evaluate(AppRoute::Admin, admin.session()),
            GuardDecision::Render(AppRoute::Admin)
        );
    }

    #[test]
    fn test_authenticated_without_profile_is_not_admin() {
        let mut store = SessionStore::open(MemoryStorage::new(), "k");
        store.login(UserProfile::provisional("admin"), "tok");
        // 资料尚未补全时按普通用户对待
        assert!(evaluate(AppRoute::Admin, store.session()).is_redirect());
        assert_eq!(
            evaluate(AppRoute::Courses, store.session()),
            GuardDecision::Render(AppRoute::Courses)
        );
    }

    #[test]
    fn test_index_lands_on_dashboard() {
        let store = store_as(UserType::Student);
        assert_eq!(
            evaluate(AppRoute::Index, store.session()),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }

    #[test]
    fn test_guard_is_pure() {
        let store = store_as(UserType::Student);
        let first = evaluate(AppRoute::MyCourses, store.session());
        let second = evaluate(AppRoute::MyCourses, store.session());
        assert_eq!(first, second);
        assert_eq!(first.route(), AppRoute::MyCourses);
    }
}
