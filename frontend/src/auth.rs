//! 认证模块
//!
//! 把核心库的 `SessionStore` 放进响应式信号里，供组件和路由服务共享。
//! 路由服务通过注入的会话信号来做守卫，不直接依赖本模块。

use crate::web::LocalStorage;
use coursereg::shared::{UserProfile, UserType};
use coursereg::{ClientConfig, CredentialSource, Session, SessionStore, SessionWriter};
use leptos::prelude::*;

/// 认证上下文
///
/// 包含会话存储的读写信号，通过 Context 在组件间共享。
/// `RwSignal` 是 `Copy` 的，可以直接交给 API 客户端作为凭据来源。
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: RwSignal<SessionStore<LocalStorage>>,
}

impl AuthContext {
    /// 创建认证上下文，并从 LocalStorage 恢复上次的会话
    pub fn new(config: &ClientConfig) -> Self {
        let store = SessionStore::open(LocalStorage, config.session_storage_key.clone());
        Self {
            store: RwSignal::new(store),
        }
    }

    /// 当前会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        let store = self.store;
        Signal::derive(move || store.with(|s| s.session().clone()))
    }

    /// 当前用户（响应式）
    pub fn user(&self) -> Option<UserProfile> {
        self.store.with(|s| s.session().user().cloned())
    }

    /// 页面初次加载时读取身份，不订阅后续变化
    pub fn user_type_untracked(&self) -> Option<UserType> {
        self.store.with_untracked(|s| s.session().user_type())
    }

    pub fn is_admin(&self) -> bool {
        self.store.with(|s| s.session().is_admin())
    }

    pub fn is_student(&self) -> bool {
        self.store.with(|s| s.session().is_student())
    }
}

impl SessionWriter for AuthContext {
    fn login(&self, user: UserProfile, credential: &str) {
        self.store.update(|s| s.login(user, credential));
    }

    fn logout(&self) {
        self.store.update(|s| s.logout());
    }

    fn update_user(&self, user: UserProfile) {
        self.store.update(|s| s.update_user(user));
    }
}

/// 凭据在每次发送请求时读取，不订阅信号
impl CredentialSource for AuthContext {
    fn credential(&self) -> Option<String> {
        self.store
            .try_with_untracked(|s| s.session().credential().map(str::to_string))
            .flatten()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
