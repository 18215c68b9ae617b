//! 会话模块
//!
//! 进程内唯一的会话状态（当前用户 + 凭据），以及它的持久化。
//! 只有 `login` / `logout` / `update_user` / `invalidate` 四个写入口，
//! 每次写入后整体序列化到存储，启动时整体反序列化。

use crate::client::CredentialSource;
use coursereg_shared::{UserProfile, UserType};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 持久化记录的格式版本
const RECORD_VERSION: u32 = 0;

// =========================================================
// 存储抽象 (Storage Abstraction)
// =========================================================

/// 持久化存储接口，语义与浏览器 LocalStorage 一致
pub trait SessionStorage {
    /// 获取存储的字符串值，键不存在或出错时返回 None
    fn get(&self, key: &str) -> Option<String>;
    /// 写入，成功返回 true
    fn set(&self, key: &str, value: &str) -> bool;
    /// 删除，成功返回 true
    fn delete(&self, key: &str) -> bool;
}

/// 内存存储，克隆之间共享同一份数据（模拟页面刷新前后的同一个 LocalStorage）
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Rc<RefCell<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有写操作都失败的存储（如浏览器禁用了存储或配额已满）
    pub fn read_only() -> Self {
        Self {
            data: Rc::default(),
            read_only: true,
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if self.read_only {
            return false;
        }
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        if self.read_only {
            return false;
        }
        self.data.borrow_mut().remove(key);
        true
    }
}

// =========================================================
// 会话状态 (Session)
// =========================================================

/// 会话
///
/// `is_authenticated` 由凭据是否存在推导，不单独存储，
/// 因此“已认证 ⇔ 持有凭据”在任何状态下都成立。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    user: Option<UserProfile>,
    credential: Option<String>,
}

impl Session {
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.user.as_ref().map(|u| u.user_type)
    }

    pub fn is_admin(&self) -> bool {
        self.user_type().is_some_and(|t| t.is_admin())
    }

    pub fn is_student(&self) -> bool {
        self.user_type().is_some_and(|t| t.is_student())
    }

    fn to_record(&self) -> SessionRecord {
        SessionRecord {
            user: self.user.clone(),
            token: self.credential.clone(),
            is_authenticated: self.is_authenticated(),
        }
    }

    /// 从持久化记录恢复；没有凭据的记录视为空会话（空字符串也是凭据）
    fn from_record(record: SessionRecord) -> Self {
        match record.token {
            Some(token) => Self {
                user: record.user,
                credential: Some(token),
            },
            None => Self::default(),
        }
    }
}

/// 持久化格式：`{"state": {"user", "token", "isAuthenticated"}, "version": 0}`
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    state: SessionRecord,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default)]
    user: Option<UserProfile>,
    #[serde(default)]
    token: Option<String>,
    #[serde(rename = "isAuthenticated", default)]
    is_authenticated: bool,
}

// =========================================================
// 会话存储 (Session Store)
// =========================================================

/// 会话存储
///
/// 所有写入都需要 `&mut self`，保证同一时刻只有一个写者；
/// 每次写入整体替换字段，读者不会看到中间状态。
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    key: String,
    session: Session,
}

impl<S: SessionStorage> SessionStore<S> {
    /// 打开存储并恢复上次的会话
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let session = Self::rehydrate(&storage, &key);
        Self {
            storage,
            key,
            session,
        }
    }

    fn rehydrate(storage: &S, key: &str) -> Session {
        let Some(raw) = storage.get(key) else {
            return Session::default();
        };

        let persisted = match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(p) if p.version == RECORD_VERSION => p,
            Ok(p) => {
                log_warn!(
                    "[Session] Discarding persisted session with unknown version {}",
                    p.version
                );
                storage.delete(key);
                return Session::default();
            }
            Err(e) => {
                log_warn!("[Session] Discarding unreadable persisted session: {}", e);
                storage.delete(key);
                return Session::default();
            }
        };

        let recorded_flag = persisted.state.is_authenticated;
        let session = Session::from_record(persisted.state);
        if recorded_flag != session.is_authenticated() {
            log_warn!(
                "[Session] Persisted isAuthenticated={} disagrees with credential, using {}",
                recorded_flag,
                session.is_authenticated()
            );
        }
        if session.is_authenticated() {
            log_info!(
                "[Session] Restored session for {}",
                session.user().map_or("<unknown>", |u| u.username.as_str())
            );
        }
        session
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// 登录：同时替换用户与凭据。凭据的有效性由调用方（服务端）保证
    pub fn login(&mut self, user: UserProfile, credential: impl Into<String>) {
        self.session = Session {
            user: Some(user),
            credential: Some(credential.into()),
        };
        self.persist();
    }

    /// 注销：清空全部字段
    pub fn logout(&mut self) {
        self.session = Session::default();
        self.persist();
    }

    /// 只替换用户资料，凭据保持不变
    pub fn update_user(&mut self, user: UserProfile) {
        self.session.user = Some(user);
        self.persist();
    }

    /// 显式失效：删除持久化记录并清空内存状态
    pub fn invalidate(&mut self) {
        self.session = Session::default();
        if !self.storage.delete(&self.key) {
            log_warn!("[Session] Failed to remove persisted session '{}'", self.key);
        }
    }

    fn persist(&self) {
        let persisted = PersistedSession {
            state: self.session.to_record(),
            version: RECORD_VERSION,
        };
        let written = serde_json::to_string(&persisted)
            .map(|raw| self.storage.set(&self.key, &raw))
            .unwrap_or(false);
        if !written {
            log_warn!("[Session] Failed to persist session to '{}'", self.key);
        }
    }
}

impl<S: SessionStorage> CredentialSource for RefCell<SessionStore<S>> {
    fn credential(&self) -> Option<String> {
        self.borrow().session().credential().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SESSION_STORAGE_KEY as KEY;

    fn profile(username: &str, user_type: UserType) -> UserProfile {
        UserProfile {
            id: format!("id-{}", username),
            username: username.to_string(),
            full_name: format!("{} Full", username),
            email: format!("{}@example.edu", username),
            user_type,
            is_active: true,
        }
    }

    fn assert_invariant(session: &Session) {
        assert_eq!(session.is_authenticated(), session.credential().is_some());
    }

    #[test]
    fn test_starts_empty_without_persisted_state() {
        let store = SessionStore::open(MemoryStorage::new(), KEY);
        assert_eq!(store.session(), &Session::default());
        assert!(!store.session().is_authenticated());
        assert_invariant(store.session());
    }

    #[test]
    fn test_invariant_holds_across_mutators() {
        let mut store = SessionStore::open(MemoryStorage::new(), KEY);

        store.login(profile("student1", UserType::Student), "tok-1");
        assert_invariant(store.session());
        assert!(store.session().is_authenticated());

        store.update_user(profile("student1", UserType::Student));
        assert_invariant(store.session());

        store.logout();
        assert_invariant(store.session());
        assert!(store.session().user().is_none());
        assert!(store.session().credential().is_none());

        store.update_user(profile("ghost", UserType::Admin));
        assert_invariant(store.session());
        assert!(!store.session().is_authenticated());
    }

    #[test]
    fn test_update_user_keeps_credential() {
        let mut store = SessionStore::open(MemoryStorage::new(), KEY);
        store.login(UserProfile::provisional("admin"), "tok-admin");
        let before_credential = store.session().credential().map(str::to_string);
        let before_auth = store.session().is_authenticated();

        store.update_user(profile("admin", UserType::Admin));

        assert_eq!(store.session().credential().map(str::to_string), before_credential);
        assert_eq!(store.session().is_authenticated(), before_auth);
        assert!(store.session().is_admin());
    }

    #[test]
    fn test_reload_restores_login() {
        let storage = MemoryStorage::new();
        let user = profile("student1", UserType::Student);
        {
            let mut store = SessionStore::open(storage.clone(), KEY);
            store.login(user.clone(), "tok-1");
        }

        let reloaded = SessionStore::open(storage, KEY);
        assert_eq!(reloaded.session().user(), Some(&user));
        assert_eq!(reloaded.session().credential(), Some("tok-1"));
        assert!(reloaded.session().is_authenticated());
    }

    #[test]
    fn test_reload_restores_empty_credential() {
        let storage = MemoryStorage::new();
        let user = profile("student1", UserType::Student);
        let mut store = SessionStore::open(storage.clone(), KEY);
        store.login(user.clone(), "");
        let before = store.session().clone();

        let reloaded = SessionStore::open(storage, store.storage_key());
        assert_eq!(reloaded.session(), &before);
        assert_eq!(reloaded.session().credential(), Some(""));
        assert!(reloaded.session().is_authenticated());
    }

    #[test]
    fn test_reload_after_logout_is_empty() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::open(storage.clone(), KEY);
        store.login(profile("admin", UserType::Admin), "tok");
        store.logout();

        let reloaded = SessionStore::open(storage, KEY);
        assert_eq!(reloaded.session(), &Session::default());
    }

    #[test]
    fn test_persisted_layout() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::open(storage.clone(), KEY);
        store.login(profile("admin", UserType::Admin), "tok");

        let raw = storage.get(KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["token"], "tok");
        assert_eq!(value["state"]["isAuthenticated"], true);
        assert_eq!(value["state"]["user"]["user_type"], "admin");
    }

    #[test]
    fn test_inconsistent_record_is_repaired() {
        let storage = MemoryStorage::new();
        storage.set(
            KEY,
            r#"{"state":{"user":{"username":"x","user_type":"admin"},"token":null,"isAuthenticated":true},"version":0}"#,
        );
        let store = SessionStore::open(storage.clone(), KEY);
        assert!(!store.session().is_authenticated());
        assert!(store.session().user().is_none());

        storage.set(
            KEY,
            r#"{"state":{"user":null,"token":"tok","isAuthenticated":false},"version":0}"#,
        );
        let store = SessionStore::open(storage, KEY);
        assert!(store.session().is_authenticated());
        assert_invariant(store.session());
    }

    #[test]
    fn test_unreadable_record_is_discarded() {
        let storage = MemoryStorage::new();
        storage.set(KEY, "{not json");
        let store = SessionStore::open(storage.clone(), KEY);
        assert_eq!(store.session(), &Session::default());
        assert!(storage.get(KEY).is_none());
    }

    #[test]
    fn test_invalidate_removes_persisted_record() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::open(storage.clone(), KEY);
        store.login(profile("student1", UserType::Student), "tok");
        store.invalidate();

        assert!(!store.session().is_authenticated());
        assert!(storage.get(KEY).is_none());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let mut store = SessionStore::open(MemoryStorage::read_only(), KEY);
        store.login(profile("student1", UserType::Student), "tok");
        assert!(store.session().is_authenticated());
    }

    #[test]
    fn test_refcell_store_is_a_credential_source() {
        let store = RefCell::new(SessionStore::open(MemoryStorage::new(), KEY));
        assert_eq!(store.credential(), None);
        store
            .borrow_mut()
            .login(profile("student1", UserType::Student), "tok");
        assert_eq!(store.credential(), Some("tok".to_string()));
    }
}
