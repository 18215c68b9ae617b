//! 认证流程
//!
//! 登录需要两次请求：先换取令牌，再用令牌读取完整资料。
//! 第二次请求必须带上新令牌，所以中间先写入一个只有用户名的临时会话。

use crate::api;
use crate::client::{ApiClient, CredentialSource};
use crate::error::ApiError;
use crate::request::HttpClient;
use crate::session::{SessionStorage, SessionStore};
use coursereg_shared::UserProfile;
use std::cell::RefCell;
use std::rc::Rc;

/// 登录失败时界面的通用提示
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

/// 会话写入口
///
/// 浏览器中由响应式的认证上下文实现，测试中由 `RefCell<SessionStore>` 实现。
pub trait SessionWriter {
    fn login(&self, user: UserProfile, credential: &str);
    fn logout(&self);
    /// 只替换用户资料，凭据保持不变
    fn update_user(&self, user: UserProfile);
}

impl<S: SessionStorage> SessionWriter for RefCell<SessionStore<S>> {
    fn login(&self, user: UserProfile, credential: &str) {
        self.borrow_mut().login(user, credential);
    }

    fn logout(&self) {
        self.borrow_mut().logout();
    }

    fn update_user(&self, user: UserProfile) {
        self.borrow_mut().update_user(user);
    }
}

impl<T: SessionWriter + ?Sized> SessionWriter for Rc<T> {
    fn login(&self, user: UserProfile, credential: &str) {
        (**self).login(user, credential)
    }

    fn logout(&self) {
        (**self).logout()
    }

    fn update_user(&self, user: UserProfile) {
        (**self).update_user(user)
    }
}

/// 登录并写入会话
///
/// 资料读取失败时撤销临时会话，不留下半登录状态。
pub async fn sign_in<C, K, W>(
    client: &ApiClient<C, K>,
    session: &W,
    username: &str,
    password: &str,
) -> Result<UserProfile, ApiError>
where
    C: HttpClient,
    K: CredentialSource,
    W: SessionWriter + ?Sized,
{
    let token = api::auth::login(client, username, password).await?;
    session.login(UserProfile::provisional(username), &token.access_token);

    match api::auth::current_user(client).await {
        Ok(user) => {
            session.update_user(user.clone());
            log_info!("[Auth] Signed in as {} ({})", user.username, user.user_type);
            Ok(user)
        }
        Err(e) => {
            log_error!("[Auth] Failed to load profile for {}: {}", username, e);
            session.logout();
            Err(e)
        }
    }
}

/// 注销
///
/// 先尽力通知服务端（失败只记录日志），再无条件清空本地会话。
pub async fn sign_out<C, K, W>(client: &ApiClient<C, K>, session: &W)
where
    C: HttpClient,
    K: CredentialSource,
    W: SessionWriter + ?Sized,
{
    if let Err(e) = api::auth::logout(client).await {
        log_warn!("[Auth] Server logout failed, clearing local session anyway: {}", e);
    }
    session.logout();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::route::{AppRoute, GuardDecision, evaluate};
    use crate::session::MemoryStorage;
    use coursereg_shared::HEADER_AUTHORIZATION;
    use serde_json::json;

    const BASE: &str = "http://api.test/api";

    type Store = Rc<RefCell<SessionStore<MemoryStorage>>>;

    fn setup() -> (ApiClient<MockHttpClient, Store>, Store) {
        let store: Store = Rc::new(RefCell::new(SessionStore::open(MemoryStorage::new(), "k")));
        let client = ApiClient::new(MockHttpClient::new(), BASE, store.clone());
        (client, store)
    }

    fn mock_account(client: &ApiClient<MockHttpClient, Store>, username: &str, user_type: &str) {
        client.http().mock_response(
            HttpMethod::Post,
            &format!("{}/auth/login", BASE),
            200,
            json!({ "access_token": format!("tok-{}", username), "refresh_token": "r", "token_type": "bearer" }),
        );
        client.http().mock_response(
            HttpMethod::Get,
            &format!("{}/auth/me", BASE),
            200,
            json!({
                "user_id": format!("id-{}", username),
                "username": username,
                "email": format!("{}@example.edu", username),
                "full_name": username.to_uppercase(),
                "user_type": user_type,
                "is_active": true
            }),
        );
    }

    #[tokio::test]
    async fn test_admin_sign_in_opens_admin_route() {
        let (client, store) = setup();
        mock_account(&client, "admin", "admin");

        let user = sign_in(&client, &store, "admin", "admin123").await.unwrap();
        assert!(user.user_type.is_admin());

        let store = store.borrow();
        assert_eq!(store.session().credential(), Some("tok-admin"));
        assert_eq!(
            evaluate(AppRoute::Admin, store.session()),
            GuardDecision::Render(AppRoute::Admin)
        );
    }

    #[tokio::test]
    async fn test_student_sign_in_is_kept_out_of_admin_route() {
        let (client, store) = setup();
        mock_account(&client, "student1", "student");

        sign_in(&client, &store, "student1", "student123").await.unwrap();

        assert_eq!(
            evaluate(AppRoute::Admin, store.borrow().session()),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }

    #[tokio::test]
    async fn test_profile_request_carries_new_token() {
        let (client, store) = setup();
        mock_account(&client, "student1", "student");

        sign_in(&client, &store, "student1", "student123").await.unwrap();

        let requests = client.http().requests.borrow();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].header(HEADER_AUTHORIZATION).is_none());
        assert_eq!(requests[1].header(HEADER_AUTHORIZATION), Some("Bearer tok-student1"));
    }

    #[tokio::test]
    async fn test_update_user_through_writer_keeps_token() {
        let (client, store) = setup();
        mock_account(&client, "student1", "student");
        sign_in(&client, &store, "student1", "student123").await.unwrap();

        let renamed = UserProfile {
            full_name: "Renamed Student".to_string(),
            ..store.borrow().session().user().cloned().unwrap()
        };
        store.update_user(renamed.clone());

        let store = store.borrow();
        assert_eq!(store.session().user(), Some(&renamed));
        assert_eq!(store.session().credential(), Some("tok-student1"));
        assert!(store.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_rejected_credentials_leave_session_empty() {
        let (client, store) = setup();
        client.http().mock_response(
            HttpMethod::Post,
            &format!("{}/auth/login", BASE),
            401,
            json!({ "detail": "Incorrect username or password" }),
        );

        let err = sign_in(&client, &store, "admin", "nope").await.unwrap_err();
        assert_eq!(err.detail_or(LOGIN_FAILED_MESSAGE), "Incorrect username or password");
        assert!(!store.borrow().session().is_authenticated());
    }

    #[tokio::test]
    async fn test_profile_failure_rolls_back_provisional_session() {
        let (client, store) = setup();
        client.http().mock_response(
            HttpMethod::Post,
            &format!("{}/auth/login", BASE),
            200,
            json!({ "access_token": "tok" }),
        );
        // /auth/me 未配置，mock 返回 404

        let err = sign_in(&client, &store, "admin", "admin123").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(!store.borrow().session().is_authenticated());
        assert!(store.borrow().session().user().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_session_even_if_server_fails() {
        let (client, store) = setup();
        mock_account(&client, "admin", "admin");
        sign_in(&client, &store, "admin", "admin123").await.unwrap();
        // /auth/logout 未配置，服务端返回 404

        sign_out(&client, &store).await;

        assert!(!store.borrow().session().is_authenticated());
        let last = client.http().last_request().unwrap();
        assert!(last.url.ends_with("/auth/logout"));
        assert_eq!(last.header(HEADER_AUTHORIZATION), Some("Bearer tok-admin"));
    }
}
