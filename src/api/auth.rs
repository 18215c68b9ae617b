use crate::client::{ApiClient, CredentialSource};
use crate::error::ApiError;
use crate::request::HttpClient;
use coursereg_shared::protocol::{CurrentUserRequest, LogoutRequest};
use coursereg_shared::{LoginRequest, StatusMessage, TokenResponse, UserProfile};

/// `POST /auth/login`
pub async fn login<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
    username: &str,
    password: &str,
) -> Result<TokenResponse, ApiError> {
    let req = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    client.send(&req).await
}

/// `GET /auth/me`
pub async fn current_user<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
) -> Result<UserProfile, ApiError> {
    client.send(&CurrentUserRequest).await
}

/// `POST /auth/logout`
pub async fn logout<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
) -> Result<StatusMessage, ApiError> {
    client.send(&LogoutRequest {}).await
}
