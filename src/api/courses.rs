use crate::client::{ApiClient, CredentialSource};
use crate::error::ApiError;
use crate::request::HttpClient;
use coursereg_shared::protocol::{
    DeleteCourseRequest, GetCourseRequest, ListCoursesRequest, UpdateCourseRequest,
};
use coursereg_shared::{Course, CourseDraft, StatusMessage};

/// `GET /courses`，可按学期过滤
pub async fn list<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
    semester: Option<&str>,
) -> Result<Vec<Course>, ApiError> {
    let req = ListCoursesRequest {
        semester: semester.map(str::to_string),
    };
    client.send(&req).await
}

/// `GET /courses/{id}`
pub async fn get<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
    id: &str,
) -> Result<Course, ApiError> {
    client.send(&GetCourseRequest { id: id.to_string() }).await
}

/// `POST /courses`
pub async fn create<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
    draft: &CourseDraft,
) -> Result<Course, ApiError> {
    client.send(draft).await
}

/// `PUT /courses/{id}`
pub async fn update<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
    id: &str,
    draft: CourseDraft,
) -> Result<Course, ApiError> {
    let req = UpdateCourseRequest {
        id: id.to_string(),
        draft,
    };
    client.send(&req).await
}

/// `DELETE /courses/{id}`
pub async fn delete<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
    id: &str,
) -> Result<StatusMessage, ApiError> {
    client.send(&DeleteCourseRequest { id: id.to_string() }).await
}
