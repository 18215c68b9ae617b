use crate::client::{ApiClient, CredentialSource};
use crate::error::ApiError;
use crate::request::HttpClient;
use coursereg_shared::protocol::{
    CourseEnrollmentsRequest, DropEnrollmentRequest, MyEnrollmentsRequest,
};
use coursereg_shared::{EnrollRequest, Enrollment, StatusMessage};

/// `GET /enrollments/my-enrollments`
pub async fn my_enrollments<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
) -> Result<Vec<Enrollment>, ApiError> {
    client.send(&MyEnrollmentsRequest).await
}

/// `POST /enrollments`
pub async fn enroll<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
    course_id: &str,
) -> Result<Enrollment, ApiError> {
    let req = EnrollRequest {
        course_id: course_id.to_string(),
    };
    client.send(&req).await
}

/// `DELETE /enrollments/{id}`
pub async fn drop_enrollment<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
    enrollment_id: &str,
) -> Result<StatusMessage, ApiError> {
    let req = DropEnrollmentRequest {
        id: enrollment_id.to_string(),
    };
    client.send(&req).await
}

/// `GET /enrollments/course/{id}`
pub async fn by_course<C: HttpClient, K: CredentialSource>(
    client: &ApiClient<C, K>,
    course_id: &str,
) -> Result<Vec<Enrollment>, ApiError> {
    let req = CourseEnrollmentsRequest {
        course_id: course_id.to_string(),
    };
    client.send(&req).await
}
