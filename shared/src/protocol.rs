use crate::{
    Course, CourseDraft, EnrollRequest, Enrollment, LoginRequest, StatusMessage, TokenResponse,
    UserProfile,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use urlencoding::encode;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the serialized request travels as a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Path parameters are `#[serde(skip)]` fields so that only the body fields are serialized.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base URL.
    fn path(&self) -> String;
    /// Query parameters, unencoded.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = TokenResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

/// Fetch the profile behind the current credential
#[derive(Debug, Serialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/auth/me".to_string()
    }
}

/// Server-side logout; the server only acknowledges it
#[derive(Debug, Serialize)]
pub struct LogoutRequest {}

impl ApiRequest for LogoutRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/logout".to_string()
    }
}

// =========================================================
// Courses
// =========================================================

#[derive(Debug, Default, Serialize)]
pub struct ListCoursesRequest {
    #[serde(skip)]
    pub semester: Option<String>,
}

impl ApiRequest for ListCoursesRequest {
    type Response = Vec<Course>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/courses".to_string()
    }
    fn query(&self) -> Vec<(&'static str, String)> {
        self.semester
            .iter()
            .map(|s| ("semester", s.clone()))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct GetCourseRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for GetCourseRequest {
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/courses/{}", encode(&self.id))
    }
}

/// Create a course (admin only). The draft itself is the request body.
impl ApiRequest for CourseDraft {
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/courses".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateCourseRequest {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub draft: CourseDraft,
}

impl ApiRequest for UpdateCourseRequest {
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/courses/{}", encode(&self.id))
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteCourseRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteCourseRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/courses/{}", encode(&self.id))
    }
}

// =========================================================
// Enrollments
// =========================================================

#[derive(Debug, Serialize)]
pub struct MyEnrollmentsRequest;

impl ApiRequest for MyEnrollmentsRequest {
    type Response = Vec<Enrollment>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/enrollments/my-enrollments".to_string()
    }
}

impl ApiRequest for EnrollRequest {
    type Response = Enrollment;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/enrollments".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct DropEnrollmentRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DropEnrollmentRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/enrollments/{}", encode(&self.id))
    }
}

/// All enrollments of one course (admin / teacher only)
#[derive(Debug, Serialize)]
pub struct CourseEnrollmentsRequest {
    #[serde(skip)]
    pub course_id: String,
}

impl ApiRequest for CourseEnrollmentsRequest {
    type Response = Vec<Enrollment>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/enrollments/course/{}", encode(&self.course_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_ids_are_encoded() {
        let get = GetCourseRequest {
            id: "a/b c".to_string(),
        };
        assert_eq!(get.path(), "/courses/a%2Fb%20c");

        let drop = DropEnrollmentRequest {
            id: "e?1".to_string(),
        };
        assert_eq!(drop.path(), "/enrollments/e%3F1");

        let by_course = CourseEnrollmentsRequest {
            course_id: "c#1".to_string(),
        };
        assert_eq!(by_course.path(), "/enrollments/course/c%231");
    }

    #[test]
    fn test_plain_ids_are_unchanged() {
        let delete = DeleteCourseRequest {
            id: "6f1c-42".to_string(),
        };
        assert_eq!(delete.path(), "/courses/6f1c-42");
    }
}
