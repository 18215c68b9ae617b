//! 视图模型
//!
//! 页面组件共享的纯逻辑：搜索过滤、统计、按钮状态、确认提示和加载器。
//! 与 DOM 无关，可在本机测试。

use crate::api;
use crate::client::{ApiClient, CredentialSource};
use crate::error::ApiError;
use crate::request::HttpClient;
use coursereg_shared::{Course, CourseDraft, Enrollment, UserType};

/// 用户提示文案
pub mod messages {
    pub const LOAD_COURSES_FAILED: &str = "Failed to load courses";
    pub const LOAD_ENROLLMENTS_FAILED: &str = "Failed to load your courses";
    pub const ENROLL_CONFIRM: &str = "Are you sure you want to enroll in this course?";
    pub const ENROLL_SUCCESS: &str = "Enrolled successfully!";
    pub const ENROLL_FAILED: &str = "Failed to enroll";
    pub const DROP_SUCCESS: &str = "Course dropped successfully!";
    pub const DROP_FAILED: &str = "Failed to drop course";
    pub const CREATE_SUCCESS: &str = "Course created successfully!";
    pub const CREATE_FAILED: &str = "Failed to create course";
    pub const DELETE_SUCCESS: &str = "Course deleted successfully!";
    pub const DELETE_FAILED: &str = "Failed to delete course";
}

pub fn drop_prompt(course_name: &str) -> String {
    format!("Are you sure you want to drop \"{}\"?", course_name)
}

pub fn delete_prompt(course_name: &str) -> String {
    format!("Are you sure you want to delete \"{}\"?", course_name)
}

/// 按课程名、课程代码或院系做不区分大小写的子串匹配，空查询返回全部
pub fn filter_courses<'a>(courses: &'a [Course], query: &str) -> Vec<&'a Course> {
    let needle = query.trim().to_lowercase();
    courses
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.code.to_lowercase().contains(&needle)
                || c.department.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn is_enrolled_in(course_id: &str, enrollments: &[Enrollment]) -> bool {
    enrollments.iter().any(|e| e.course_id == course_id)
}

/// 课程已被删除的选课记录计 0 学分
pub fn total_credits(enrollments: &[Enrollment]) -> u32 {
    enrollments.iter().map(Enrollment::credits).sum()
}

pub fn status_label(enrollment: &Enrollment) -> String {
    if enrollment.is_enrolled() {
        "✅ Enrolled".to_string()
    } else {
        enrollment.status.clone()
    }
}

/// 课程卡片上选课按钮的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollAction {
    Enrolled,
    Enrolling,
    Full,
    Available,
}

impl EnrollAction {
    pub fn resolve(course: &Course, enrollments: &[Enrollment], pending: Option<&str>) -> Self {
        if is_enrolled_in(&course.id, enrollments) {
            Self::Enrolled
        } else if pending == Some(course.id.as_str()) {
            Self::Enrolling
        } else if course.is_full() {
            Self::Full
        } else {
            Self::Available
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Enrolled => "✅ Enrolled",
            Self::Enrolling => "Enrolling...",
            Self::Full => "Full",
            Self::Available => "Enroll",
        }
    }

    pub fn is_clickable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_courses: usize,
    pub my_enrollments: usize,
    pub total_credits: u32,
}

impl DashboardStats {
    pub fn new(courses: &[Course], enrollments: &[Enrollment]) -> Self {
        Self {
            total_courses: courses.len(),
            my_enrollments: enrollments.len(),
            total_credits: total_credits(enrollments),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminStats {
    pub total_courses: usize,
    pub total_enrollments: u32,
}

impl AdminStats {
    pub fn new(courses: &[Course]) -> Self {
        Self {
            total_courses: courses.len(),
            total_enrollments: courses.iter().map(|c| c.enrolled_count).sum(),
        }
    }
}

/// 课程表单校验，与表单控件的 required / min / max 一致
pub fn validate_draft(draft: &CourseDraft) -> Result<(), String> {
    let required = [
        ("Course Code", &draft.course_code),
        ("Course Name", &draft.course_name),
        ("Department", &draft.department),
        ("Semester", &draft.semester),
    ];
    if let Some((label, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(format!("{} is required", label));
    }
    if !(1..=6).contains(&draft.credits) {
        return Err("Credits must be between 1 and 6".to_string());
    }
    if draft.max_students < 1 {
        return Err("Max Students must be at least 1".to_string());
    }
    Ok(())
}

/// 标记提交开始；已有请求在途时返回 `false`，调用方应放弃本次提交
pub fn begin_submit(in_flight: &mut bool) -> bool {
    !std::mem::replace(in_flight, true)
}

/// 课程目录：全部课程加上当前学生的选课记录
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CourseCatalog {
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
}

impl CourseCatalog {
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::new(&self.courses, &self.enrollments)
    }
}

/// 并发获取课程列表和选课记录，任一失败则整体失败
///
/// 只有学生才请求 `my-enrollments`，其他身份得到空列表。
pub async fn load_catalog<C, K>(
    client: &ApiClient<C, K>,
    user_type: Option<UserType>,
) -> Result<CourseCatalog, ApiError>
where
    C: HttpClient,
    K: CredentialSource,
{
    let is_student = user_type.is_some_and(|t| t.is_student());
    let enrollments = async {
        if is_student {
            api::enrollments::my_enrollments(client).await
        } else {
            Ok(Vec::new())
        }
    };

    let (courses, enrollments) =
        futures::future::try_join(api::courses::list(client, None), enrollments).await?;
    Ok(CourseCatalog {
        courses,
        enrollments,
    })
}

/// 加载失败时记录日志并返回空结果
pub fn or_empty<T: Default>(result: Result<T, ApiError>, context: &str) -> T {
    result.unwrap_or_else(|e| {
        log_error!("[View] {}: {}", context, e);
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpMethod, MockHttpClient};
    use serde_json::json;

    const BASE: &str = "http://api.test/api";

    fn course(id: &str, code: &str, name: &str, dept: &str, enrolled: u32, max: u32) -> Course {
        Course {
            id: id.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            department: dept.to_string(),
            credits: 3,
            description: String::new(),
            semester: "Fall 2025".to_string(),
            max_students: max,
            enrolled_count: enrolled,
        }
    }

    fn enrollment(id: &str, course: Option<Course>) -> Enrollment {
        Enrollment {
            id: id.to_string(),
            course_id: course.as_ref().map(|c| c.id.clone()).unwrap_or_default(),
            course,
            semester: "Fall 2025".to_string(),
            status: "enrolled".to_string(),
            enrollment_date: "2025-09-01".to_string(),
            grade: None,
            student: None,
        }
    }

    fn catalog_fixture() -> Vec<Course> {
        vec![
            course("c-1", "CS101", "Intro to Programming", "Computer Science", 10, 30),
            course("c-2", "MA201", "Linear Algebra", "Mathematics", 30, 30),
            course("c-3", "PH110", "Physics I", "Physics", 0, 25),
        ]
    }

    #[test]
    fn test_filter_matches_name_code_or_department() {
        let courses = catalog_fixture();
        assert_eq!(filter_courses(&courses, "").len(), 3);
        assert_eq!(filter_courses(&courses, "cs1")[0].id, "c-1");
        assert_eq!(filter_courses(&courses, "ALGEBRA")[0].id, "c-2");
        assert_eq!(filter_courses(&courses, "physics").len(), 1);
        assert!(filter_courses(&courses, "chemistry").is_empty());
    }

    #[test]
    fn test_enroll_action_states() {
        let courses = catalog_fixture();
        let enrollments = vec![enrollment("e-1", Some(courses[0].clone()))];

        assert_eq!(
            EnrollAction::resolve(&courses[0], &enrollments, None),
            EnrollAction::Enrolled
        );
        assert_eq!(
            EnrollAction::resolve(&courses[1], &enrollments, None),
            EnrollAction::Full
        );
        assert_eq!(
            EnrollAction::resolve(&courses[2], &enrollments, Some("c-3")),
            EnrollAction::Enrolling
        );
        let available = EnrollAction::resolve(&courses[2], &enrollments, None);
        assert!(available.is_clickable());
        assert_eq!(available.label(), "Enroll");
    }

    #[test]
    fn test_stats() {
        let courses = catalog_fixture();
        let enrollments = vec![
            enrollment("e-1", Some(courses[0].clone())),
            enrollment("e-2", None),
        ];

        let stats = DashboardStats::new(&courses, &enrollments);
        assert_eq!(stats.total_courses, 3);
        assert_eq!(stats.my_enrollments, 2);
        assert_eq!(stats.total_credits, 3);

        let admin = AdminStats::new(&courses);
        assert_eq!(admin.total_courses, 3);
        assert_eq!(admin.total_enrollments, 40);
    }

    #[test]
    fn test_validate_draft() {
        let mut draft = CourseDraft {
            course_code: "CS101".to_string(),
            course_name: "Intro".to_string(),
            department: "CS".to_string(),
            ..CourseDraft::default()
        };
        assert!(validate_draft(&draft).is_ok());

        draft.credits = 7;
        assert!(validate_draft(&draft).unwrap_err().contains("Credits"));

        draft.credits = 3;
        draft.department = "  ".to_string();
        assert_eq!(validate_draft(&draft).unwrap_err(), "Department is required");

        assert_eq!(
            validate_draft(&CourseDraft::default()).unwrap_err(),
            "Course Code is required"
        );
    }

    #[test]
    fn test_second_submit_is_refused_while_in_flight() {
        let mut creating = false;
        assert!(begin_submit(&mut creating));
        assert!(creating);
        assert!(!begin_submit(&mut creating));

        creating = false;
        assert!(begin_submit(&mut creating));
    }

    #[test]
    fn test_prompts_quote_course_name() {
        assert_eq!(
            drop_prompt("Physics I"),
            "Are you sure you want to drop \"Physics I\"?"
        );
        assert!(delete_prompt("Physics I").contains("delete"));
    }

    fn mock_catalog(client: &ApiClient<MockHttpClient, Option<String>>) {
        client.http().mock_response(
            HttpMethod::Get,
            &format!("{}/courses", BASE),
            200,
            json!([
                { "course_id": "c-1", "course_code": "CS101", "course_name": "Intro", "credits": 4, "max_students": 30, "enrolled_count": 3 },
                { "course_id": "c-2", "course_code": "MA201", "course_name": "Algebra", "credits": 3, "max_students": 1, "enrolled_count": 1 }
            ]),
        );
        client.http().mock_response(
            HttpMethod::Get,
            &format!("{}/enrollments/my-enrollments", BASE),
            200,
            json!([
                {
                    "enrollment_id": "e-1",
                    "course_id": "c-1",
                    "course": { "course_id": "c-1", "course_code": "CS101", "course_name": "Intro", "credits": 4 },
                    "semester": "Fall 2025",
                    "status": "enrolled",
                    "enrollment_date": "2025-09-01T10:00:00"
                }
            ]),
        );
    }

    fn client() -> ApiClient<MockHttpClient, Option<String>> {
        ApiClient::new(MockHttpClient::new(), BASE, Some("tok".to_string()))
    }

    #[tokio::test]
    async fn test_student_catalog_loads_both_lists() {
        let client = client();
        mock_catalog(&client);

        let catalog = load_catalog(&client, Some(UserType::Student)).await.unwrap();
        assert_eq!(catalog.courses.len(), 2);
        assert_eq!(catalog.enrollments.len(), 1);
        assert_eq!(client.http().request_count(), 2);

        let stats = catalog.stats();
        assert_eq!(stats.my_enrollments, 1);
        assert_eq!(stats.total_credits, 4);
    }

    #[tokio::test]
    async fn test_non_student_catalog_skips_enrollments() {
        let client = client();
        mock_catalog(&client);

        let catalog = load_catalog(&client, Some(UserType::Admin)).await.unwrap();
        assert_eq!(catalog.courses.len(), 2);
        assert!(catalog.enrollments.is_empty());
        assert_eq!(client.http().request_count(), 1);
        assert!(client.http().last_request().unwrap().url.ends_with("/courses"));
    }

    #[tokio::test]
    async fn test_catalog_fails_as_one_unit() {
        let client = client();
        client.http().mock_response(
            HttpMethod::Get,
            &format!("{}/courses", BASE),
            200,
            json!([]),
        );
        client.http().mock_response(
            HttpMethod::Get,
            &format!("{}/enrollments/my-enrollments", BASE),
            500,
            json!({ "detail": "boom" }),
        );

        let result = load_catalog(&client, Some(UserType::Student)).await;
        assert_eq!(result.as_ref().unwrap_err().status(), Some(500));
        assert_eq!(or_empty(result, "load catalog"), CourseCatalog::default());
    }

    #[tokio::test]
    async fn test_full_course_enroll_shows_server_detail_and_keeps_list() {
        let client = client();
        mock_catalog(&client);
        client.http().mock_response(
            HttpMethod::Post,
            &format!("{}/enrollments", BASE),
            400,
            json!({ "detail": "Course is full" }),
        );

        let catalog = load_catalog(&client, Some(UserType::Student)).await.unwrap();
        let full = &catalog.courses[1];
        assert_eq!(
            EnrollAction::resolve(full, &catalog.enrollments, None),
            EnrollAction::Full
        );

        let before = catalog.clone();
        let err = api::enrollments::enroll(&client, &full.id).await.unwrap_err();
        assert_eq!(err.detail_or(messages::ENROLL_FAILED), "Course is full");
        assert_eq!(catalog, before);
        assert!(!is_enrolled_in("c-2", &catalog.enrollments));
    }
}
