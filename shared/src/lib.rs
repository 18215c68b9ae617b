use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

pub mod date;
pub mod protocol;

pub use chrono;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";
pub const STATUS_ENROLLED: &str = "enrolled";

/// 管理员创建课程时表单的默认学期
pub const DEFAULT_SEMESTER: &str = "Fall 2025";
pub const DEFAULT_CREDITS: u32 = 3;
pub const DEFAULT_MAX_STUDENTS: u32 = 30;

/// 服务端偶尔返回 `null` 的字段按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_true() -> bool {
    true
}

// =========================================================
// 用户 (Users)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[default]
    Student,
    Teacher,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Student => "student",
            UserType::Teacher => "teacher",
            UserType::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserType::Admin)
    }

    pub fn is_student(&self) -> bool {
        matches!(self, UserType::Student)
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET /auth/me` 返回的用户资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "user_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_type: UserType,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl UserProfile {
    /// 登录过程中的临时资料：只有用户名，其余字段等待 `/auth/me` 补全
    pub fn provisional(username: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            username: username.into(),
            full_name: String::new(),
            email: String::new(),
            user_type: UserType::default(),
            is_active: true,
        }
    }

    /// 头像首字母（大写），没有全名时退回用户名
    pub fn initial(&self) -> Option<char> {
        let source = if self.full_name.is_empty() {
            &self.username
        } else {
            &self.full_name
        };
        source.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

// =========================================================
// 课程 (Courses)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "course_id")]
    pub id: String,
    #[serde(rename = "course_code", default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(rename = "course_name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub semester: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_students: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enrolled_count: u32,
}

impl Course {
    /// 容量已满：选课按钮禁用，服务端同样会拒绝
    pub fn is_full(&self) -> bool {
        self.enrolled_count >= self.max_students
    }

    pub fn available_seats(&self) -> u32 {
        self.max_students.saturating_sub(self.enrolled_count)
    }

    /// 形如 `12 / 30`
    pub fn seats_label(&self) -> String {
        format!("{} / {}", self.enrolled_count, self.max_students)
    }
}

/// 创建 / 更新课程的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub credits: u32,
    pub description: String,
    pub semester: String,
    pub max_students: u32,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            course_code: String::new(),
            course_name: String::new(),
            department: String::new(),
            credits: DEFAULT_CREDITS,
            description: String::new(),
            semester: DEFAULT_SEMESTER.to_string(),
            max_students: DEFAULT_MAX_STUDENTS,
        }
    }
}

impl From<&Course> for CourseDraft {
    fn from(course: &Course) -> Self {
        Self {
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            department: course.department.clone(),
            credits: course.credits,
            description: course.description.clone(),
            semester: course.semester.clone(),
            max_students: course.max_students,
        }
    }
}

// =========================================================
// 选课记录 (Enrollments)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "enrollment_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_id: String,
    /// 课程被删除后服务端返回 `null`
    #[serde(default)]
    pub course: Option<Course>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub semester: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enrollment_date: String,
    #[serde(default)]
    pub grade: Option<String>,
    /// 仅 `GET /enrollments/course/{id}` 返回
    #[serde(default)]
    pub student: Option<UserProfile>,
}

impl Enrollment {
    pub fn credits(&self) -> u32 {
        self.course.as_ref().map_or(0, |c| c.credits)
    }

    pub fn is_enrolled(&self) -> bool {
        self.status == STATUS_ENROLLED
    }

    /// 课程名，课程缺失时为空串
    pub fn course_name(&self) -> &str {
        self.course.as_ref().map_or("", |c| c.name.as_str())
    }
}

// =========================================================
// 认证与通用响应 (Auth & Misc)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub course_id: String,
}

/// 删除类接口的确认消息，如 `{"message": "Course dropped successfully"}`
///
/// 204 空响应（解析为 `null`）视为空消息
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<MessageBody>")]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: String,
}

impl From<Option<MessageBody>> for StatusMessage {
    fn from(body: Option<MessageBody>) -> Self {
        Self {
            message: body.map(|b| b.message).unwrap_or_default(),
        }
    }
}
