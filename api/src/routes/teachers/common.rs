use db::models::teacher;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Default)]
pub struct TeacherResponse {
    pub teacher_id: i64,
    pub user_id: Option<i64>,
    pub teacher_name: String,
    pub teacher_code: Option<String>,
    pub email: String,
    pub rfid: String,
}

impl From<teacher::Model> for TeacherResponse {
    fn from(m: teacher::Model) -> Self {
        Self {
            teacher_id: m.teacher_id,
            user_id: m.user_id,
            teacher_name: m.teacher_name,
            teacher_code: m.teacher_code,
            email: m.email,
            rfid: m.rfid,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeacherRequest {
    #[validate(length(min = 1, message = "Teacher name is required"))]
    pub teacher_name: String,
    pub teacher_code: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "RFID is required"))]
    pub rfid: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeacherRequest {
    #[validate(length(min = 1, message = "Teacher name cannot be empty"))]
    pub teacher_name: Option<String>,
    pub teacher_code: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "RFID cannot be empty"))]
    pub rfid: Option<String>,
}
