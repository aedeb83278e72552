use db::models::student;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Default)]
pub struct StudentResponse {
    pub student_id: i64,
    pub user_id: Option<i64>,
    pub student_name: String,
    pub roll_number: Option<String>,
    pub email: String,
    pub rfid: String,
    pub overall_attendance: f64,
    pub year: i32,
    pub dept: String,
    pub section: String,
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        Self {
            student_id: m.student_id,
            user_id: m.user_id,
            student_name: m.student_name,
            roll_number: m.roll_number,
            email: m.email,
            rfid: m.rfid,
            overall_attendance: m.overall_attendance,
            year: m.year,
            dept: m.dept,
            section: m.section,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, message = "Student name is required"))]
    pub student_name: String,
    pub roll_number: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "RFID is required"))]
    pub rfid: String,
    #[validate(range(min = 1, message = "Year must be positive"))]
    pub year: i32,
    #[validate(length(min = 1, message = "Department is required"))]
    pub dept: String,
    #[validate(length(min = 1, message = "Section is required"))]
    pub section: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, message = "Student name cannot be empty"))]
    pub student_name: Option<String>,
    pub roll_number: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "RFID cannot be empty"))]
    pub rfid: Option<String>,
    #[validate(range(min = 1, message = "Year must be positive"))]
    pub year: Option<i32>,
    #[validate(length(min = 1, message = "Department cannot be empty"))]
    pub dept: Option<String>,
    #[validate(length(min = 1, message = "Section cannot be empty"))]
    pub section: Option<String>,
}

impl UpdateStudentRequest {
    pub fn is_empty(&self) -> bool {
        self.student_name.is_none()
            && self.roll_number.is_none()
            && self.email.is_none()
            && self.rfid.is_none()
            && self.year.is_none()
            && self.dept.is_none()
            && self.section.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_id: i64,
}

#[derive(Debug, Serialize, Default)]
pub struct BulkUpdateResponse {
    pub updated: u64,
}
