use db::models::course;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Default)]
pub struct CourseResponse {
    pub course_id: i64,
    pub course_name: String,
    pub course_code: String,
}

impl From<course::Model> for CourseResponse {
    fn from(m: course::Model) -> Self {
        Self {
            course_id: m.course_id,
            course_name: m.course_name,
            course_code: m.course_code,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Course name is required"))]
    pub course_name: String,
    #[validate(length(min = 1, max = 20, message = "Course code must be 1-20 characters"))]
    pub course_code: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "Course name cannot be empty"))]
    pub course_name: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Course code must be 1-20 characters"))]
    pub course_code: Option<String>,
}
