use std::collections::HashMap;

use db::models::{course, taught_course, teacher};
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::routes::common::names_by_id;

#[derive(Debug, Serialize, Default)]
pub struct TaughtCourseResponse {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub classes_taken: i32,
    pub section: String,
    pub year: i32,
}

/// Decorates assignments with course and teacher names.
pub async fn with_names(
    db: &DatabaseConnection,
    rows: Vec<taught_course::Model>,
) -> Result<Vec<TaughtCourseResponse>, DbErr> {
    let courses = names_by_id::<course::Entity, _>(
        db,
        course::Column::CourseId,
        rows.iter().map(|r| r.course_id),
        |c| (c.course_id, c.course_name),
    )
    .await?;
    let teachers = names_by_id::<teacher::Entity, _>(
        db,
        teacher::Column::TeacherId,
        rows.iter().map(|r| r.teacher_id),
        |t| (t.teacher_id, t.teacher_name),
    )
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| response(r, &courses, &teachers))
        .collect())
}

fn response(
    r: taught_course::Model,
    courses: &HashMap<i64, String>,
    teachers: &HashMap<i64, String>,
) -> TaughtCourseResponse {
    TaughtCourseResponse {
        id: r.id,
        course_id: r.course_id,
        course_name: courses.get(&r.course_id).cloned().unwrap_or_default(),
        teacher_id: r.teacher_id,
        teacher_name: teachers.get(&r.teacher_id).cloned().unwrap_or_default(),
        classes_taken: r.classes_taken,
        section: r.section,
        year: r.year,
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaughtCourseRequest {
    pub course_id: i64,
    pub teacher_id: i64,
    #[validate(length(min = 1, message = "Section is required"))]
    pub section: String,
    #[validate(range(min = 1, message = "Year must be positive"))]
    pub year: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaughtCourseRequest {
    pub teacher_id: Option<i64>,
    #[validate(range(min = 0, message = "classes_taken cannot be negative"))]
    pub classes_taken: Option<i32>,
    #[validate(length(min = 1, message = "Section cannot be empty"))]
    pub section: Option<String>,
    #[validate(range(min = 1, message = "Year must be positive"))]
    pub year: Option<i32>,
}

/// Extra filters accepted by `GET /taught-courses`.
#[derive(Debug, Deserialize, Default)]
pub struct TaughtCourseFilter {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub year: Option<i32>,
    pub section: Option<String>,
    pub sort: Option<String>,
}
