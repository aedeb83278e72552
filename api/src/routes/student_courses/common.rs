use std::collections::HashMap;

use db::models::{course, student, student_course, teacher};
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};

use crate::routes::common::names_by_id;

#[derive(Debug, Serialize, Default)]
pub struct StudentCourseResponse {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub course_id: i64,
    pub course_name: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub classes_attended: String,
    pub attended_count: usize,
}

struct Names {
    students: HashMap<i64, String>,
    courses: HashMap<i64, String>,
    teachers: HashMap<i64, String>,
}

impl Names {
    fn get(map: &HashMap<i64, String>, id: i64) -> String {
        map.get(&id).cloned().unwrap_or_default()
    }
}

/// Decorates ledger entries with student, course and teacher names.
pub async fn with_names(
    db: &DatabaseConnection,
    rows: Vec<student_course::Model>,
) -> Result<Vec<StudentCourseResponse>, DbErr> {
    let names = Names {
        students: names_by_id::<student::Entity, _>(
            db,
            student::Column::StudentId,
            rows.iter().map(|r| r.student_id),
            |s| (s.student_id, s.student_name),
        )
        .await?,
        courses: names_by_id::<course::Entity, _>(
            db,
            course::Column::CourseId,
            rows.iter().map(|r| r.course_id),
            |c| (c.course_id, c.course_name),
        )
        .await?,
        teachers: names_by_id::<teacher::Entity, _>(
            db,
            teacher::Column::TeacherId,
            rows.iter().map(|r| r.teacher_id),
            |t| (t.teacher_id, t.teacher_name),
        )
        .await?,
    };

    Ok(rows
        .into_iter()
        .map(|r| StudentCourseResponse {
            id: r.id,
            student_id: r.student_id,
            student_name: Names::get(&names.students, r.student_id),
            course_id: r.course_id,
            course_name: Names::get(&names.courses, r.course_id),
            teacher_id: r.teacher_id,
            teacher_name: Names::get(&names.teachers, r.teacher_id),
            attended_count: r.attended_count(),
            classes_attended: r.classes_attended,
        })
        .collect())
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentCourseRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentCourseRequest {
    pub teacher_id: Option<i64>,
    /// Replaces the whole log; tokens are comma-separated.
    pub classes_attended: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct StudentCourseFilter {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
}
