use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::student;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};
use util::state::AppState;
use validator::Validate;

use super::common::StudentResponse;
use crate::routes::common::{
    ListQuery, Page, apply_sort, db_error, fail, ok, paginate, validation_error,
};

fn sort_column(field: &str) -> Option<student::Column> {
    match field {
        "student_id" | "id" => Some(student::Column::StudentId),
        "student_name" | "name" => Some(student::Column::StudentName),
        "roll_number" => Some(student::Column::RollNumber),
        "email" => Some(student::Column::Email),
        "year" => Some(student::Column::Year),
        "dept" => Some(student::Column::Dept),
        "section" => Some(student::Column::Section),
        "overall_attendance" => Some(student::Column::OverallAttendance),
        _ => None,
    }
}

/// GET /api/students
///
/// **Query**: `q` matches name, roll number, email or RFID; `sort` accepts
/// `student_name`, `roll_number`, `email`, `year`, `dept`, `section`,
/// `overall_attendance` (prefix `-` for descending).
pub async fn list_students(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> impl IntoResponse {
    if let Err(e) = q.validate() {
        return validation_error::<Page<StudentResponse>>(&e);
    }

    let mut select = student::Entity::find();
    if let Some(term) = q.search() {
        select = select.filter(
            Condition::any()
                .add(student::Column::StudentName.contains(&term))
                .add(student::Column::RollNumber.contains(&term))
                .add(student::Column::Email.contains(&term))
                .add(student::Column::Rfid.contains(&term)),
        );
    }
    let select = apply_sort(
        select,
        q.sort.as_deref(),
        student::Column::StudentId,
        sort_column,
    );

    match paginate(state.db(), select, &q, StudentResponse::from).await {
        Ok(page) => ok(StatusCode::OK, page, "Students retrieved successfully"),
        Err(e) => db_error(e),
    }
}

/// GET /api/students/{student_id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> impl IntoResponse {
    match student::Entity::find_by_id(student_id).one(state.db()).await {
        Ok(Some(s)) => ok(
            StatusCode::OK,
            StudentResponse::from(s),
            "Student retrieved successfully",
        ),
        Ok(None) => fail(StatusCode::NOT_FOUND, "Student not found"),
        Err(e) => db_error(e),
    }
}
