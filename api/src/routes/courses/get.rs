use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};
use util::state::AppState;
use validator::Validate;

use super::common::CourseResponse;
use crate::routes::common::{
    ListQuery, Page, apply_sort, db_error, fail, ok, paginate, validation_error,
};

/// GET /api/courses
///
/// Any authenticated user. `q` matches name or code; sortable by
/// `course_name` and `course_code`.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> impl IntoResponse {
    if let Err(e) = q.validate() {
        return validation_error::<Page<CourseResponse>>(&e);
    }

    let mut select = course::Entity::find();
    if let Some(term) = q.search() {
        select = select.filter(
            Condition::any()
                .add(course::Column::CourseName.contains(&term))
                .add(course::Column::CourseCode.contains(&term)),
        );
    }
    let select = apply_sort(select, q.sort.as_deref(), course::Column::CourseCode, |f| {
        match f {
            "course_id" | "id" => Some(course::Column::CourseId),
            "course_name" | "name" => Some(course::Column::CourseName),
            "course_code" | "code" => Some(course::Column::CourseCode),
            _ => None,
        }
    });

    match paginate(state.db(), select, &q, CourseResponse::from).await {
        Ok(page) => ok(StatusCode::OK, page, "Courses retrieved successfully"),
        Err(e) => db_error(e),
    }
}

/// GET /api/courses/{course_id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    match course::Entity::find_by_id(course_id).one(state.db()).await {
        Ok(Some(c)) => ok(
            StatusCode::OK,
            CourseResponse::from(c),
            "Course retrieved successfully",
        ),
        Ok(None) => fail(StatusCode::NOT_FOUND, "Course not found"),
        Err(e) => db_error(e),
    }
}
