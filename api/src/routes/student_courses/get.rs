use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::student_course;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use util::state::AppState;
use validator::Validate;

use super::common::{StudentCourseFilter, StudentCourseResponse, with_names};
use crate::routes::common::{ListQuery, Page, db_error, fail, ok, paginate, validation_error};

/// GET /api/student-courses
///
/// Filterable by `student_id`, `course_id` and `teacher_id`.
pub async fn list_student_courses(
    State(state): State<AppState>,
    Query(f): Query<StudentCourseFilter>,
) -> impl IntoResponse {
    let paging = ListQuery {
        page: f.page,
        per_page: f.per_page,
        ..Default::default()
    };
    if let Err(e) = paging.validate() {
        return validation_error::<Page<StudentCourseResponse>>(&e);
    }

    let mut select = student_course::Entity::find().order_by_asc(student_course::Column::Id);
    if let Some(id) = f.student_id {
        select = select.filter(student_course::Column::StudentId.eq(id));
    }
    if let Some(id) = f.course_id {
        select = select.filter(student_course::Column::CourseId.eq(id));
    }
    if let Some(id) = f.teacher_id {
        select = select.filter(student_course::Column::TeacherId.eq(id));
    }

    let db = state.db();
    let page = match paginate(db, select, &paging, |m| m).await {
        Ok(p) => p,
        Err(e) => return db_error(e),
    };
    match with_names(db, page.items).await {
        Ok(items) => ok(
            StatusCode::OK,
            Page {
                items,
                page: page.page,
                per_page: page.per_page,
                total: page.total,
            },
            "Enrollments retrieved successfully",
        ),
        Err(e) => db_error(e),
    }
}

/// GET /api/student-courses/{id}
pub async fn get_student_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let db = state.db();
    let row = match student_course::Entity::find_by_id(id).one(db).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            return fail::<StudentCourseResponse>(StatusCode::NOT_FOUND, "Enrollment not found");
        }
        Err(e) => return db_error(e),
    };

    match with_names(db, vec![row]).await {
        Ok(mut items) => match items.pop() {
            Some(item) => ok(StatusCode::OK, item, "Enrollment retrieved successfully"),
            None => fail(StatusCode::NOT_FOUND, "Enrollment not found"),
        },
        Err(e) => db_error(e),
    }
}
