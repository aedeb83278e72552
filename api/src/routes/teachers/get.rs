use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::teacher;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};
use util::state::AppState;
use validator::Validate;

use super::common::TeacherResponse;
use crate::routes::common::{
    ListQuery, Page, apply_sort, db_error, fail, ok, paginate, validation_error,
};

/// GET /api/teachers
///
/// `q` matches name, code or email. Sortable by `teacher_name`,
/// `teacher_code`, `email`.
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> impl IntoResponse {
    if let Err(e) = q.validate() {
        return validation_error::<Page<TeacherResponse>>(&e);
    }

    let mut select = teacher::Entity::find();
    if let Some(term) = q.search() {
        select = select.filter(
            Condition::any()
                .add(teacher::Column::TeacherName.contains(&term))
                .add(teacher::Column::TeacherCode.contains(&term))
                .add(teacher::Column::Email.contains(&term)),
        );
    }
    let select = apply_sort(select, q.sort.as_deref(), teacher::Column::TeacherId, |f| {
        match f {
            "teacher_id" | "id" => Some(teacher::Column::TeacherId),
            "teacher_name" | "name" => Some(teacher::Column::TeacherName),
            "teacher_code" => Some(teacher::Column::TeacherCode),
            "email" => Some(teacher::Column::Email),
            _ => None,
        }
    });

    match paginate(state.db(), select, &q, TeacherResponse::from).await {
        Ok(page) => ok(StatusCode::OK, page, "Teachers retrieved successfully"),
        Err(e) => db_error(e),
    }
}

/// GET /api/teachers/{teacher_id}
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
) -> impl IntoResponse {
    match teacher::Entity::find_by_id(teacher_id).one(state.db()).await {
        Ok(Some(t)) => ok(
            StatusCode::OK,
            TeacherResponse::from(t),
            "Teacher retrieved successfully",
        ),
        Ok(None) => fail(StatusCode::NOT_FOUND, "Teacher not found"),
        Err(e) => db_error(e),
    }
}
