use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::taught_course;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use util::state::AppState;
use validator::Validate;

use super::common::{TaughtCourseFilter, TaughtCourseResponse, with_names};
use crate::routes::common::{
    ListQuery, Page, apply_sort, db_error, fail, ok, paginate, validation_error,
};

/// GET /api/taught-courses
///
/// **Query**: `course_id`, `teacher_id`, `year`, `section` filters plus the
/// usual `page`, `per_page` and `sort` (`year`, `section`, `classes_taken`).
pub async fn list_taught_courses(
    State(state): State<AppState>,
    Query(f): Query<TaughtCourseFilter>,
) -> impl IntoResponse {
    let paging = ListQuery {
        page: f.page,
        per_page: f.per_page,
        q: None,
        sort: f.sort.clone(),
    };
    if let Err(e) = paging.validate() {
        return validation_error::<Page<TaughtCourseResponse>>(&e);
    }

    let mut select = taught_course::Entity::find();
    if let Some(course_id) = f.course_id {
        select = select.filter(taught_course::Column::CourseId.eq(course_id));
    }
    if let Some(teacher_id) = f.teacher_id {
        select = select.filter(taught_course::Column::TeacherId.eq(teacher_id));
    }
    if let Some(year) = f.year {
        select = select.filter(taught_course::Column::Year.eq(year));
    }
    if let Some(section) = f.section.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(taught_course::Column::Section.eq(section));
    }
    let select = apply_sort(select, paging.sort.as_deref(), taught_course::Column::Id, |c| {
        match c {
            "id" => Some(taught_course::Column::Id),
            "year" => Some(taught_course::Column::Year),
            "section" => Some(taught_course::Column::Section),
            "classes_taken" => Some(taught_course::Column::ClassesTaken),
            _ => None,
        }
    });

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
            "Taught courses retrieved successfully",
        ),
        Err(e) => db_error(e),
    }
}

/// GET /api/taught-courses/{id}
pub async fn get_taught_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let db = state.db();
    let row = match taught_course::Entity::find_by_id(id).one(db).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            return fail::<TaughtCourseResponse>(StatusCode::NOT_FOUND, "Taught course not found");
        }
        Err(e) => return db_error(e),
    };

    match with_names(db, vec![row]).await {
        Ok(mut items) => match items.pop() {
            Some(item) => ok(StatusCode::OK, item, "Taught course retrieved successfully"),
            None => fail(StatusCode::NOT_FOUND, "Taught course not found"),
        },
        Err(e) => db_error(e),
    }
}
