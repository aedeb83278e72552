//! `/api/classes`: classrooms and the scanner installed in each.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post, put},
};
use db::models::classroom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::guards::{allow_management, allow_staff};
use crate::response::Empty;
use crate::routes::common::{
    ListQuery, Page, apply_sort, db_error, fail, ok, paginate, validation_error,
};

/// - `GET /classes`, `GET /classes/{classroom_id}` (staff)
/// - `POST /classes`, `PUT|DELETE /classes/{classroom_id}` (management)
pub fn classes_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes).route_layer(from_fn(allow_staff)))
        .route(
            "/",
            post(create_class).route_layer(from_fn(allow_management)),
        )
        .route(
            "/{classroom_id}",
            get(get_class).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/{classroom_id}",
            put(update_class)
                .delete(delete_class)
                .route_layer(from_fn(allow_management)),
        )
}

#[derive(Debug, Serialize, Default)]
pub struct ClassroomResponse {
    pub classroom_id: i64,
    pub scanner_id: String,
}

impl From<classroom::Model> for ClassroomResponse {
    fn from(m: classroom::Model) -> Self {
        Self {
            classroom_id: m.classroom_id,
            scanner_id: m.scanner_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ClassroomRequest {
    #[validate(length(min = 1, message = "Scanner id is required"))]
    pub scanner_id: String,
}

/// GET /api/classes
pub async fn list_classes(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> impl IntoResponse {
    if let Err(e) = q.validate() {
        return validation_error::<Page<ClassroomResponse>>(&e);
    }

    let mut select = classroom::Entity::find();
    if let Some(term) = q.search() {
        select = select.filter(classroom::Column::ScannerId.contains(&term));
    }
    let select = apply_sort(select, q.sort.as_deref(), classroom::Column::ClassroomId, |f| {
        match f {
            "classroom_id" | "id" => Some(classroom::Column::ClassroomId),
            "scanner_id" => Some(classroom::Column::ScannerId),
            _ => None,
        }
    });

    match paginate(state.db(), select, &q, ClassroomResponse::from).await {
        Ok(page) => ok(StatusCode::OK, page, "Classrooms retrieved successfully"),
        Err(e) => db_error(e),
    }
}

/// GET /api/classes/{classroom_id}
pub async fn get_class(
    State(state): State<AppState>,
    Path(classroom_id): Path<i64>,
) -> impl IntoResponse {
    match classroom::Entity::find_by_id(classroom_id).one(state.db()).await {
        Ok(Some(c)) => ok(
            StatusCode::OK,
            ClassroomResponse::from(c),
            "Classroom retrieved successfully",
        ),
        Ok(None) => fail(StatusCode::NOT_FOUND, "Classroom not found"),
        Err(e) => db_error(e),
    }
}

/// POST /api/classes
pub async fn create_class(
    State(state): State<AppState>,
    Json(req): Json<ClassroomRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<ClassroomResponse>(&e);
    }

    let created = classroom::ActiveModel {
        scanner_id: Set(req.scanner_id.trim().to_owned()),
        ..Default::default()
    }
    .insert(state.db())
    .await;

    match created {
        Ok(c) => ok(
            StatusCode::CREATED,
            ClassroomResponse::from(c),
            "Classroom created successfully",
        ),
        Err(e) => db_error(e),
    }
}

/// PUT /api/classes/{classroom_id}
pub async fn update_class(
    State(state): State<AppState>,
    Path(classroom_id): Path<i64>,
    Json(req): Json<ClassroomRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<ClassroomResponse>(&e);
    }

    let db = state.db();
    let current = match classroom::Entity::find_by_id(classroom_id).one(db).await {
        Ok(Some(c)) => c,
        Ok(None) => return fail(StatusCode::NOT_FOUND, "Classroom not found"),
        Err(e) => return db_error(e),
    };

    let mut active = current.into_active_model();
    active.scanner_id = Set(req.scanner_id.trim().to_owned());

    match active.update(db).await {
        Ok(c) => ok(
            StatusCode::OK,
            ClassroomResponse::from(c),
            "Classroom updated successfully",
        ),
        Err(e) => db_error(e),
    }
}

/// DELETE /api/classes/{classroom_id}
pub async fn delete_class(
    State(state): State<AppState>,
    Path(classroom_id): Path<i64>,
) -> impl IntoResponse {
    match classroom::Entity::delete_by_id(classroom_id)
        .exec(state.db())
        .await
    {
        Ok(res) if res.rows_affected == 0 => {
            fail::<Empty>(StatusCode::NOT_FOUND, "Classroom not found")
        }
        Ok(_) => ok(StatusCode::OK, Empty, "Classroom deleted successfully"),
        Err(e) => db_error(e),
    }
}
