//! Shared helpers for route handlers: error mapping, list queries and
//! pagination.

use crate::response::ApiResponse;
use axum::{Json, http::StatusCode};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select, SqlErr,
};
use serde::{Deserialize, Serialize};
use services::ServiceError;
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

/// Every handler returns a status plus the JSON envelope.
pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn ok<T: Serialize>(status: StatusCode, data: T, message: impl Into<String>) -> ApiResult<T> {
    (status, Json(ApiResponse::success(data, message)))
}

pub fn fail<T: Serialize + Default>(
    status: StatusCode,
    message: impl Into<String>,
) -> ApiResult<T> {
    (status, Json(ApiResponse::error(message)))
}

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::InvalidState(_) => StatusCode::BAD_REQUEST,
        ServiceError::Eligibility(_) => StatusCode::FORBIDDEN,
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn service_error<T: Serialize + Default>(err: ServiceError) -> ApiResult<T> {
    if let ServiceError::Database(db_err) = err {
        return db_error(db_err);
    }
    fail(status_for(&err), err.to_string())
}

/// Maps constraint violations to 409/400 and everything else to 500.
pub fn db_error<T: Serialize + Default>(err: DbErr) -> ApiResult<T> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            fail(StatusCode::CONFLICT, "A record with these values already exists")
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            fail(StatusCode::BAD_REQUEST, "Referenced record does not exist")
        }
        _ => {
            tracing::error!(error = %err, "Database error");
            fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {err}"),
            )
        }
    }
}

pub fn validation_error<T: Serialize + Default>(errors: &ValidationErrors) -> ApiResult<T> {
    fail(
        StatusCode::BAD_REQUEST,
        common::format_validation_errors(errors),
    )
}

/// `?page=&per_page=&q=&sort=` accepted by every list endpoint.
#[derive(Debug, Deserialize, Validate, Default)]
pub struct ListQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: Option<u64>,
    /// Case-insensitive partial match on the resource's text fields.
    pub q: Option<String>,
    /// Comma-separated fields, `-` prefix for descending.
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page.unwrap_or(20)
    }

    /// Trimmed, non-empty search term.
    pub fn search(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_owned)
    }
}

#[derive(Debug, Serialize, Default)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// Applies `sort` using `column` to resolve field names; unknown fields are
/// ignored and `fallback` ascending is used when nothing matched.
pub fn apply_sort<E, F>(
    mut select: Select<E>,
    sort: Option<&str>,
    fallback: E::Column,
    column: F,
) -> Select<E>
where
    E: EntityTrait,
    F: Fn(&str) -> Option<E::Column>,
{
    let mut sorted = false;
    for field in sort.unwrap_or_default().split(',').map(str::trim) {
        let (name, desc) = match field.strip_prefix('-') {
            Some(name) => (name, true),
            None => (field, false),
        };
        let Some(col) = column(name) else {
            continue;
        };
        select = if desc {
            select.order_by_desc(col)
        } else {
            select.order_by_asc(col)
        };
        sorted = true;
    }

    if !sorted {
        select = select.order_by_asc(fallback);
    }
    select
}

/// Runs a paginated select and maps each row.
pub async fn paginate<E, T, F>(
    db: &DatabaseConnection,
    select: Select<E>,
    query: &ListQuery,
    map: F,
) -> Result<Page<T>, DbErr>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
    F: Fn(E::Model) -> T,
{
    let page = query.page();
    let per_page = query.per_page();

    let paginator = select.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let items = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(map)
        .collect();

    Ok(Page {
        items,
        page,
        per_page,
        total,
    })
}

/// Loads `id -> name` for the referenced rows of `E`, used to decorate
/// listings with display names.
pub async fn names_by_id<E, F>(
    db: &DatabaseConnection,
    key: E::Column,
    ids: impl IntoIterator<Item = i64>,
    name: F,
) -> Result<HashMap<i64, String>, DbErr>
where
    E: EntityTrait,
    F: Fn(E::Model) -> (i64, String),
{
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    Ok(E::find()
        .filter(key.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(name)
        .collect())
}
