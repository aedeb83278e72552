//! Read-only attendance routes: session listings, scan payload, statistics,
//! scan records and update requests.

use std::collections::HashMap;
use std::str::FromStr;

use axum::{
    Extension,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{
    attendance_record,
    attendance_session::{self, SessionStatus},
    student,
    update_attendance_request::{self, RequestStatus},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use services::attendance::{SessionSummary, registry, statistics};
use services::ServiceError;
use util::state::AppState;

use super::common::{
    RecordResponse, RequestListQuery, RequestResponse, ScanPayloadResponse, SessionListQuery,
    SessionListResponse, SessionResponse, Staff,
};
use crate::auth::AuthUser;
use crate::routes::common::{ListQuery, db_error, fail, ok, paginate, service_error};

/// GET /api/attendance/sessions
///
/// Teachers see their own sessions, management sees all of them.
///
/// **Query**
/// - `status` *(optional)*: `active` | `stopped`
/// - `course_id` *(optional)*
/// - `page` *(default 1)*, `per_page` *(default 20, max 100)*
///
/// Newest sessions first.
pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(q): Query<SessionListQuery>,
) -> impl IntoResponse {
    let db = state.db();

    let staff = match Staff::resolve(db, &claims).await {
        Ok(s) => s,
        Err(e) => return service_error::<SessionListResponse>(e),
    };

    let mut select = attendance_session::Entity::find();
    if let Some(teacher_id) = staff.teacher_scope() {
        select = select.filter(attendance_session::Column::TeacherId.eq(teacher_id));
    }
    if let Some(raw) = q.status.as_deref().filter(|s| !s.trim().is_empty()) {
        let Ok(status) = SessionStatus::from_str(raw.trim()) else {
            return fail(
                StatusCode::BAD_REQUEST,
                format!("Unknown session status '{raw}'"),
            );
        };
        select = select.filter(attendance_session::Column::Status.eq(status));
    }
    if let Some(course_id) = q.course_id {
        select = select.filter(attendance_session::Column::CourseId.eq(course_id));
    }
    let select = select
        .order_by_desc(attendance_session::Column::StartedAt)
        .order_by_desc(attendance_session::Column::Id);

    let paging = ListQuery {
        page: q.page.map(|p| p.max(1)),
        per_page: q.per_page.map(|p| p.clamp(1, 100)),
        ..Default::default()
    };

    match paginate(db, select, &paging, SessionResponse::from).await {
        Ok(page) => ok(
            StatusCode::OK,
            SessionListResponse {
                sessions: page.items,
                page: page.page,
                per_page: page.per_page,
                total: page.total,
            },
            "Attendance sessions retrieved",
        ),
        Err(e) => db_error(e),
    }
}

/// GET /api/attendance/sessions/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> impl IntoResponse {
    match registry::find(state.db(), session_id).await {
        Ok(s) => ok(
            StatusCode::OK,
            SessionResponse::from(s),
            "Attendance session retrieved",
        ),
        Err(e) => service_error(e),
    }
}

/// GET /api/attendance/sessions/{session_id}/qr
///
/// Returns the raw scan token for the owning teacher to render as a QR code.
/// Only available while the session is active.
///
/// - `200 OK` `{ "session_id": 4, "qr_token": "9f2c..." }`
/// - `400 Bad Request` session is stopped
/// - `403 Forbidden` caller does not own the session
/// - `404 Not Found`
pub async fn get_scan_payload(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = state.db();

    let session = match registry::find(db, session_id).await {
        Ok(s) => s,
        Err(e) => return service_error::<ScanPayloadResponse>(e),
    };
    match services::auth::teacher_for_user(db, claims.sub).await {
        Ok(t) if t.teacher_id == session.teacher_id => {}
        Ok(_) => {
            return fail(
                StatusCode::FORBIDDEN,
                "Only the teacher who opened this session can display its QR code",
            );
        }
        Err(e) => return service_error(e),
    }

    match registry::issue_scan_payload(db, session_id).await {
        Ok(qr_token) => ok(
            StatusCode::OK,
            ScanPayloadResponse {
                session_id,
                qr_token,
            },
            "QR payload issued",
        ),
        Err(e) => service_error(e),
    }
}

/// GET /api/attendance/sessions/{session_id}/statistics
///
/// ```json
/// {
///   "success": true,
///   "data": { "total": 3, "present": 1, "absent": 2, "badge_only": 1, "code_only": 1 },
///   "message": "Session statistics retrieved"
/// }
/// ```
pub async fn get_statistics(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> impl IntoResponse {
    match statistics::summarize(state.db(), session_id).await {
        Ok(summary) => ok(StatusCode::OK, summary, "Session statistics retrieved"),
        Err(e) => service_error::<SessionSummary>(e),
    }
}

/// GET /api/attendance/sessions/{session_id}/records
///
/// Scan records of the session with student names, in record order.
pub async fn list_records(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> impl IntoResponse {
    let db = state.db();

    if let Err(e) = registry::find(db, session_id).await {
        return service_error::<Vec<RecordResponse>>(e);
    }

    let records = match attendance_record::Model::for_session(db, session_id).await {
        Ok(r) => r,
        Err(e) => return db_error(e),
    };

    let ids: Vec<i64> = records.iter().map(|r| r.student_id).collect();
    let names: HashMap<i64, String> = match student::Entity::find()
        .filter(student::Column::StudentId.is_in(ids))
        .all(db)
        .await
    {
        Ok(rows) => rows
            .into_iter()
            .map(|s| (s.student_id, s.student_name))
            .collect(),
        Err(e) => return db_error(e),
    };

    let items = records
        .into_iter()
        .map(|r| {
            let name = names.get(&r.student_id).cloned().unwrap_or_default();
            RecordResponse::new(r, name)
        })
        .collect();

    ok(StatusCode::OK, items, "Attendance records retrieved")
}

/// GET /api/attendance/requests
///
/// Teachers see the requests they filed; management sees all. Optional
/// `status` filter.
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(q): Query<RequestListQuery>,
) -> impl IntoResponse {
    let db = state.db();

    let staff = match Staff::resolve(db, &claims).await {
        Ok(s) => s,
        Err(e) => return service_error::<Vec<RequestResponse>>(e),
    };

    let status = match q.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match RequestStatus::from_str(raw) {
            Ok(s) => Some(s),
            Err(_) => {
                return service_error(ServiceError::Validation(format!(
                    "Unknown request status '{raw}'"
                )));
            }
        },
        None => None,
    };

    match update_attendance_request::Model::list(db, staff.teacher_scope(), status).await {
        Ok(rows) => ok(
            StatusCode::OK,
            rows.into_iter().map(RequestResponse::from).collect(),
            "Attendance update requests retrieved",
        ),
        Err(e) => db_error(e),
    }
}
