use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::attendance::{OpenSession, ScanOutcome, registry, scan};
use services::requests::{self, NewRequest};
use services::{ServiceError, ServiceResult, auth};
use util::state::AppState;

use super::common::{
    BadgeScanRequest, CodeScanRequest, RequestResponse, ScanResponse, SessionResponse, Staff,
};
use crate::auth::AuthUser;
use crate::routes::common::{ApiResult, fail, ok, service_error};

/// POST /api/attendance/sessions
///
/// Opens a session owned by the calling teacher.
///
/// ### Request Body
/// ```json
/// { "course_id": 1, "section": "A", "year": 2 }
/// ```
///
/// ### Responses
/// - `201 Created` with the session (the QR token is not included; see `/qr`)
/// - `400 Bad Request` validation failure
/// - `404 Not Found` unknown course
pub async fn create_session(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(mut body): Json<OpenSession>,
) -> impl IntoResponse {
    let db = state.db();

    body.teacher_id = match auth::teacher_for_user(db, claims.sub).await {
        Ok(t) => t.teacher_id,
        Err(e) => return service_error::<SessionResponse>(e),
    };

    match registry::open(db, body).await {
        Ok(session) => ok(
            StatusCode::CREATED,
            SessionResponse::from(session),
            "Attendance session started",
        ),
        Err(e) => service_error(e),
    }
}

/// POST /api/attendance/sessions/{session_id}/stop
///
/// Owning teacher or management. Stopping twice is `400`.
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = state.db();

    let staff = match Staff::resolve(db, &claims).await {
        Ok(s) => s,
        Err(e) => return service_error::<SessionResponse>(e),
    };
    let session = match registry::find(db, session_id).await {
        Ok(s) => s,
        Err(e) => return service_error(e),
    };
    if !staff.may_manage(&session) {
        return fail(
            StatusCode::FORBIDDEN,
            "Only the owning teacher or management can stop this session",
        );
    }

    match registry::close(db, session_id).await {
        Ok(session) => ok(
            StatusCode::OK,
            SessionResponse::from(session),
            "Attendance session stopped",
        ),
        Err(e) => service_error(e),
    }
}

fn scanned(result: ServiceResult<ScanOutcome>) -> ApiResult<ScanResponse> {
    match result {
        Ok(outcome) => {
            let body = ScanResponse::from(outcome);
            let message = body.message();
            ok(StatusCode::OK, body, message)
        }
        Err(e) => service_error(e),
    }
}

/// POST /api/attendance/scan/rfid
///
/// Called by classroom badge readers; no authentication.
///
/// ### Request Body
/// ```json
/// { "rfid": "04A1B2C3", "session_id": 4 }
/// ```
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "session_id": 4,
///     "student_id": 7,
///     "record_id": 12,
///     "flag_set": "badge",
///     "rfid_scanned": true,
///     "qr_scanned": false,
///     "is_present": false,
///     "newly_present": false,
///     "outstanding": "code"
///   },
///   "message": "RFID scan recorded, waiting for QR scan"
/// }
/// ```
/// - `400 Bad Request` session is stopped
/// - `403 Forbidden` student is not in the session's section and year
/// - `404 Not Found` unknown badge or session
pub async fn scan_rfid(
    State(state): State<AppState>,
    Json(body): Json<BadgeScanRequest>,
) -> impl IntoResponse {
    scanned(scan::record_badge_scan(state.db(), body.session_id, &body.rfid).await)
}

/// POST /api/attendance/scan/qr
///
/// The student submits the token shown on the teacher's screen. `student_id`
/// must be the caller's own profile.
pub async fn scan_qr(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<CodeScanRequest>,
) -> impl IntoResponse {
    let db = state.db();

    match auth::student_for_user(db, claims.sub).await {
        Ok(me) if me.student_id == body.student_id => {}
        Ok(_) => {
            return scanned(Err(ServiceError::Forbidden(
                "You can only mark your own attendance".into(),
            )));
        }
        Err(e) => return scanned(Err(e)),
    }

    scanned(scan::record_code_scan(db, &body.qr_token, body.student_id).await)
}

/// POST /api/attendance/requests
///
/// ### Request Body
/// ```json
/// {
///   "student_id": 7,
///   "course_id": 1,
///   "classes_to_add": "2025-09-01, 2025-09-03",
///   "reason": "Badge reader was offline"
/// }
/// ```
///
/// - `201 Created`
/// - `400 Bad Request` no dates or no reason
/// - `404 Not Found` student is not enrolled with the calling teacher
pub async fn create_request(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(mut body): Json<NewRequest>,
) -> impl IntoResponse {
    let db = state.db();

    body.teacher_id = match auth::teacher_for_user(db, claims.sub).await {
        Ok(t) => t.teacher_id,
        Err(e) => return service_error::<RequestResponse>(e),
    };

    match requests::create(db, body).await {
        Ok(r) => ok(
            StatusCode::CREATED,
            RequestResponse::from(r),
            "Attendance update request submitted",
        ),
        Err(e) => service_error(e),
    }
}

/// POST /api/attendance/requests/{request_id}/approve
///
/// Credits every listed date to the student's ledger. Only pending requests
/// can be approved.
pub async fn approve_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = state.db();

    let manager = match auth::management_for_user(db, claims.sub).await {
        Ok(m) => m,
        Err(e) => return service_error::<RequestResponse>(e),
    };

    match requests::approve(db, request_id, manager.management_id).await {
        Ok(r) => ok(
            StatusCode::OK,
            RequestResponse::from(r),
            "Attendance update request approved",
        ),
        Err(e) => service_error(e),
    }
}

/// POST /api/attendance/requests/{request_id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = state.db();

    let manager = match auth::management_for_user(db, claims.sub).await {
        Ok(m) => m,
        Err(e) => return service_error::<RequestResponse>(e),
    };

    match requests::reject(db, request_id, manager.management_id).await {
        Ok(r) => ok(
            StatusCode::OK,
            RequestResponse::from(r),
            "Attendance update request rejected",
        ),
        Err(e) => service_error(e),
    }
}
