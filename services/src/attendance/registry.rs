use chrono::Utc;
use db::models::{
    attendance_session::{self, Model as Session},
    course, taught_course, teacher,
};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Deserialize;
use tracing::info;
use util::config;
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};

/// Scope of a new attendance session.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OpenSession {
    #[serde(default)]
    pub teacher_id: i64,
    pub course_id: i64,
    #[validate(length(min = 1, message = "Section is required"))]
    pub section: String,
    #[validate(range(min = 1, message = "Year must be positive"))]
    pub year: i32,
}

pub async fn find(db: &DatabaseConnection, session_id: i64) -> ServiceResult<Session> {
    attendance_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Session {session_id} not found")))
}

/// Opens a new active session with a fresh random scan token.
///
/// Several sessions may be active for the same scope at once. When the
/// teacher has a taught-course assignment for the cohort its `classes_taken`
/// is incremented in the same transaction.
pub async fn open(db: &DatabaseConnection, req: OpenSession) -> ServiceResult<Session> {
    req.validate()?;

    teacher::Entity::find_by_id(req.teacher_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Teacher {} not found", req.teacher_id)))?;
    course::Entity::find_by_id(req.course_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Course {} not found", req.course_id)))?;

    let txn = db.begin().await?;

    let session = Session::open(
        &txn,
        req.teacher_id,
        req.course_id,
        &req.section,
        req.year,
        config::scan_token_bytes(),
    )
    .await?;

    if let Some(tc) = taught_course::Model::find_for_teacher(
        &txn,
        req.teacher_id,
        req.course_id,
        req.year,
        &req.section,
    )
    .await?
    {
        taught_course::Model::increment_classes_taken(&txn, tc.id).await?;
    }

    txn.commit().await?;

    info!(
        session_id = session.id,
        teacher_id = session.teacher_id,
        course_id = session.course_id,
        section = %session.section,
        year = session.year,
        "Attendance session opened"
    );

    Ok(session)
}

/// Stops an active session.
///
/// A second close is rejected with `InvalidState`.
pub async fn close(db: &DatabaseConnection, session_id: i64) -> ServiceResult<Session> {
    find(db, session_id).await?;

    if !Session::stop(db, session_id, Utc::now()).await? {
        return Err(ServiceError::InvalidState(format!(
            "Session {session_id} is not active"
        )));
    }

    let session = find(db, session_id).await?;
    info!(session_id, "Attendance session closed");
    Ok(session)
}

/// Returns the token to render as the session's QR code.
pub async fn issue_scan_payload(db: &DatabaseConnection, session_id: i64) -> ServiceResult<String> {
    let session = find(db, session_id).await?;
    if !session.is_active() {
        return Err(ServiceError::InvalidState(format!(
            "Session {session_id} is not active"
        )));
    }
    Ok(session.qr_code_token)
}
