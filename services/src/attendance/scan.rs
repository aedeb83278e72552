use chrono::Utc;
use db::models::{
    attendance_record::{self, Factor},
    attendance_session::{self, Model as Session},
    student,
};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Serialize;
use tracing::{info, warn};

use super::resolver;
use crate::error::{ServiceError, ServiceResult};

/// Result of a single scan submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScanOutcome {
    pub session_id: i64,
    pub student_id: i64,
    pub record_id: i64,
    /// Factor submitted by this call.
    pub flag_set: Factor,
    pub badge: bool,
    pub code: bool,
    pub present: bool,
    /// `true` only for the scan that completed the pair.
    pub newly_present: bool,
    /// Factor still missing, `None` once present.
    pub outstanding: Option<Factor>,
}

/// RFID path: the badge reader knows the session id and the badge id.
pub async fn record_badge_scan(
    db: &DatabaseConnection,
    session_id: i64,
    badge_id: &str,
) -> ServiceResult<ScanOutcome> {
    let student = student::Model::find_by_rfid(db, badge_id)
        .await?
        .ok_or_else(|| {
            warn!(session_id, badge_id, "Badge scan rejected: unknown badge");
            ServiceError::NotFound("No student with this RFID".into())
        })?;

    let session = attendance_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Session {session_id} not found")))?;

    record(db, session, student, Factor::Badge).await
}

/// QR path: the student's device submits the session token.
pub async fn record_code_scan(
    db: &DatabaseConnection,
    token: &str,
    student_id: i64,
) -> ServiceResult<ScanOutcome> {
    let student = student::Entity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Student {student_id} not found")))?;

    let session = Session::find_by_token(db, token).await?.ok_or_else(|| {
        warn!(student_id, "Code scan rejected: unknown token");
        ServiceError::NotFound("Invalid QR code".into())
    })?;

    record(db, session, student, Factor::Code).await
}

async fn record(
    db: &DatabaseConnection,
    session: Session,
    student: student::Model,
    factor: Factor,
) -> ServiceResult<ScanOutcome> {
    // State is checked before eligibility so a stopped session never reports
    // an eligibility error.
    ensure_active(&session, student.student_id, factor)?;

    if !student.is_in_cohort(&session.section, session.year) {
        warn!(
            session_id = session.id,
            student_id = student.student_id,
            ?factor,
            "Scan rejected: student outside session cohort"
        );
        return Err(ServiceError::Eligibility(format!(
            "Student is not in section {} year {}",
            session.section, session.year
        )));
    }

    let now = Utc::now();
    let txn = db.begin().await?;

    let row = attendance_record::Model::ensure(&txn, session.id, student.student_id).await?;

    // Re-read under the write lock taken by the upsert; a close that committed
    // in between must win.
    let session = attendance_session::Entity::find_by_id(session.id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Session {} not found", session.id)))?;
    ensure_active(&session, student.student_id, factor)?;

    let flipped = attendance_record::Model::set_factor(&txn, row.id, factor, now).await?;
    let newly_present =
        resolver::resolve(&txn, &session, row.id, student.student_id, now).await?;

    let row = attendance_record::Entity::find_by_id(row.id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Attendance record {} not found", row.id)))?;

    txn.commit().await?;

    if flipped {
        info!(
            session_id = session.id,
            student_id = student.student_id,
            ?factor,
            "Scan recorded"
        );
    }

    debug_assert_eq!(
        row.is_present,
        resolver::is_present(row.rfid_scanned, row.qr_scanned)
    );

    Ok(ScanOutcome {
        session_id: session.id,
        student_id: student.student_id,
        record_id: row.id,
        flag_set: factor,
        badge: row.rfid_scanned,
        code: row.qr_scanned,
        present: row.is_present,
        newly_present,
        outstanding: row.outstanding(),
    })
}

fn ensure_active(session: &Session, student_id: i64, factor: Factor) -> ServiceResult<()> {
    if session.is_active() {
        return Ok(());
    }
    warn!(
        session_id = session.id,
        student_id,
        ?factor,
        "Scan rejected: session not active"
    );
    Err(ServiceError::InvalidState(format!(
        "Session {} is not active",
        session.id
    )))
}
