use chrono::{DateTime, Utc};
use db::models::{attendance_record, attendance_session::Model as Session};
use sea_orm::ConnectionTrait;
use tracing::info;

use super::ledger;
use crate::error::ServiceResult;

/// Presence rule: both factors must be present.
#[inline]
pub fn is_present(badge: bool, code: bool) -> bool {
    badge && code
}

/// Applies the presence rule to a freshly updated record.
///
/// The transition is a conditional update, so of any number of concurrent
/// callers for the same record exactly one sees `true`, and only that caller
/// appends to the ledger. Returns whether this call made the student present.
pub async fn resolve<C>(
    db: &C,
    session: &Session,
    record_id: i64,
    student_id: i64,
    at: DateTime<Utc>,
) -> ServiceResult<bool>
where
    C: ConnectionTrait,
{
    if !attendance_record::Model::mark_present_if_complete(db, record_id, at).await? {
        return Ok(false);
    }

    info!(session_id = session.id, student_id, "Presence asserted");

    ledger::append_attendance(
        db,
        student_id,
        session.course_id,
        session.teacher_id,
        &session.date_token(),
    )
    .await?;

    Ok(true)
}
