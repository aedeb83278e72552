use db::models::attendance_record;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use super::registry;
use crate::error::ServiceResult;

/// Per-session counts shown to teachers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub total: u64,
    pub present: u64,
    pub absent: u64,
    pub badge_only: u64,
    pub code_only: u64,
}

impl SessionSummary {
    pub fn tally(records: &[attendance_record::Model]) -> Self {
        let mut s = SessionSummary::default();
        for r in records {
            s.total += 1;
            if r.is_present {
                s.present += 1;
            }
            match (r.rfid_scanned, r.qr_scanned) {
                (true, false) => s.badge_only += 1,
                (false, true) => s.code_only += 1,
                _ => {}
            }
        }
        s.absent = s.total - s.present;
        s
    }
}

pub async fn summarize(db: &DatabaseConnection, session_id: i64) -> ServiceResult<SessionSummary> {
    registry::find(db, session_id).await?;
    let records = attendance_record::Model::for_session(db, session_id).await?;
    Ok(SessionSummary::tally(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::registry::OpenSession;
    use crate::attendance::scan::{record_badge_scan, record_code_scan};
    use crate::error::ServiceError;
    use crate::test_fixtures::{cohort, student};
    use db::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_summary_counts_each_bucket() {
        let db = setup_test_db().await;
        let c = cohort(&db, "CS500", "A", 1).await;
        let full = student(&db, "S-1", "A", 1).await;
        let badge = student(&db, "S-2", "A", 1).await;
        let code = student(&db, "S-3", "A", 1).await;
        let session = registry::open(
            &db,
            OpenSession {
                teacher_id: c.teacher.teacher_id,
                course_id: c.course.course_id,
                section: "A".into(),
                year: 1,
            },
        )
        .await
        .unwrap();

        record_badge_scan(&db, session.id, &full.rfid).await.unwrap();
        record_code_scan(&db, &session.qr_code_token, full.student_id)
            .await
            .unwrap();
        record_badge_scan(&db, session.id, &badge.rfid).await.unwrap();
        record_code_scan(&db, &session.qr_code_token, code.student_id)
            .await
            .unwrap();

        let summary = summarize(&db, session.id).await.unwrap();
        assert_eq!(
            summary,
            SessionSummary {
                total: 3,
                present: 1,
                absent: 2,
                badge_only: 1,
                code_only: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_summary_of_unknown_session_is_not_found() {
        let db = setup_test_db().await;
        assert!(matches!(
            summarize(&db, 77).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
