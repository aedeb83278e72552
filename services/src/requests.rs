//! Manual attendance credits requested by teachers and decided by management.

use chrono::Utc;
use db::models::{
    student_course,
    update_attendance_request::{self, Model as UpdateRequest, RequestStatus},
};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationError};

use crate::attendance::ledger;
use crate::error::{ServiceError, ServiceResult};

fn validate_tokens(value: &str) -> Result<(), ValidationError> {
    if student_course::ledger_tokens(value).is_empty() {
        let mut err = ValidationError::new("classes_to_add_empty");
        err.message = Some("At least one class date is required".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewRequest {
    #[serde(default)]
    pub teacher_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    #[validate(custom(function = "validate_tokens"))]
    pub classes_to_add: String,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

/// Files a pending request. The student must already be enrolled with this
/// teacher for the course.
pub async fn create(db: &DatabaseConnection, req: NewRequest) -> ServiceResult<UpdateRequest> {
    req.validate()?;

    student_course::Model::find_enrollment(db, req.student_id, req.course_id, req.teacher_id)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(
                "Student is not enrolled in this course with this teacher".into(),
            )
        })?;

    let created = UpdateRequest::create(
        db,
        req.teacher_id,
        req.student_id,
        req.course_id,
        &req.classes_to_add,
        &req.reason,
    )
    .await?;

    info!(request_id = created.id, teacher_id = created.teacher_id, "Attendance update requested");
    Ok(created)
}

pub async fn find(db: &DatabaseConnection, id: i64) -> ServiceResult<UpdateRequest> {
    update_attendance_request::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Request {id} not found")))
}

/// Approves a pending request and credits every listed date to the ledger.
pub async fn approve(
    db: &DatabaseConnection,
    id: i64,
    management_id: i64,
) -> ServiceResult<UpdateRequest> {
    find(db, id).await?;

    let txn = db.begin().await?;
    let resolved =
        UpdateRequest::resolve(&txn, id, RequestStatus::Approved, management_id, Utc::now()).await?;
    if !resolved {
        return Err(ServiceError::InvalidState(format!(
            "Request {id} is no longer pending"
        )));
    }

    let request = update_attendance_request::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Request {id} not found")))?;

    ledger::append_tokens(
        &txn,
        request.student_id,
        request.course_id,
        request.teacher_id,
        &request.tokens(),
    )
    .await?;
    txn.commit().await?;

    info!(request_id = id, management_id, "Attendance update approved");
    Ok(request)
}

pub async fn reject(
    db: &DatabaseConnection,
    id: i64,
    management_id: i64,
) -> ServiceResult<UpdateRequest> {
    find(db, id).await?;

    if !UpdateRequest::resolve(db, id, RequestStatus::Rejected, management_id, Utc::now()).await? {
        return Err(ServiceError::InvalidState(format!(
            "Request {id} is no longer pending"
        )));
    }

    info!(request_id = id, management_id, "Attendance update rejected");
    find(db, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{cohort, student};
    use db::models::{management, taught_course};
    use db::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_approve_appends_tokens_and_only_once() {
        let db = setup_test_db().await;
        let c = cohort(&db, "CS700", "A", 1).await;
        let s = student(&db, "Q-1", "A", 1).await;
        let m = management::Model::create(&db, None, "Boss", "boss@example.com")
            .await
            .unwrap();
        student_course::Model::create(&db, s.student_id, c.course.course_id, c.teacher.teacher_id)
            .await
            .unwrap();
        for _ in 0..4 {
            taught_course::Model::increment_classes_taken(&db, c.taught.id).await.unwrap();
        }

        let r = create(
            &db,
            NewRequest {
                teacher_id: c.teacher.teacher_id,
                student_id: s.student_id,
                course_id: c.course.course_id,
                classes_to_add: "2025-05-01, 2025-05-02".into(),
                reason: "Scanner offline".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(r.status, RequestStatus::Pending);

        let approved = approve(&db, r.id, m.management_id).await.unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);
        assert_eq!(approved.processed_by, Some(m.management_id));

        let e = student_course::Model::find_enrollment(
            &db,
            s.student_id,
            c.course.course_id,
            c.teacher.teacher_id,
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(e.classes_attended, "2025-05-01, 2025-05-02");

        let s = db::models::student::Entity::find_by_id(s.student_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!((s.overall_attendance - 50.0).abs() < f64::EPSILON);

        assert!(matches!(
            approve(&db, r.id, m.management_id).await,
            Err(ServiceError::InvalidState(_))
        ));
        assert!(matches!(
            reject(&db, r.id, m.management_id).await,
            Err(ServiceError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_create_requires_enrollment_and_dates() {
        let db = setup_test_db().await;
        let c = cohort(&db, "CS701", "A", 1).await;
        let s = student(&db, "Q-2", "A", 1).await;

        let base = NewRequest {
            teacher_id: c.teacher.teacher_id,
            student_id: s.student_id,
            course_id: c.course.course_id,
            classes_to_add: "2025-05-01".into(),
            reason: "Late badge".into(),
        };
        assert!(matches!(
            create(&db, base.clone()).await,
            Err(ServiceError::NotFound(_))
        ));

        let empty = NewRequest {
            classes_to_add: " , ".into(),
            ..base
        };
        assert!(matches!(
            create(&db, empty).await,
            Err(ServiceError::Validation(_))
        ));
    }
}
