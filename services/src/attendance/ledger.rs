use db::models::{
    student,
    student_course::{self, LEDGER_SEPARATOR, Model as Enrollment, ledger_tokens, percentage},
    taught_course,
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set,
    TransactionTrait,
};
use serde::Serialize;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};

/// Attendance figures for one enrollment.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnrollmentFigures {
    pub enrollment_id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub attended: usize,
    pub classes_taken: i32,
    pub percentage: f64,
}

/// Appends `token` to the (student, course, teacher) ledger, creating the
/// enrollment when missing, and refreshes the student's overall attendance.
///
/// No de-duplication happens here; callers must invoke this once per
/// presence transition.
pub async fn append_attendance<C>(
    db: &C,
    student_id: i64,
    course_id: i64,
    teacher_id: i64,
    token: &str,
) -> ServiceResult<Enrollment>
where
    C: ConnectionTrait,
{
    append_tokens(db, student_id, course_id, teacher_id, &[token]).await
}

/// Batch form of [`append_attendance`], used when approving manual requests.
pub async fn append_tokens<C>(
    db: &C,
    student_id: i64,
    course_id: i64,
    teacher_id: i64,
    tokens: &[&str],
) -> ServiceResult<Enrollment>
where
    C: ConnectionTrait,
{
    let enrollment =
        match Enrollment::find_enrollment(db, student_id, course_id, teacher_id).await? {
            Some(e) => e,
            None => Enrollment::create(db, student_id, course_id, teacher_id).await?,
        };

    for token in tokens {
        Enrollment::append_token(db, enrollment.id, token).await?;
    }

    recompute_overall_attendance(db, student_id).await?;

    info!(
        student_id,
        course_id,
        teacher_id,
        appended = tokens.len(),
        "Attendance ledger appended"
    );

    student_course::Entity::find_by_id(enrollment.id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Enrollment {} not found", enrollment.id)))
}

/// Reassigns an enrollment's teacher and/or replaces its log.
///
/// The log is normalised to `date, date, ...`. The write and the student's
/// overall attendance refresh commit together.
pub async fn edit_enrollment(
    db: &DatabaseConnection,
    id: i64,
    teacher_id: Option<i64>,
    log: Option<&str>,
) -> ServiceResult<Enrollment> {
    let txn = db.begin().await?;

    let current = student_course::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Enrollment not found".into()))?;

    let mut active = current.into_active_model();
    if let Some(teacher_id) = teacher_id {
        active.teacher_id = Set(teacher_id);
    }
    if let Some(log) = log {
        active.classes_attended = Set(ledger_tokens(log).join(LEDGER_SEPARATOR));
    }
    let updated = active.update(&txn).await?;

    recompute_overall_attendance(&txn, updated.student_id).await?;
    txn.commit().await?;

    info!(enrollment_id = id, student_id = updated.student_id, "Enrollment edited");
    Ok(updated)
}

/// Deletes an enrollment and refreshes the student's overall attendance in
/// the same transaction.
pub async fn remove_enrollment(db: &DatabaseConnection, id: i64) -> ServiceResult<()> {
    let txn = db.begin().await?;

    let entry = student_course::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Enrollment not found".into()))?;

    student_course::Entity::delete_by_id(id).exec(&txn).await?;
    recompute_overall_attendance(&txn, entry.student_id).await?;
    txn.commit().await?;

    info!(enrollment_id = id, student_id = entry.student_id, "Enrollment removed");
    Ok(())
}

/// Computes attended count, classes taken and percentage for an enrollment.
///
/// Classes taken come from the teacher's assignment for the student's cohort;
/// without one the percentage is 0.
pub async fn figures<C>(
    db: &C,
    student: &student::Model,
    enrollment: &Enrollment,
) -> ServiceResult<EnrollmentFigures>
where
    C: ConnectionTrait,
{
    let classes_taken = taught_course::Model::find_for_teacher(
        db,
        enrollment.teacher_id,
        enrollment.course_id,
        student.year,
        &student.section,
    )
    .await?
    .map(|tc| tc.classes_taken)
    .unwrap_or(0);

    let attended = enrollment.attended_count();
    Ok(EnrollmentFigures {
        enrollment_id: enrollment.id,
        course_id: enrollment.course_id,
        teacher_id: enrollment.teacher_id,
        attended,
        classes_taken,
        percentage: percentage(attended, classes_taken),
    })
}

/// Recomputes `students.overall_attendance` as the mean enrollment percentage.
pub async fn recompute_overall_attendance<C>(db: &C, student_id: i64) -> ServiceResult<f64>
where
    C: ConnectionTrait,
{
    let student = student::Entity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Student {student_id} not found")))?;

    let enrollments = Enrollment::find_by_student(db, student_id).await?;
    let mut total = 0.0;
    for enrollment in &enrollments {
        total += figures(db, &student, enrollment).await?.percentage;
    }
    let overall = if enrollments.is_empty() {
        0.0
    } else {
        total / enrollments.len() as f64
    };

    student::Model::set_overall_attendance(db, student_id, overall).await?;
    Ok(overall)
}
