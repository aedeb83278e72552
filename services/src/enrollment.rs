//! Enrollment of students into taught courses.
//!
//! The teacher of an enrollment is always resolved from the taught-course
//! assignment for the student's own (year, section).

use db::models::{
    course,
    student::{self, StudentScope},
    student_course, taught_course,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkEnroll {
    pub course_id: i64,
    pub year: Option<i32>,
    pub section: Option<String>,
    pub dept: Option<String>,
    /// Explicit selection; takes precedence over the filters.
    pub student_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkUpdate {
    #[validate(length(min = 1, message = "At least one student id is required"))]
    pub student_ids: Vec<i64>,
    pub year: Option<i32>,
    pub section: Option<String>,
    pub dept: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EnrollmentReport {
    pub enrolled_count: usize,
    pub already_enrolled_count: usize,
    pub skipped_count: usize,
    pub enrolled: Vec<i64>,
    pub already_enrolled: Vec<i64>,
    /// Students with no teacher assigned for their cohort, or unknown ids.
    pub skipped: Vec<i64>,
}

impl EnrollmentReport {
    fn finish(mut self) -> Self {
        self.enrolled_count = self.enrolled.len();
        self.already_enrolled_count = self.already_enrolled.len();
        self.skipped_count = self.skipped.len();
        self
    }
}

async fn require_course(db: &DatabaseConnection, course_id: i64) -> ServiceResult<course::Model> {
    course::Entity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::Validation(format!("Course {course_id} does not exist")))
}

pub async fn bulk_enroll(
    db: &DatabaseConnection,
    req: BulkEnroll,
) -> ServiceResult<EnrollmentReport> {
    req.validate()?;
    let course = require_course(db, req.course_id).await?;

    let mut report = EnrollmentReport::default();

    let students = match &req.student_ids {
        Some(ids) if !ids.is_empty() => {
            let found = student::Entity::find()
                .filter(student::Column::StudentId.is_in(ids.clone()))
                .all(db)
                .await?;
            report.skipped.extend(
                ids.iter()
                    .filter(|id| !found.iter().any(|s| s.student_id == **id)),
            );
            found
        }
        _ => {
            let scope = StudentScope {
                year: req.year,
                section: req.section.clone().filter(|s| !s.trim().is_empty()),
                dept: req.dept.clone().filter(|s| !s.trim().is_empty()),
            };
            if scope.year.is_none() && scope.section.is_none() && scope.dept.is_none() {
                return Err(ServiceError::Validation(
                    "Provide student_ids or at least one of year, section, dept".into(),
                ));
            }
            student::Model::find_in_scope(db, &scope).await?
        }
    };

    let txn = db.begin().await?;
    for s in &students {
        let Some(tc) =
            taught_course::Model::find_for_cohort(&txn, course.course_id, s.year, &s.section).await?
        else {
            report.skipped.push(s.student_id);
            continue;
        };

        let existing = student_course::Model::find_enrollment(
            &txn,
            s.student_id,
            course.course_id,
            tc.teacher_id,
        )
        .await?;
        if existing.is_some() {
            report.already_enrolled.push(s.student_id);
        } else {
            student_course::Model::create(&txn, s.student_id, course.course_id, tc.teacher_id)
                .await?;
            report.enrolled.push(s.student_id);
        }
    }
    txn.commit().await?;

    let report = report.finish();
    info!(
        course_id = course.course_id,
        enrolled = report.enrolled_count,
        already_enrolled = report.already_enrolled_count,
        skipped = report.skipped_count,
        "Bulk enrollment finished"
    );
    Ok(report)
}

/// Single-student form of [`bulk_enroll`].
pub async fn enroll_student(
    db: &DatabaseConnection,
    student_id: i64,
    course_id: i64,
) -> ServiceResult<EnrollmentReport> {
    student::Entity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Student {student_id} not found")))?;

    bulk_enroll(
        db,
        BulkEnroll {
            course_id,
            year: None,
            section: None,
            dept: None,
            student_ids: Some(vec![student_id]),
        },
    )
    .await
}

/// Applies year/section/dept to every listed student. Returns rows updated.
pub async fn bulk_update(db: &DatabaseConnection, req: BulkUpdate) -> ServiceResult<u64> {
    req.validate()?;

    let mut update = student::Entity::update_many();
    let mut touched = false;
    if let Some(year) = req.year {
        update = update.col_expr(student::Column::Year, Expr::value(year));
        touched = true;
    }
    if let Some(section) = req.section.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        update = update.col_expr(student::Column::Section, Expr::value(section.to_owned()));
        touched = true;
    }
    if let Some(dept) = req.dept.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        update = update.col_expr(student::Column::Dept, Expr::value(dept.to_owned()));
        touched = true;
    }
    if !touched {
        return Err(ServiceError::Validation(
            "Provide at least one of year, section, dept".into(),
        ));
    }

    let res = update
        .filter(student::Column::StudentId.is_in(req.student_ids))
        .exec(db)
        .await?;

    info!(updated = res.rows_affected, "Bulk student update");
    Ok(res.rows_affected)
}
