use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::student;
use services::enrollment::{self, BulkEnroll, EnrollmentReport};
use util::state::AppState;
use validator::Validate;

use super::common::{CreateStudentRequest, EnrollRequest, StudentResponse};
use crate::routes::common::{db_error, ok, service_error, validation_error};

/// POST /api/students
///
/// Creates a student profile without a login account. Students created this
/// way can still be scanned by RFID; they register an account separately.
///
/// - `201 Created`
/// - `400 Bad Request` validation failure
/// - `409 Conflict` RFID or roll number already in use
pub async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return validation_error::<StudentResponse>(&e);
    }

    let created = student::Model::create(
        state.db(),
        student::NewStudent {
            user_id: None,
            student_name: req.student_name.trim().to_owned(),
            roll_number: req
                .roll_number
                .map(|r| r.trim().to_owned())
                .filter(|r| !r.is_empty()),
            email: req.email.trim().to_owned(),
            rfid: req.rfid.trim().to_owned(),
            year: req.year,
            dept: req.dept.trim().to_owned(),
            section: req.section.trim().to_owned(),
        },
    )
    .await;

    match created {
        Ok(s) => ok(
            StatusCode::CREATED,
            StudentResponse::from(s),
            "Student created successfully",
        ),
        Err(e) => db_error(e),
    }
}

/// POST /api/students/bulk-enroll
///
/// ### Request Body
/// ```json
/// { "course_id": 1, "year": 2, "section": "A" }
/// ```
/// or with an explicit list, which overrides the filters:
/// ```json
/// { "course_id": 1, "student_ids": [4, 5, 9] }
/// ```
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "enrolled_count": 2,
///     "already_enrolled_count": 1,
///     "skipped_count": 0,
///     "enrolled": [4, 9],
///     "already_enrolled": [5],
///     "skipped": []
///   },
///   "message": "Enrolled 2 students"
/// }
/// ```
pub async fn bulk_enroll(
    State(state): State<AppState>,
    Json(req): Json<BulkEnroll>,
) -> impl IntoResponse {
    match enrollment::bulk_enroll(state.db(), req).await {
        Ok(report) => {
            let message = format!("Enrolled {} students", report.enrolled_count);
            ok(StatusCode::OK, report, message)
        }
        Err(e) => service_error::<EnrollmentReport>(e),
    }
}

/// POST /api/students/{student_id}/enroll
pub async fn enroll_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<EnrollRequest>,
) -> impl IntoResponse {
    match enrollment::enroll_student(state.db(), student_id, req.course_id).await {
        Ok(report) => {
            let message = if report.enrolled_count == 1 {
                "Student enrolled"
            } else if report.already_enrolled_count == 1 {
                "Student is already enrolled"
            } else {
                "No teacher is assigned to this course for the student's section"
            };
            ok(StatusCode::OK, report, message)
        }
        Err(e) => service_error::<EnrollmentReport>(e),
    }
}
