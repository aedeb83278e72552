use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
use db::models::{course, student_course};
use serde::Serialize;
use services::attendance::ledger;
use services::auth;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::routes::common::{db_error, names_by_id, ok, service_error};

#[derive(Debug, Serialize, Default)]
pub struct MyCourseAttendance {
    pub enrollment_id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub teacher_id: i64,
    pub classes_attended: Vec<String>,
    pub attended: usize,
    pub classes_taken: i32,
    pub percentage: f64,
}

#[derive(Debug, Serialize, Default)]
pub struct MyAttendanceResponse {
    pub student_id: i64,
    pub overall_attendance: f64,
    pub courses: Vec<MyCourseAttendance>,
}

/// GET /api/me/attendance
///
/// The caller's enrollments with the dates they were marked present and
/// their percentage per course.
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "student_id": 7,
///     "overall_attendance": 75.0,
///     "courses": [
///       {
///         "enrollment_id": 3,
///         "course_id": 1,
///         "course_name": "Data Structures",
///         "teacher_id": 2,
///         "classes_attended": ["2025-09-01", "2025-09-03", "2025-09-08"],
///         "attended": 3,
///         "classes_taken": 4,
///         "percentage": 75.0
///       }
///     ]
///   },
///   "message": "Attendance retrieved"
/// }
/// ```
pub async fn get_my_attendance(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = state.db();

    let me = match auth::student_for_user(db, claims.sub).await {
        Ok(s) => s,
        Err(e) => return service_error::<MyAttendanceResponse>(e),
    };

    let enrollments = match student_course::Model::find_by_student(db, me.student_id).await {
        Ok(rows) => rows,
        Err(e) => return db_error(e),
    };
    let course_names = match names_by_id::<course::Entity, _>(
        db,
        course::Column::CourseId,
        enrollments.iter().map(|e| e.course_id),
        |c| (c.course_id, c.course_name),
    )
    .await
    {
        Ok(m) => m,
        Err(e) => return db_error(e),
    };

    let mut courses = Vec::with_capacity(enrollments.len());
    for enrollment in &enrollments {
        let figures = match ledger::figures(db, &me, enrollment).await {
            Ok(f) => f,
            Err(e) => return service_error(e),
        };
        courses.push(MyCourseAttendance {
            enrollment_id: figures.enrollment_id,
            course_id: figures.course_id,
            course_name: course_names
                .get(&figures.course_id)
                .cloned()
                .unwrap_or_default(),
            teacher_id: figures.teacher_id,
            classes_attended: enrollment.tokens().into_iter().map(str::to_owned).collect(),
            attended: figures.attended,
            classes_taken: figures.classes_taken,
            percentage: figures.percentage,
        });
    }

    ok(
        StatusCode::OK,
        MyAttendanceResponse {
            student_id: me.student_id,
            overall_attendance: me.overall_attendance,
            courses,
        },
        "Attendance retrieved",
    )
}
