use db::models::{
    attendance_record, attendance_session, update_attendance_request, user::UserRole,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use services::attendance::ScanOutcome;
use services::{ServiceError, ServiceResult, auth};

use crate::auth::Claims;

/// Staff member behind a request, resolved from the token role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staff {
    Teacher(i64),
    Management(i64),
}

impl Staff {
    pub async fn resolve(db: &DatabaseConnection, claims: &Claims) -> ServiceResult<Self> {
        match claims.role {
            UserRole::Teacher => Ok(Staff::Teacher(
                auth::teacher_for_user(db, claims.sub).await?.teacher_id,
            )),
            UserRole::Management => Ok(Staff::Management(
                auth::management_for_user(db, claims.sub).await?.management_id,
            )),
            UserRole::Student => Err(ServiceError::Forbidden("Staff access required".into())),
        }
    }

    /// Teacher id to scope listings by; `None` for management.
    pub fn teacher_scope(self) -> Option<i64> {
        match self {
            Staff::Teacher(id) => Some(id),
            Staff::Management(_) => None,
        }
    }

    /// Management may act on any session; teachers only on their own.
    pub fn may_manage(self, session: &attendance_session::Model) -> bool {
        match self {
            Staff::Teacher(id) => id == session.teacher_id,
            Staff::Management(_) => true,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct SessionResponse {
    pub id: i64,
    pub teacher_id: i64,
    pub course_id: i64,
    pub section: String,
    pub year: i32,
    pub status: String,
    pub started_at: String,
    pub stopped_at: Option<String>,
}

impl From<attendance_session::Model> for SessionResponse {
    fn from(m: attendance_session::Model) -> Self {
        Self {
            id: m.id,
            teacher_id: m.teacher_id,
            course_id: m.course_id,
            section: m.section,
            year: m.year,
            status: m.status.to_string(),
            started_at: m.started_at.to_rfc3339(),
            stopped_at: m.stopped_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

#[derive(Debug, Deserialize, Default)]
pub struct SessionListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// `active` or `stopped`.
    pub status: Option<String>,
    pub course_id: Option<i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct ScanPayloadResponse {
    pub session_id: i64,
    pub qr_token: String,
}

#[derive(Debug, Serialize, Default)]
pub struct RecordResponse {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub rfid_scanned: bool,
    pub rfid_scanned_at: Option<String>,
    pub qr_scanned: bool,
    pub qr_scanned_at: Option<String>,
    pub is_present: bool,
    pub marked_present_at: Option<String>,
}

impl RecordResponse {
    pub fn new(m: attendance_record::Model, student_name: String) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            student_name,
            rfid_scanned: m.rfid_scanned,
            rfid_scanned_at: m.rfid_scanned_at.map(|t| t.to_rfc3339()),
            qr_scanned: m.qr_scanned,
            qr_scanned_at: m.qr_scanned_at.map(|t| t.to_rfc3339()),
            is_present: m.is_present,
            marked_present_at: m.marked_present_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BadgeScanRequest {
    pub rfid: String,
    pub session_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CodeScanRequest {
    pub qr_token: String,
    pub student_id: i64,
}

#[derive(Debug, Serialize, Default)]
pub struct ScanResponse {
    pub session_id: i64,
    pub student_id: i64,
    pub record_id: i64,
    pub flag_set: String,
    pub rfid_scanned: bool,
    pub qr_scanned: bool,
    pub is_present: bool,
    pub newly_present: bool,
    pub outstanding: Option<String>,
}

impl From<ScanOutcome> for ScanResponse {
    fn from(o: ScanOutcome) -> Self {
        Self {
            session_id: o.session_id,
            student_id: o.student_id,
            record_id: o.record_id,
            flag_set: o.flag_set.to_string(),
            rfid_scanned: o.badge,
            qr_scanned: o.code,
            is_present: o.present,
            newly_present: o.newly_present,
            outstanding: o.outstanding.map(|f| f.to_string()),
        }
    }
}

impl ScanResponse {
    pub fn message(&self) -> &'static str {
        match (self.newly_present, self.is_present, self.outstanding.as_deref()) {
            (true, _, _) => "Attendance marked present",
            (false, true, _) => "Attendance already marked present",
            (_, _, Some("badge")) => "QR scan recorded, waiting for RFID scan",
            _ => "RFID scan recorded, waiting for QR scan",
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct RequestResponse {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub classes_to_add: String,
    pub reason: String,
    pub status: String,
    pub requested_at: String,
    pub processed_at: Option<String>,
    pub processed_by: Option<i64>,
}

impl From<update_attendance_request::Model> for RequestResponse {
    fn from(m: update_attendance_request::Model) -> Self {
        Self {
            id: m.id,
            teacher_id: m.teacher_id,
            student_id: m.student_id,
            course_id: m.course_id,
            classes_to_add: m.classes_to_add,
            reason: m.reason,
            status: m.status.to_string(),
            requested_at: m.requested_at.to_rfc3339(),
            processed_at: m.processed_at.map(|t| t.to_rfc3339()),
            processed_by: m.processed_by,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RequestListQuery {
    /// `pending`, `approved` or `rejected`.
    pub status: Option<String>,
}
