use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A teacher-opened collection window for one (course, section, year) cohort.
///
/// `qr_code_token` is generated once when the session opens and is the only
/// payload accepted by the QR scan path while the session is active.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub course_id: i64,
    pub section: String,
    pub year: i32,
    pub status: SessionStatus,
    #[serde(skip_serializing)]
    pub qr_code_token: String,
    pub started_at: DateTime<Utc>,
    pub stopped_at: Option<DateTime<Utc>>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "attendance_session_status"
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SessionStatus {
    #[sea_orm(string_value = "active")]
    Active,

    #[sea_orm(string_value = "stopped")]
    Stopped,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::TeacherId",
        on_delete = "Cascade"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::CourseId",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Hex-encodes `bytes` bytes from the OS random source.
pub fn generate_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

impl Model {
    /// Inserts a new active session with a fresh scan token.
    pub async fn open<C>(
        db: &C,
        teacher_id: i64,
        course_id: i64,
        section: &str,
        year: i32,
        token_bytes: usize,
    ) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            teacher_id: Set(teacher_id),
            course_id: Set(course_id),
            section: Set(section.trim().to_owned()),
            year: Set(year),
            status: Set(SessionStatus::Active),
            qr_code_token: Set(generate_token(token_bytes)),
            started_at: Set(Utc::now()),
            stopped_at: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Date token written to the ledger for students present in this session.
    pub fn date_token(&self) -> String {
        self.started_at.format("%Y-%m-%d").to_string()
    }

    pub async fn find_by_token<C>(db: &C, token: &str) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::QrCodeToken.eq(token.trim()))
            .one(db)
            .await
    }

    pub async fn find_by_teacher<C>(db: &C, teacher_id: i64) -> Result<Vec<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::StartedAt)
            .all(db)
            .await
    }

    /// Flips an active session to stopped.
    ///
    /// Returns `false` when the session was not active, in which case nothing
    /// is written.
    pub async fn stop<C>(db: &C, id: i64, at: DateTime<Utc>) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = Entity::update_many()
            .col_expr(Column::Status, Expr::value(SessionStatus::Stopped))
            .col_expr(Column::StoppedAt, Expr::value(Some(at)))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(SessionStatus::Active))
            .exec(db)
            .await?;
        Ok(res.rows_affected == 1)
    }
}
