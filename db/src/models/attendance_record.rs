use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{QueryOrder, Set};
use serde::Serialize;
use strum::Display;

/// Per-(session, student) scan progress.
///
/// At most one row exists per pair. `is_present` is only ever flipped to
/// `true`, and only once both factor flags are set.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,
    pub rfid_scanned: bool,
    pub rfid_scanned_at: Option<DateTime<Utc>>,
    pub qr_scanned: bool,
    pub qr_scanned_at: Option<DateTime<Utc>>,
    pub is_present: bool,
    pub marked_present_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendance_session::Entity",
        from = "Column::SessionId",
        to = "super::attendance_session::Column::Id",
        on_delete = "Cascade"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::StudentId",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::attendance_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// One of the two independent attendance factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Factor {
    /// RFID badge read by a classroom scanner.
    Badge,
    /// QR code scanned by the student.
    Code,
}

impl Factor {
    fn flag(self) -> Column {
        match self {
            Factor::Badge => Column::RfidScanned,
            Factor::Code => Column::QrScanned,
        }
    }

    fn stamp(self) -> Column {
        match self {
            Factor::Badge => Column::RfidScannedAt,
            Factor::Code => Column::QrScannedAt,
        }
    }
}

impl Model {
    /// Creates the row for (session, student) with both flags unset unless it
    /// already exists, then returns it.
    pub async fn ensure<C>(db: &C, session_id: i64, student_id: i64) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let fresh = ActiveModel {
            session_id: Set(session_id),
            student_id: Set(student_id),
            rfid_scanned: Set(false),
            rfid_scanned_at: Set(None),
            qr_scanned: Set(false),
            qr_scanned_at: Set(None),
            is_present: Set(false),
            marked_present_at: Set(None),
            ..Default::default()
        };

        Entity::insert(fresh)
            .on_conflict(
                OnConflict::columns([Column::SessionId, Column::StudentId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Self::find_pair(db, session_id, student_id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "Attendance record for session {session_id} student {student_id}"
                ))
            })
    }

    pub async fn find_pair<C>(
        db: &C,
        session_id: i64,
        student_id: i64,
    ) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await
    }

    pub async fn for_session<C>(db: &C, session_id: i64) -> Result<Vec<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Sets the flag for `factor` if it is still unset.
    ///
    /// Returns `true` only for the call that actually flipped it.
    pub async fn set_factor<C>(
        db: &C,
        id: i64,
        factor: Factor,
        at: DateTime<Utc>,
    ) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = Entity::update_many()
            .col_expr(factor.flag(), Expr::value(true))
            .col_expr(factor.stamp(), Expr::value(Some(at)))
            .filter(Column::Id.eq(id))
            .filter(factor.flag().eq(false))
            .exec(db)
            .await?;
        Ok(res.rows_affected == 1)
    }

    /// Asserts presence when both flags are set and presence is not yet set.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub async fn mark_present_if_complete<C>(
        db: &C,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = Entity::update_many()
            .col_expr(Column::IsPresent, Expr::value(true))
            .col_expr(Column::MarkedPresentAt, Expr::value(Some(at)))
            .filter(Column::Id.eq(id))
            .filter(Column::RfidScanned.eq(true))
            .filter(Column::QrScanned.eq(true))
            .filter(Column::IsPresent.eq(false))
            .exec(db)
            .await?;
        Ok(res.rows_affected == 1)
    }

    /// The factor still missing, if any.
    pub fn outstanding(&self) -> Option<Factor> {
        match (self.rfid_scanned, self.qr_scanned) {
            (false, _) => Some(Factor::Badge),
            (true, false) => Some(Factor::Code),
            (true, true) => None,
        }
    }
}
