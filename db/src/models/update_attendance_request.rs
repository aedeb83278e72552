use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::student_course::ledger_tokens;

/// A teacher's request to credit attendance that was not captured by scans.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "update_attendance_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// Comma-separated date tokens to append once approved.
    pub classes_to_add: String,
    pub reason: String,
    pub status: RequestStatus,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    /// Management profile that approved or rejected the request.
    pub processed_by: Option<i64>,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "update_request_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RequestStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "approved")]
    Approved,

    #[sea_orm(string_value = "rejected")]
    Rejected,
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
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::StudentId",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::CourseId",
        on_delete = "Cascade"
    )]
    Course,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(
        db: &C,
        teacher_id: i64,
        student_id: i64,
        course_id: i64,
        classes_to_add: &str,
        reason: &str,
    ) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            teacher_id: Set(teacher_id),
            student_id: Set(student_id),
            course_id: Set(course_id),
            classes_to_add: Set(classes_to_add.trim().to_owned()),
            reason: Set(reason.trim().to_owned()),
            status: Set(RequestStatus::Pending),
            requested_at: Set(Utc::now()),
            processed_at: Set(None),
            processed_by: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn list<C>(
        db: &C,
        teacher_id: Option<i64>,
        status: Option<RequestStatus>,
    ) -> Result<Vec<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut query = Entity::find();
        if let Some(teacher_id) = teacher_id {
            query = query.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }
        query.order_by_desc(Column::RequestedAt).all(db).await
    }

    pub fn tokens(&self) -> Vec<&str> {
        ledger_tokens(&self.classes_to_add)
    }

    /// Moves a pending request to `outcome`.
    ///
    /// Returns `false` without writing when the request is no longer pending.
    pub async fn resolve<C>(
        db: &C,
        id: i64,
        outcome: RequestStatus,
        management_id: i64,
        at: DateTime<Utc>,
    ) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = Entity::update_many()
            .col_expr(Column::Status, Expr::value(outcome))
            .col_expr(Column::ProcessedAt, Expr::value(Some(at)))
            .col_expr(Column::ProcessedBy, Expr::value(Some(management_id)))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(RequestStatus::Pending))
            .exec(db)
            .await?;
        Ok(res.rows_affected == 1)
    }
}
