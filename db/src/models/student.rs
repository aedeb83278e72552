use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;

/// A student profile.
///
/// `year` and `section` define which attendance sessions the student may scan
/// into; `rfid` is the badge identifier read by classroom scanners.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub student_id: i64,
    pub user_id: Option<i64>,
    pub student_name: String,
    pub roll_number: Option<String>,
    pub email: String,
    pub rfid: String,
    /// Mean attendance percentage across all enrollments.
    pub overall_attendance: f64,
    pub year: i32,
    pub dept: String,
    pub section: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::student_course::Entity")]
    StudentCourses,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::student_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Field values for a new student row.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub user_id: Option<i64>,
    pub student_name: String,
    pub roll_number: Option<String>,
    pub email: String,
    pub rfid: String,
    pub year: i32,
    pub dept: String,
    pub section: String,
}

/// Optional filters used when selecting students for bulk operations.
#[derive(Debug, Clone, Default)]
pub struct StudentScope {
    pub year: Option<i32>,
    pub section: Option<String>,
    pub dept: Option<String>,
}

impl Model {
    pub async fn create<C>(db: &C, new: NewStudent) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            user_id: Set(new.user_id),
            student_name: Set(new.student_name),
            roll_number: Set(new.roll_number),
            email: Set(new.email),
            rfid: Set(new.rfid),
            overall_attendance: Set(0.0),
            year: Set(new.year),
            dept: Set(new.dept),
            section: Set(new.section),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_rfid<C>(db: &C, rfid: &str) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::Rfid.eq(rfid.trim()))
            .one(db)
            .await
    }

    pub async fn find_by_user_id<C>(db: &C, user_id: i64) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn find_in_scope<C>(db: &C, scope: &StudentScope) -> Result<Vec<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut query = Entity::find();
        if let Some(year) = scope.year {
            query = query.filter(Column::Year.eq(year));
        }
        if let Some(section) = &scope.section {
            query = query.filter(Column::Section.eq(section.as_str()));
        }
        if let Some(dept) = &scope.dept {
            query = query.filter(Column::Dept.eq(dept.as_str()));
        }
        query.order_by_asc(Column::StudentId).all(db).await
    }

    /// Whether this student belongs to the given (section, year) cohort.
    ///
    /// Sections match exactly, like the taught-course cohort lookups.
    pub fn is_in_cohort(&self, section: &str, year: i32) -> bool {
        self.year == year && self.section == section.trim()
    }

    pub async fn set_overall_attendance<C>(
        db: &C,
        student_id: i64,
        value: f64,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            student_id: Set(student_id),
            overall_attendance: Set(value),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(())
    }
}
