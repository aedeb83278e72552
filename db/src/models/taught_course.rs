use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;

/// Assignment of a teacher to a course for one (year, section) cohort.
///
/// `classes_taken` counts the attendance sessions opened for this assignment
/// and is the denominator of every enrollment percentage.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "taught_courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub classes_taken: i32,
    pub section: String,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::CourseId",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::TeacherId",
        on_delete = "Cascade"
    )]
    Teacher,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(
        db: &C,
        course_id: i64,
        teacher_id: i64,
        section: &str,
        year: i32,
    ) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            course_id: Set(course_id),
            teacher_id: Set(teacher_id),
            classes_taken: Set(0),
            section: Set(section.trim().to_owned()),
            year: Set(year),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// The assignment covering `course_id` for a (year, section) cohort.
    ///
    /// If several teachers share a cohort the earliest assignment wins.
    pub async fn find_for_cohort<C>(
        db: &C,
        course_id: i64,
        year: i32,
        section: &str,
    ) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Year.eq(year))
            .filter(Column::Section.eq(section.trim()))
            .order_by_asc(Column::Id)
            .one(db)
            .await
    }

    pub async fn find_for_teacher<C>(
        db: &C,
        teacher_id: i64,
        course_id: i64,
        year: i32,
        section: &str,
    ) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Year.eq(year))
            .filter(Column::Section.eq(section.trim()))
            .one(db)
            .await
    }

    /// Adds one to `classes_taken` in a single statement.
    pub async fn increment_classes_taken<C>(db: &C, id: i64) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::update_many()
            .col_expr(
                Column::ClassesTaken,
                Expr::col(Column::ClassesTaken).add(1),
            )
            .filter(Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(())
    }
}
