use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;

/// Separator written between date tokens in `classes_attended`.
pub const LEDGER_SEPARATOR: &str = ", ";

/// Enrollment of a student in a course taught by a specific teacher.
///
/// `classes_attended` is an append-only, comma-separated log of the session
/// dates on which the student was marked present.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "student_courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub classes_attended: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::TeacherId",
        on_delete = "Cascade"
    )]
    Teacher,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
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

/// Splits a ledger string into its non-empty date tokens.
pub fn ledger_tokens(log: &str) -> Vec<&str> {
    log.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Attendance percentage for `attended` out of `taken` classes, capped at 100.
pub fn percentage(attended: usize, taken: i32) -> f64 {
    if taken <= 0 {
        return 0.0;
    }
    (attended as f64 / f64::from(taken) * 100.0).min(100.0)
}

impl Model {
    pub async fn create<C>(
        db: &C,
        student_id: i64,
        course_id: i64,
        teacher_id: i64,
    ) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            teacher_id: Set(teacher_id),
            classes_attended: Set(String::new()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_enrollment<C>(
        db: &C,
        student_id: i64,
        course_id: i64,
        teacher_id: i64,
    ) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .one(db)
            .await
    }

    pub async fn find_by_student<C>(db: &C, student_id: i64) -> Result<Vec<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub fn tokens(&self) -> Vec<&str> {
        ledger_tokens(&self.classes_attended)
    }

    pub fn attended_count(&self) -> usize {
        self.tokens().len()
    }

    /// Appends one date token to the ledger of enrollment `id`.
    ///
    /// The concatenation happens inside a single UPDATE so concurrent appends
    /// to the same enrollment cannot overwrite each other. Duplicates are kept.
    pub async fn append_token<C>(db: &C, id: i64, token: &str) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let token = token.trim().to_owned();
        let res = Entity::update_many()
            .col_expr(
                Column::ClassesAttended,
                Expr::cust_with_values(
                    "CASE WHEN TRIM(\"classes_attended\") = '' THEN ? \
                     ELSE \"classes_attended\" || ? || ? END",
                    [token.clone(), LEDGER_SEPARATOR.to_owned(), token],
                ),
            )
            .filter(Column::Id.eq(id))
            .exec(db)
            .await?;

        if res.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("Enrollment {id} not found")));
        }
        Ok(())
    }
}
