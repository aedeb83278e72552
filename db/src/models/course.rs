use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub course_id: i64,
    pub course_name: String,
    /// Unique short code, e.g. `CS101`.
    pub course_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::taught_course::Entity")]
    TaughtCourses,
}

impl Related<super::taught_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaughtCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(db: &C, name: &str, code: &str) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            course_name: Set(name.trim().to_owned()),
            course_code: Set(code.trim().to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_code<C>(db: &C, code: &str) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::CourseCode.eq(code.trim()))
            .one(db)
            .await
    }

    /// Resolves a list of course codes.
    ///
    /// Returns the matching courses and the codes that matched nothing, sorted
    /// and de-duplicated.
    pub async fn resolve_codes<C>(
        db: &C,
        codes: &[String],
    ) -> Result<(Vec<Self>, Vec<String>), DbErr>
    where
        C: ConnectionTrait,
    {
        let wanted: Vec<String> = codes.iter().map(|c| c.trim().to_owned()).collect();
        if wanted.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let found = Entity::find()
            .filter(Column::CourseCode.is_in(wanted.clone()))
            .order_by_asc(Column::CourseId)
            .all(db)
            .await?;

        let mut missing: Vec<String> = wanted
            .into_iter()
            .filter(|code| !found.iter().any(|c| &c.course_code == code))
            .collect();
        missing.sort();
        missing.dedup();

        Ok((found, missing))
    }
}
