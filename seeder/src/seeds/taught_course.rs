use crate::seed::Seeder;
use db::models::{course, taught_course, teacher};
use sea_orm::{DatabaseConnection, EntityTrait};

pub struct TaughtCourseSeeder;

pub const SECTIONS: [&str; 2] = ["A", "B"];
pub const YEARS: std::ops::RangeInclusive<i32> = 1..=2;

#[async_trait::async_trait]
impl Seeder for TaughtCourseSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let teachers = teacher::Entity::find().all(db).await.unwrap_or_default();
        if teachers.is_empty() {
            return;
        }
        let courses = course::Entity::find().all(db).await.unwrap_or_default();

        for c in &courses {
            for year in YEARS {
                for section in SECTIONS {
                    let existing =
                        taught_course::Model::find_for_cohort(db, c.course_id, year, section)
                            .await
                            .ok()
                            .flatten();
                    if existing.is_some() {
                        continue;
                    }
                    let t = &teachers[fastrand::usize(..teachers.len())];
                    let _ =
                        taught_course::Model::create(db, c.course_id, t.teacher_id, section, year)
                            .await;
                }
            }
        }
    }
}
