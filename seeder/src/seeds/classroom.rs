use crate::seed::Seeder;
use db::models::classroom;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

pub struct ClassroomSeeder;

#[async_trait::async_trait]
impl Seeder for ClassroomSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        for room in 1..=6 {
            let _ = classroom::ActiveModel {
                scanner_id: Set(format!("SCN-{:03}", 100 + room)),
                ..Default::default()
            }
            .insert(db)
            .await;
        }
    }
}
