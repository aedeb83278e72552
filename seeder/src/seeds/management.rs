use crate::seed::{SEED_PASSWORD, Seeder};
use sea_orm::DatabaseConnection;
use services::auth::{RegisterManagement, register_management};

pub struct ManagementSeeder;

#[async_trait::async_trait]
impl Seeder for ManagementSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let _ = register_management(
            db,
            RegisterManagement {
                email: "admin@example.com".into(),
                password: SEED_PASSWORD.into(),
                password2: SEED_PASSWORD.into(),
                management_name: "Registrar Office".into(),
            },
        )
        .await;
    }
}
