use crate::seed::{SEED_PASSWORD, Seeder, random_rfid};
use fake::{Fake, faker::internet::en::SafeEmail, faker::name::en::Name};
use sea_orm::DatabaseConnection;
use services::auth::{RegisterTeacher, register_teacher};

pub struct TeacherSeeder;

fn account(email: String, name: String, code: String, rfid: String) -> RegisterTeacher {
    RegisterTeacher {
        email,
        password: SEED_PASSWORD.into(),
        password2: SEED_PASSWORD.into(),
        teacher_name: name,
        teacher_code: Some(code),
        rfid,
    }
}

#[async_trait::async_trait]
impl Seeder for TeacherSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Fixed teacher for manual testing
        let _ = register_teacher(
            db,
            account(
                "teacher@example.com".into(),
                "Grace Hopper".into(),
                "T-0001".into(),
                "T0000001".into(),
            ),
        )
        .await;

        for n in 2..=6 {
            let email: String = SafeEmail().fake();
            let name: String = Name().fake();
            let _ = register_teacher(
                db,
                account(email, name, format!("T-{n:04}"), random_rfid()),
            )
            .await;
        }
    }
}
