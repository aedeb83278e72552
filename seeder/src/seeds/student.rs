use crate::seed::{SEED_PASSWORD, Seeder, random_rfid};
use crate::seeds::course::COURSES;
use crate::seeds::taught_course::{SECTIONS, YEARS};
use fake::{Fake, faker::internet::en::SafeEmail, faker::name::en::Name};
use sea_orm::DatabaseConnection;
use services::auth::{RegisterStudent, register_student};

pub struct StudentSeeder;

const DEPTS: [&str; 3] = ["CSE", "ECE", "MATH"];

/// Each student picks four of the seeded courses; registration enrolls them
/// with whichever teacher covers their cohort.
fn pick_courses() -> Vec<String> {
    let mut codes: Vec<String> = COURSES.iter().map(|(code, _)| code.to_string()).collect();
    fastrand::shuffle(&mut codes);
    codes.truncate(4);
    codes
}

#[async_trait::async_trait]
impl Seeder for StudentSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Fixed student for manual testing
        let _ = register_student(
            db,
            RegisterStudent {
                email: "student@example.com".into(),
                password: SEED_PASSWORD.into(),
                password2: SEED_PASSWORD.into(),
                student_name: "Ada Lovelace".into(),
                roll_number: Some("R-0001".into()),
                rfid: "S0000001".into(),
                year: 1,
                dept: "CSE".into(),
                section: "A".into(),
                courses: COURSES.iter().map(|(code, _)| code.to_string()).collect(),
            },
        )
        .await;

        for n in 2..=40 {
            let email: String = SafeEmail().fake();
            let name: String = Name().fake();
            let _ = register_student(
                db,
                RegisterStudent {
                    email,
                    password: SEED_PASSWORD.into(),
                    password2: SEED_PASSWORD.into(),
                    student_name: name,
                    roll_number: Some(format!("R-{n:04}")),
                    rfid: random_rfid(),
                    year: fastrand::i32(YEARS),
                    dept: DEPTS[fastrand::usize(..DEPTS.len())].into(),
                    section: SECTIONS[fastrand::usize(..SECTIONS.len())].into(),
                    courses: pick_courses(),
                },
            )
            .await;
        }
    }
}
