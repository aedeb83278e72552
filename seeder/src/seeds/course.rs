use crate::seed::Seeder;
use db::models::course::Model;
use sea_orm::DatabaseConnection;

pub struct CourseSeeder;

pub const COURSES: [(&str, &str); 8] = [
    ("CS101", "Programming Fundamentals"),
    ("CS102", "Discrete Mathematics"),
    ("CS201", "Data Structures"),
    ("CS202", "Computer Organization"),
    ("CS301", "Operating Systems"),
    ("CS302", "Database Systems"),
    ("MA101", "Linear Algebra"),
    ("MA201", "Probability and Statistics"),
];

#[async_trait::async_trait]
impl Seeder for CourseSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        for (code, name) in COURSES {
            // Codes are unique; reruns leave existing rows alone.
            let _ = Model::create(db, name, code).await;
        }
    }
}
