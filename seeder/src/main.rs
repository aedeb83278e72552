use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    classroom::ClassroomSeeder, course::CourseSeeder, management::ManagementSeeder,
    student::StudentSeeder, taught_course::TaughtCourseSeeder, teacher::TeacherSeeder,
};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }

    for (seeder, name) in [
        (Box::new(CourseSeeder) as Box<dyn Seeder + Send + Sync>, "Course"),
        (Box::new(ClassroomSeeder), "Classroom"),
        (Box::new(ManagementSeeder), "Management"),
        (Box::new(TeacherSeeder), "Teacher"),
        (Box::new(TaughtCourseSeeder), "TaughtCourse"),
        (Box::new(StudentSeeder), "Student"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
