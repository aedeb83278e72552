use db::models::{course, student, taught_course, teacher};
use sea_orm::DatabaseConnection;

pub struct Cohort {
    pub course: course::Model,
    pub teacher: teacher::Model,
    pub taught: taught_course::Model,
}

/// A course taught by one teacher to `section`/`year`.
pub async fn cohort(db: &DatabaseConnection, code: &str, section: &str, year: i32) -> Cohort {
    let course = course::Model::create(db, &format!("Course {code}"), code)
        .await
        .unwrap();
    let teacher = teacher::Model::create(
        db,
        None,
        &format!("Teacher {code}"),
        None,
        &format!("{}@staff.example.com", code.to_lowercase()),
        &format!("T-{code}"),
    )
    .await
    .unwrap();
    let taught =
        taught_course::Model::create(db, course.course_id, teacher.teacher_id, section, year)
            .await
            .unwrap();
    Cohort {
        course,
        teacher,
        taught,
    }
}

pub async fn student(
    db: &DatabaseConnection,
    rfid: &str,
    section: &str,
    year: i32,
) -> student::Model {
    student::Model::create(
        db,
        student::NewStudent {
            user_id: None,
            student_name: format!("Student {rfid}"),
            roll_number: None,
            email: format!("{}@example.com", rfid.to_lowercase()),
            rfid: rfid.to_owned(),
            year,
            dept: "CS".into(),
            section: section.into(),
        },
    )
    .await
    .unwrap()
}
