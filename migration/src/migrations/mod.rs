pub mod m202510010001_create_users;
pub mod m202510010002_create_courses;
pub mod m202510010003_create_students;
pub mod m202510010004_create_teachers;
pub mod m202510010005_create_management;
pub mod m202510010006_create_classrooms;
pub mod m202510010007_create_taught_courses;
pub mod m202510010008_create_student_courses;
pub mod m202510010009_create_attendance;
pub mod m202510010010_create_update_attendance_requests;
