pub mod classroom;
pub mod course;
pub mod management;
pub mod student;
pub mod taught_course;
pub mod teacher;
