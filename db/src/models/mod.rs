pub mod attendance_record;
pub mod attendance_session;
pub mod classroom;
pub mod course;
pub mod management;
pub mod student;
pub mod student_course;
pub mod taught_course;
pub mod teacher;
pub mod update_attendance_request;
pub mod user;

pub use attendance_record::Entity as AttendanceRecord;
pub use attendance_session::Entity as AttendanceSession;
pub use classroom::Entity as Classroom;
pub use course::Entity as Course;
pub use management::Entity as Management;
pub use student::Entity as Student;
pub use student_course::Entity as StudentCourse;
pub use taught_course::Entity as TaughtCourse;
pub use teacher::Entity as Teacher;
pub use update_attendance_request::Entity as UpdateAttendanceRequest;
pub use user::Entity as User;
