use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510010001_create_users::Migration),
            Box::new(migrations::m202510010002_create_courses::Migration),
            Box::new(migrations::m202510010003_create_students::Migration),
            Box::new(migrations::m202510010004_create_teachers::Migration),
            Box::new(migrations::m202510010005_create_management::Migration),
            Box::new(migrations::m202510010006_create_classrooms::Migration),
            Box::new(migrations::m202510010007_create_taught_courses::Migration),
            Box::new(migrations::m202510010008_create_student_courses::Migration),
            Box::new(migrations::m202510010009_create_attendance::Migration),
            Box::new(migrations::m202510010010_create_update_attendance_requests::Migration),
        ]
    }
}
