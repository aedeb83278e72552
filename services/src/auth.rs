//! Account registration, credential checks and profile lookup.

use common::validate_password_strength;
use db::models::{
    course, management, student, student_course, taught_course, teacher,
    user::{self, UserRole},
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterStudent {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password2: String,
    #[validate(length(min = 1, message = "Student name is required"))]
    pub student_name: String,
    pub roll_number: Option<String>,
    #[validate(length(min = 1, message = "RFID is required"))]
    pub rfid: String,
    #[validate(range(min = 1, message = "Year must be positive"))]
    pub year: i32,
    #[validate(length(min = 1, message = "Department is required"))]
    pub dept: String,
    #[validate(length(min = 1, message = "Section is required"))]
    pub section: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterTeacher {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password2: String,
    #[validate(length(min = 1, message = "Teacher name is required"))]
    pub teacher_name: String,
    pub teacher_code: Option<String>,
    #[validate(length(min = 1, message = "RFID is required"))]
    pub rfid: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterManagement {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password2: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub management_name: String,
}

/// The profile behind an authenticated account.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Profile {
    pub user_id: i64,
    pub role: UserRole,
    pub profile_id: i64,
    pub name: String,
    pub email: String,
}

fn label(role: UserRole) -> &'static str {
    match role {
        UserRole::Student => "Student",
        UserRole::Teacher => "Teacher",
        UserRole::Management => "Management",
    }
}

async fn ensure_email_free(db: &DatabaseConnection, email: &str) -> ServiceResult<()> {
    if user::Model::email_exists(db, email).await? {
        return Err(ServiceError::Conflict(
            "A user with this email already exists".into(),
        ));
    }
    Ok(())
}

pub async fn register_student(
    db: &DatabaseConnection,
    req: RegisterStudent,
) -> ServiceResult<Profile> {
    req.validate()?;
    ensure_email_free(db, &req.email).await?;

    if student::Model::find_by_rfid(db, &req.rfid).await?.is_some() {
        return Err(ServiceError::Conflict(
            "A student with this RFID already exists".into(),
        ));
    }

    let (courses, missing) = course::Model::resolve_codes(db, &req.courses).await?;
    if !missing.is_empty() {
        return Err(ServiceError::Validation(format!(
            "Unknown course codes: {}",
            missing.join(", ")
        )));
    }

    let txn = db.begin().await?;

    let account = user::Model::create(&txn, &req.email, &req.password, UserRole::Student).await?;
    let profile = student::Model::create(
        &txn,
        student::NewStudent {
            user_id: Some(account.id),
            student_name: req.student_name.trim().to_owned(),
            roll_number: req
                .roll_number
                .map(|r| r.trim().to_owned())
                .filter(|r| !r.is_empty()),
            email: account.email.clone(),
            rfid: req.rfid.trim().to_owned(),
            year: req.year,
            dept: req.dept.trim().to_owned(),
            section: req.section.trim().to_owned(),
        },
    )
    .await?;

    for c in &courses {
        let Some(tc) =
            taught_course::Model::find_for_cohort(&txn, c.course_id, profile.year, &profile.section)
                .await?
        else {
            continue;
        };
        let existing = student_course::Model::find_enrollment(
            &txn,
            profile.student_id,
            c.course_id,
            tc.teacher_id,
        )
        .await?;
        if existing.is_none() {
            student_course::Model::create(&txn, profile.student_id, c.course_id, tc.teacher_id)
                .await?;
        }
    }

    txn.commit().await?;

    info!(user_id = account.id, student_id = profile.student_id, "Student registered");

    Ok(Profile {
        user_id: account.id,
        role: UserRole::Student,
        profile_id: profile.student_id,
        name: profile.student_name,
        email: account.email,
    })
}

pub async fn register_teacher(
    db: &DatabaseConnection,
    req: RegisterTeacher,
) -> ServiceResult<Profile> {
    req.validate()?;
    ensure_email_free(db, &req.email).await?;

    let rfid_taken = teacher::Entity::find()
        .filter(teacher::Column::Rfid.eq(req.rfid.trim()))
        .one(db)
        .await?
        .is_some();
    if rfid_taken {
        return Err(ServiceError::Conflict(
            "A teacher with this RFID already exists".into(),
        ));
    }

    let txn = db.begin().await?;
    let account = user::Model::create(&txn, &req.email, &req.password, UserRole::Teacher).await?;
    let profile = teacher::Model::create(
        &txn,
        Some(account.id),
        req.teacher_name.trim(),
        req.teacher_code.map(|c| c.trim().to_owned()).filter(|c| !c.is_empty()),
        &account.email,
        req.rfid.trim(),
    )
    .await?;
    txn.commit().await?;

    info!(user_id = account.id, teacher_id = profile.teacher_id, "Teacher registered");

    Ok(Profile {
        user_id: account.id,
        role: UserRole::Teacher,
        profile_id: profile.teacher_id,
        name: profile.teacher_name,
        email: account.email,
    })
}

pub async fn register_management(
    db: &DatabaseConnection,
    req: RegisterManagement,
) -> ServiceResult<Profile> {
    req.validate()?;
    ensure_email_free(db, &req.email).await?;

    let txn = db.begin().await?;
    let account =
        user::Model::create(&txn, &req.email, &req.password, UserRole::Management).await?;
    let profile = management::Model::create(
        &txn,
        Some(account.id),
        req.management_name.trim(),
        &account.email,
    )
    .await?;
    txn.commit().await?;

    info!(
        user_id = account.id,
        management_id = profile.management_id,
        "Management account registered"
    );

    Ok(Profile {
        user_id: account.id,
        role: UserRole::Management,
        profile_id: profile.management_id,
        name: profile.management_name,
        email: account.email,
    })
}

/// Checks credentials and returns the `role` profile behind them.
///
/// Wrong credentials are `Unauthorized`; a valid account without a profile
/// of the requested kind is `NotFound`.
pub async fn login(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    role: UserRole,
) -> ServiceResult<Profile> {
    let account = user::Model::verify_credentials(db, email, password)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized("Invalid email or password".into()))?;

    profile_as(db, &account, role).await
}

/// Profile for the account's own role.
pub async fn profile_for(db: &DatabaseConnection, user_id: i64) -> ServiceResult<Profile> {
    let account = user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
    profile_as(db, &account, account.role).await
}

async fn profile_as(
    db: &DatabaseConnection,
    account: &user::Model,
    role: UserRole,
) -> ServiceResult<Profile> {
    let not_found =
        || ServiceError::NotFound(format!("{} profile not found for this user", label(role)));

    let (profile_id, name) = match role {
        UserRole::Student => student::Model::find_by_user_id(db, account.id)
            .await?
            .map(|p| (p.student_id, p.student_name)),
        UserRole::Teacher => teacher::Model::find_by_user_id(db, account.id)
            .await?
            .map(|p| (p.teacher_id, p.teacher_name)),
        UserRole::Management => management::Model::find_by_user_id(db, account.id)
            .await?
            .map(|p| (p.management_id, p.management_name)),
    }
    .ok_or_else(not_found)?;

    Ok(Profile {
        user_id: account.id,
        role,
        profile_id,
        name,
        email: account.email.clone(),
    })
}

/// Student profile linked to `user_id`, or `Forbidden`.
pub async fn student_for_user<C>(db: &C, user_id: i64) -> ServiceResult<student::Model>
where
    C: ConnectionTrait,
{
    student::Model::find_by_user_id(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::Forbidden("No student profile linked to this account".into()))
}

/// Teacher profile linked to `user_id`, or `Forbidden`.
pub async fn teacher_for_user<C>(db: &C, user_id: i64) -> ServiceResult<teacher::Model>
where
    C: ConnectionTrait,
{
    teacher::Model::find_by_user_id(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::Forbidden("No teacher profile linked to this account".into()))
}

/// Management profile linked to `user_id`, or `Forbidden`.
pub async fn management_for_user<C>(db: &C, user_id: i64) -> ServiceResult<management::Model>
where
    C: ConnectionTrait,
{
    management::Model::find_by_user_id(db, user_id)
        .await?
        .ok_or_else(|| {
            ServiceError::Forbidden("No management profile linked to this account".into())
        })
}
