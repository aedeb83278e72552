use api::auth::generate_jwt;
use api::routes::routes;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use db::models::{course, taught_course, user::UserRole};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use services::auth::{self, Profile, RegisterManagement, RegisterStudent, RegisterTeacher};
use tower::ServiceExt;
use util::config::AppConfig;
use util::state::AppState;

pub const PASSWORD: &str = "Passw0rdOK";

/// Router over a freshly migrated in-memory database.
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

pub async fn make_test_app() -> TestApp {
    AppConfig::set_jwt_secret("test-secret");

    let db = setup_test_db().await;
    let router = Router::new().nest("/api", routes(AppState::new(db.clone())));
    TestApp { router, db }
}

/// A registered account plus an access token for it.
pub struct Actor {
    pub profile: Profile,
    pub token: String,
}

fn token_for(profile: &Profile) -> String {
    generate_jwt(profile.user_id, profile.role).unwrap().0
}

impl TestApp {
    /// Sends a request and returns the status with the parsed JSON body.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(json) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn teacher(&self, name: &str, rfid: &str) -> Actor {
        let profile = auth::register_teacher(
            &self.db,
            RegisterTeacher {
                email: format!("{name}@staff.example.com"),
                password: PASSWORD.into(),
                password2: PASSWORD.into(),
                teacher_name: name.into(),
                teacher_code: None,
                rfid: rfid.into(),
            },
        )
        .await
        .unwrap();
        Actor {
            token: token_for(&profile),
            profile,
        }
    }

    pub async fn student(
        &self,
        name: &str,
        rfid: &str,
        section: &str,
        year: i32,
        courses: &[&str],
    ) -> Actor {
        let profile = auth::register_student(
            &self.db,
            RegisterStudent {
                email: format!("{name}@example.com"),
                password: PASSWORD.into(),
                password2: PASSWORD.into(),
                student_name: name.into(),
                roll_number: None,
                rfid: rfid.into(),
                year,
                dept: "CSE".into(),
                section: section.into(),
                courses: courses.iter().map(|c| c.to_string()).collect(),
            },
        )
        .await
        .unwrap();
        Actor {
            token: token_for(&profile),
            profile,
        }
    }

    pub async fn manager(&self, name: &str) -> Actor {
        let profile = auth::register_management(
            &self.db,
            RegisterManagement {
                email: format!("{name}@office.example.com"),
                password: PASSWORD.into(),
                password2: PASSWORD.into(),
                management_name: name.into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(profile.role, UserRole::Management);
        Actor {
            token: token_for(&profile),
            profile,
        }
    }

    /// Creates a course and assigns `teacher` to it for the cohort.
    pub async fn assign(
        &self,
        code: &str,
        teacher: &Actor,
        section: &str,
        year: i32,
    ) -> (course::Model, taught_course::Model) {
        let course = course::Model::create(&self.db, &format!("Course {code}"), code)
            .await
            .unwrap();
        let taught = taught_course::Model::create(
            &self.db,
            course.course_id,
            teacher.profile.profile_id,
            section,
            year,
        )
        .await
        .unwrap();
        (course, taught)
    }
}
