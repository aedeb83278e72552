pub mod app;

pub use app::{Actor, TestApp, make_test_app};
