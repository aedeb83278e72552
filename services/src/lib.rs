pub mod attendance;
pub mod auth;
pub mod enrollment;
pub mod error;
pub mod requests;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::{ServiceError, ServiceResult};
