mod attendance_test;
mod auth_test;
mod catalogue_test;
mod enrollment_test;
mod guards_test;
mod health_test;
mod requests_test;
mod roster_test;
