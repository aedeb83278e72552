//! Two-factor attendance engine.
//!
//! A student counts as present in a session once both an RFID badge scan and a
//! QR code scan have been recorded for them, in either order. The pieces:
//!
//! - [`registry`] opens and closes sessions and hands out the QR payload.
//! - [`scan`] validates and records individual badge/code scans.
//! - [`resolver`] turns a record with both factors into a presence, once.
//! - [`ledger`] appends the session date to the student's enrollment log.
//! - [`statistics`] aggregates per-session counts.

pub mod ledger;
pub mod registry;
pub mod resolver;
pub mod scan;
pub mod statistics;

pub use db::models::attendance_record::Factor;
pub use registry::OpenSession;
pub use scan::ScanOutcome;
pub use statistics::SessionSummary;
