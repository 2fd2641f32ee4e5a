//! Testing infrastructure for stockdesk integration tests.
//!
//! - `MockBackend`: an in-process HTTP server that behaves like the inventory
//!   backend, records every request, and accepts canned overrides
//! - `fixtures`: credentials and seed data the mock serves

pub mod backend;
pub mod fixtures;

pub use backend::{MockBackend, MockBody, RecordedRequest};
