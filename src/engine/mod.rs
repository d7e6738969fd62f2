//! Weekly timesheet rule engine.
//!
//! Pure, HTTP-free computation: every function here is deterministic over its
//! arguments so the whole engine can be unit-tested without a database or a
//! running server. The `api` layer owns persistence and presentation.

pub mod aggregate;
pub mod enforce;
pub mod error;
pub mod grid;
pub mod policy;
pub mod reconcile;
pub mod timecodec;
pub mod validate;

pub use error::EngineError;
