//! Diagnostics for the PFA scoring engine.
//!
//! Loading a document either succeeds or produces diagnostics that carry:
//! - a stable error code for searchability
//! - a message saying what went wrong
//! - the document position, when the loader knows it
//! - notes with supporting detail (for example every rejected signature)

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
