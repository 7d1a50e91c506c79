//! `fiesta-core` — shared foundation for the fiesta workspace.
//!
//! This crate contains **pure building blocks** (no IO, no async): the
//! application error taxonomy and the strongly-typed identifiers that cross
//! crate boundaries.

pub mod error;
pub mod id;

pub use error::{AppError, AppResult, FieldError, ValidationErrors};
pub use id::{EventId, UserId, Username};
