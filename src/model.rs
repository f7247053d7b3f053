//! Core data model for Herald.
//!
//! Plain values: the execution context a message is resolved against,
//! the status catalog, and display fields before and after resolution.

mod context;
mod field;
mod status;

pub use context::{ExecutionContext, TriggerEvent};
pub use field::{FieldKeyword, FieldSpec, Markup, ResolvedField};
pub use status::{HexColor, Status, StatusEntry};
