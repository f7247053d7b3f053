//! Keyword resolution: turn field lines and text templates into display values.
//!
//! Resolution is a pure function of an [`ExecutionContext`](crate::model::ExecutionContext)
//! snapshot, the status entry, and the template. Nothing here reads the environment.
//!
//! Failure policy differs by keyword on purpose:
//!
//! - Link-building keywords (`{REF}`, `{GITHUB_ACTOR}`, `{GITHUB_JOB}`) fail with
//!   [`ResolveError::MissingContext`] when a value they need is absent.
//! - `{GITHUB_REF}` in text degrades to whatever it can link, and stays as
//!   written when there is no repository to link.
//! - Unknown tokens and malformed field lines are never errors.

mod field;
mod link;
mod text;

pub use field::{parse_field_line, resolve_field};
pub use text::resolve_text;

/// Errors that can occur while resolving keywords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A context value needed to build a link is absent.
    #[error("GitHub {0} context is undefined")]
    MissingContext(&'static str),
}

pub type Result<T> = core::result::Result<T, ResolveError>;
