//! Markdown formatting for engine output.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! results that are not models of their own, such as validation reports and
//! pool listings, get newtype or snapshot wrappers (see [`reports`]).
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (session, plan) │───▶│ (report, pools) │───▶│ (terminal/MCP)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! All output follows the same structure: a header, metadata bullets, then
//! the content (a numbered exercise list for sessions).

pub mod models;
pub mod reports;

pub use reports::{PoolListing, ValidationReport};
