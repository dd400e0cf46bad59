//! Complaint Drafter Library
//!
//! Headless front end for the drafting wizard: stdin command parsing and the
//! NDJSON event runner. Wizard state lives in `cdraft-app`, domain types and
//! content generation in `cdraft-core`.

pub mod commands;
pub mod headless;

// Re-export main entry point
pub use headless::runner::run_headless;
