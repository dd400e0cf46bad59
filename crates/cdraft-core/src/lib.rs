//! # cdraft-core - Core Domain Types
//!
//! Foundation crate for Complaint Drafter. Provides domain types, error
//! handling, logging setup, fixture data sources and the content generator.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`, `document`)
//! - [`Blueprint`] - Template choice that starts the wizard
//! - [`Count`] - A claim under consideration
//! - [`DraftedComplaint`] - The generated document
//! - [`ComplaintSection`], [`SectionId`] - Addressable blocks of the document
//!
//! ### Content Generation (`claims`, `generator`)
//! - [`ClaimType`] - Closed set of known legal theories
//! - [`ContentGenerator`] - Assembles a complaint from selected counts
//! - [`regenerate_count()`] - Rebuild one count after a title change
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use cdraft_core::prelude::*;
//! ```

pub mod claims;
pub mod document;
pub mod error;
pub mod fixtures;
pub mod generator;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all Complaint Drafter crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use claims::ClaimType;
pub use document::{
    paragraph_numbers, ComplaintSection, DraftedComplaint, NumberingIssue, ParagraphSpan,
    SectionId, SectionKind, SupportingInfo,
};
pub use error::{Error, Result, ResultExt};
pub use generator::{
    generate, incorporation_paragraph, ordinal_word, regenerate_count, Clock, ContentGenerator,
    SystemClock, DEFAULT_DATE_FORMAT,
};
pub use types::{Blueprint, Count, ExportFormat};
