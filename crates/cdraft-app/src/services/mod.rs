//! Service layer for Complaint Drafter
//!
//! Collaborators the wizard talks to through async traits:
//!
//! - [`DocumentStore`]: persist and export drafted complaints
//! - [`FileDocumentStore`]: filesystem implementation writing into one directory

mod document_store;

pub use document_store::{render, DocumentStore, FileDocumentStore, LocalDocumentStore};
