//! cdraft-app - Wizard state and orchestration for Complaint Drafter
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! drafting wizard, the Engine abstraction that owns timers and the message
//! channel, configuration loading, and the document store service.

pub mod actions;
pub mod config;
pub mod counts;
pub mod editor;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod message;
pub mod process;
pub mod services;
pub mod state;

// Re-export primary types
pub use counts::CountList;
pub use editor::{EditOutcome, EditSession, EditTarget, SectionEditor};
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{update, UpdateAction, UpdateResult};
pub use message::Message;
pub use services::{DocumentStore, FileDocumentStore, LocalDocumentStore};
pub use state::{AppState, Notice, NoticeLevel, OperationId, OperationKind, PendingOperation, View};
