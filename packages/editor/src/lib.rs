//! # Blockmail Editor
//!
//! Document and state engine for the block-based email builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ registry: component types, defaults, ids    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: document lifecycle + mutations      │
//! │  - Insert / reorder via drop gestures       │
//! │  - Coerce and validate property edits       │
//! │  - Snapshot history (undo/redo)             │
//! │  - Save / load through a template gateway   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: preview canvas + export HTML │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockmail_editor::{EditSession, EditorConfig, Gesture};
//! use blockmail_registry::ComponentType;
//!
//! let mut session = EditSession::new(EditorConfig::default());
//!
//! // Drop a text block, then a button before it
//! session.drop_payload("text", None);
//! let text_id = session.document().components()[0].id().to_string();
//! session.drop_gesture(&Gesture::insert(ComponentType::Button, Some(&text_id)));
//!
//! // Edit
//! session.set_property(&text_id, "fontSize", "20px");
//! session.undo();
//!
//! // Render
//! let html = session.export()?;
//! ```

pub mod coerce;
mod config;
mod document;
mod errors;
mod gesture;
mod history;
mod mutations;
mod notice;
mod persistence;
mod session;

pub use config::EditorConfig;
pub use document::Document;
pub use errors::EditorError;
pub use gesture::{Gesture, GestureOutcome};
pub use history::{History, Snapshot, DEFAULT_HISTORY_LIMIT};
pub use mutations::{Mutation, MutationResult};
pub use notice::{Notice, NoticeKind};
pub use persistence::{
    MemoryGateway, MemoryGatewayError, NewTemplate, Template, TemplateGateway, TemplatePatch,
};
pub use session::{EditSession, TemplateRef};

// Re-export common types for convenience
pub use blockmail_compiler_html::{CompileOptions, Theme};
pub use blockmail_registry::{ComponentInstance, ComponentType, Registry};
