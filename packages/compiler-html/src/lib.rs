//! # Blockmail HTML Compiler
//!
//! Turns a component sequence into markup, two ways:
//!
//! - [`render_preview`]: editor canvas markup (selection frame, action buttons,
//!   empty-state placeholder)
//! - [`compile_export`]: standalone email-safe HTML document
//!
//! Both go through [`render_fragment`], so the per-type content is the same
//! in either output.

mod compiler;
mod context;
mod fragments;
mod icons;
mod preview;
mod theme;


pub use compiler::compile_export;
pub use fragments::render_fragment;
pub use preview::render_preview;
pub use theme::Theme;

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// `<title>` of the exported document
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: "Template".to_string(),
        }
    }
}
