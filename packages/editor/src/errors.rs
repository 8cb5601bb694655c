//! Error types for the editor

use crate::Notice;
use blockmail_registry::RegistryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to {action}: {message}")]
    Gateway {
        action: &'static str,
        message: String,
    },

    #[error("Document has no components")]
    EmptyDocument,

    #[error("Template name is required")]
    NameRequired,
}

impl EditorError {
    /// Wrap a persistence failure from any gateway implementation.
    ///
    /// `action` completes "Failed to ..." (e.g. `"save template"`).
    pub fn gateway(action: &'static str, err: impl std::fmt::Display) -> Self {
        EditorError::Gateway {
            action,
            message: err.to_string(),
        }
    }

    /// User-facing notice for this failure
    pub fn notice(&self) -> Notice {
        match self {
            EditorError::EmptyDocument => {
                Notice::error("No components", "Add some components to your email first")
            }
            EditorError::NameRequired => {
                Notice::error("Name required", "Please enter a name for your template")
            }
            EditorError::Registry(err) => Notice::error("Error", err.to_string()),
            EditorError::Gateway { action, .. } => {
                Notice::error("Error", format!("Failed to {}", action))
            }
        }
    }
}
