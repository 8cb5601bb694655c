//! Error types for the component registry

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The requested tag is not part of the catalog. This is a schema defect,
    /// never a user-input problem.
    #[error("Unknown component type: {0}")]
    UnknownType(String),
}

impl RegistryError {
    pub fn unknown_type(tag: impl Into<String>) -> Self {
        Self::UnknownType(tag.into())
    }
}
