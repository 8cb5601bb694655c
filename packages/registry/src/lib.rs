//! # Blockmail Registry
//!
//! The typed component model shared by the editor and the HTML compiler:
//!
//! - [`ComponentType`]: closed set of block kinds
//! - [`Props`] / [`PropValue`]: per-instance property storage
//! - [`Registry`]: property shape and defaults of each type
//! - [`ComponentInstance`]: one placed block
//! - [`IdGenerator`]: instance identity

mod component_type;
mod error;
mod id_generator;
mod instance;
mod props;
mod registry;
mod schema;

pub use component_type::ComponentType;
pub use error::RegistryError;
pub use id_generator::{get_seed, IdGenerator, ID_PREFIX};
pub use instance::ComponentInstance;
pub use props::{record, PropValue, Props, Record, RecordField};
pub use registry::{Entry, Registry};
pub use schema::{is_hex_color, FieldKind, FieldSpec, RecordKey};
