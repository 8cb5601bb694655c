pub mod compile;
pub mod init;
pub mod new;
pub mod preview;
pub mod set;
pub mod templates;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use new::{new, NewArgs};
pub use preview::{preview, PreviewArgs};
pub use set::{set, SetArgs};
pub use templates::{templates, TemplatesArgs};
