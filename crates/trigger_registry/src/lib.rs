// crates/trigger_registry/src/lib.rs

//! Catalog of the trigger definitions that drive the student-version
//! converter: multi-line codeblocks and single-line masks.

pub mod builtin;
mod registry;
mod trigger_file;
mod types;

pub use registry::{RegistryError, TriggerRegistry, TriggerRegistryBuilder};
pub use types::{CodeBlockType, MaskType};
