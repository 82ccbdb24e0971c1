// crates/trigger_registry/src/trigger_file.rs

//! TOML trigger files.
//!
//! ```toml
//! include_builtin = true
//!
//! [[codeblock]]
//! name = "Hidden Tests"
//! start_trigger = "HIDDEN_TESTS_START"
//! end_trigger = "HIDDEN_TESTS_END"
//! replacement = ""
//!
//! [[mask]]
//! name = "Return Value"
//! trigger = "MASK_RETURN"
//! start_char = "r"
//! replacement = "return None  # TODO"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::registry::{RegistryError, TriggerRegistry};
use crate::types::{CodeBlockType, MaskType};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TriggerFile {
    #[serde(default)]
    include_builtin: bool,
    #[serde(default)]
    codeblock: Vec<CodeBlockEntry>,
    #[serde(default)]
    mask: Vec<MaskEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CodeBlockEntry {
    name: String,
    start_trigger: String,
    end_trigger: String,
    #[serde(default)]
    replacement: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MaskEntry {
    name: String,
    trigger: String,
    start_char: char,
    replacement: String,
}

impl TriggerRegistry {
    /// Loads a registry from a TOML trigger file. File entries come first;
    /// `include_builtin = true` appends the built-in types after them.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TriggerFile = toml::from_str(&content).map_err(|source| RegistryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut builder = TriggerRegistry::builder();
        for entry in file.codeblock {
            builder = builder.codeblock_type(CodeBlockType::new(
                entry.name,
                entry.start_trigger,
                entry.end_trigger,
                entry.replacement,
            ));
        }
        for entry in file.mask {
            builder = builder.mask_type(MaskType::new(
                entry.name,
                entry.trigger,
                entry.start_char,
                entry.replacement,
            ));
        }
        if file.include_builtin {
            builder = builder.with_builtin_types();
        }
        builder.build()
    }
}
