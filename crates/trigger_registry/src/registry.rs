// crates/trigger_registry/src/registry.rs

use std::path::PathBuf;

use thiserror::Error;

use crate::builtin;
use crate::types::{CodeBlockType, MaskType};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Codeblock '{name}' uses '{trigger}' as both its start and end trigger")]
    IdenticalTriggers { name: String, trigger: String },

    #[error("Trigger type '{name}' has an empty trigger string")]
    EmptyTrigger { name: String },

    #[error("Failed to read trigger file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse trigger file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Immutable, insertion-ordered catalog of codeblock and mask types.
///
/// Triggers are not checked for uniqueness or overlap across types: a line
/// matching more than one trigger is reported when it is converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRegistry {
    codeblock_types: Vec<CodeBlockType>,
    mask_types: Vec<MaskType>,
}

impl TriggerRegistry {
    pub fn builder() -> TriggerRegistryBuilder {
        TriggerRegistryBuilder::default()
    }

    /// The built-in `STUDENT_CODE`, `KEY_ONLY` and `MASK_ASSIGNMENT` types.
    pub fn builtin() -> Self {
        Self {
            codeblock_types: builtin::codeblock_types(),
            mask_types: builtin::mask_types(),
        }
    }

    pub fn codeblock_types(&self) -> &[CodeBlockType] {
        &self.codeblock_types
    }

    pub fn mask_types(&self) -> &[MaskType] {
        &self.mask_types
    }

    pub fn is_empty(&self) -> bool {
        self.codeblock_types.is_empty() && self.mask_types.is_empty()
    }
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Default)]
pub struct TriggerRegistryBuilder {
    codeblock_types: Vec<CodeBlockType>,
    mask_types: Vec<MaskType>,
}

impl TriggerRegistryBuilder {
    pub fn codeblock_type(mut self, codeblock_type: CodeBlockType) -> Self {
        self.codeblock_types.push(codeblock_type);
        self
    }

    pub fn mask_type(mut self, mask_type: MaskType) -> Self {
        self.mask_types.push(mask_type);
        self
    }

    /// Appends every built-in type after the ones already added.
    pub fn with_builtin_types(mut self) -> Self {
        self.codeblock_types.extend(builtin::codeblock_types());
        self.mask_types.extend(builtin::mask_types());
        self
    }

    /// Validates each type on its own and freezes the registry.
    pub fn build(self) -> Result<TriggerRegistry, RegistryError> {
        for ty in &self.codeblock_types {
            if ty.start_trigger().is_empty() || ty.end_trigger().is_empty() {
                return Err(RegistryError::EmptyTrigger {
                    name: ty.name().to_string(),
                });
            }
            if ty.start_trigger() == ty.end_trigger() {
                return Err(RegistryError::IdenticalTriggers {
                    name: ty.name().to_string(),
                    trigger: ty.start_trigger().to_string(),
                });
            }
        }
        if let Some(ty) = self.mask_types.iter().find(|ty| ty.trigger().is_empty()) {
            return Err(RegistryError::EmptyTrigger {
                name: ty.name().to_string(),
            });
        }

        Ok(TriggerRegistry {
            codeblock_types: self.codeblock_types,
            mask_types: self.mask_types,
        })
    }
}
