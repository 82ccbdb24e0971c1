// crates/line_converter/src/error.rs

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerFamily {
    CodeBlock,
    Mask,
}

impl fmt::Display for TriggerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerFamily::CodeBlock => f.write_str("codeblock"),
            TriggerFamily::Mask => f.write_str("mask"),
        }
    }
}

/// Malformed annotations, or a state machine used outside its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("Line contains multiple {family} triggers: {line:?}")]
    MultipleTriggers { family: TriggerFamily, line: String },

    #[error("Tried to open codeblock '{requested}' while '{active}' is still open")]
    NestedBlock { active: String, requested: String },

    #[error(
        "Tried to activate mask '{requested}' while '{active}' is still active; \
         masks must be separated by a blank line"
    )]
    NestedMask { active: String, requested: String },

    #[error(
        "Expected to close codeblock '{}', but found the end trigger of '{found}'",
        .active.as_deref().unwrap_or("<none>")
    )]
    MismatchedBlockEnd { active: Option<String>, found: String },

    #[error("Codeblock '{name}' is not closed")]
    UnclosedBlock { name: String },

    #[error("No codeblock is currently active")]
    NoActiveBlock,

    #[error("No mask is currently active")]
    NoActiveMask,

    #[error(
        "Start character '{start_char}' of mask '{name}' not found in masked line: {line:?}"
    )]
    MaskStartCharNotFound {
        name: String,
        start_char: char,
        line: String,
    },

    #[error("Codeblock '{block}' and mask '{mask}' are active on the same line")]
    ConflictingState { block: String, mask: String },
}

/// A [`TriggerError`] tagged with the 1-based line it was raised on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: {kind}")]
pub struct ConversionError {
    pub line_number: usize,
    pub kind: TriggerError,
}

impl ConversionError {
    pub fn new(line_number: usize, kind: TriggerError) -> Self {
        Self { line_number, kind }
    }

    pub fn kind(&self) -> &TriggerError {
        &self.kind
    }
}
