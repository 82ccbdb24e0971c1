// crates/line_converter/src/lib.rs

//! Line-oriented conversion of solution text into its student version.
//!
//! Two state machines run side by side over the input lines: one for
//! multi-line codeblocks, one for single-line masks. The converter merges
//! their state into a decision per line (emit, replace or suppress).
//! Triggers are plain substrings, so a trigger inside a string literal or an
//! unrelated comment is treated like any other annotation.

mod codeblock;
mod converter;
mod error;
mod mask;

pub use codeblock::BlockStateMachine;
pub use converter::{convert_lines, convert_text, LineConverter};
pub use error::{ConversionError, TriggerError, TriggerFamily};
pub use mask::MaskStateMachine;

/// How a state machine's activity changed for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Activated,
    Deactivated,
    Unchanged,
}
