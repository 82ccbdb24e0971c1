// crates/line_converter/src/converter.rs

use trigger_registry::TriggerRegistry;

use crate::codeblock::BlockStateMachine;
use crate::error::{ConversionError, TriggerError};
use crate::mask::MaskStateMachine;
use crate::Transition;

/// What to emit for one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    BlockReplacement,
    MaskedLine,
    Line,
    Suppress,
}

/// Activity of both machines before (`was_*`) and after the current line.
#[derive(Debug, Clone, Copy, Default)]
struct Activity {
    block: bool,
    mask: bool,
}

fn resolve(was: Activity, now: Activity) -> Action {
    if !was.block && now.block {
        Action::BlockReplacement
    } else if !was.mask && now.mask {
        Action::MaskedLine
    } else if !was.block && !now.block && !was.mask && !now.mask {
        Action::Line
    } else {
        Action::Suppress
    }
}

/// Converts line sequences against a shared, read-only registry.
///
/// Each call builds its own pair of state machines, so one converter can be
/// reused across files without state leaking between them.
#[derive(Debug, Clone, Copy)]
pub struct LineConverter<'r> {
    registry: &'r TriggerRegistry,
}

impl<'r> LineConverter<'r> {
    pub fn new(registry: &'r TriggerRegistry) -> Self {
        Self { registry }
    }

    /// Runs one conversion pass over `lines`.
    ///
    /// Every line is expected to carry its own terminator; the returned
    /// strings concatenate into the converted text. Stops at the first error.
    pub fn convert_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<String>, ConversionError> {
        let mut blocks = BlockStateMachine::new(self.registry.codeblock_types());
        let mut masks = MaskStateMachine::new(self.registry.mask_types());
        let mut output = Vec::with_capacity(lines.len());
        let mut was = Activity::default();

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let line_number = index + 1;
            let at_line = |kind: TriggerError| ConversionError::new(line_number, kind);

            let block_transition = blocks.on_line(line).map_err(at_line)?;
            let mask_transition = masks.on_line(line).map_err(at_line)?;
            log_transition("codeblock", line_number, block_transition);
            log_transition("mask", line_number, mask_transition);

            let now = Activity {
                block: blocks.is_active(),
                mask: masks.is_active(),
            };
            if let (Some(block), Some(mask)) = (blocks.active_type(), masks.active_type()) {
                return Err(at_line(TriggerError::ConflictingState {
                    block: block.name().to_string(),
                    mask: mask.name().to_string(),
                }));
            }

            match resolve(was, now) {
                Action::BlockReplacement => {
                    output.push(blocks.current_replacement().map_err(at_line)?)
                }
                Action::MaskedLine => output.push(masks.masked_line(line).map_err(at_line)?),
                Action::Line => output.push(line.to_string()),
                Action::Suppress => {}
            }
            was = now;
        }

        blocks
            .end_of_input_check()
            .map_err(|kind| ConversionError::new(lines.len(), kind))?;

        Ok(output)
    }

    /// Splits `text` into terminator-preserving lines, converts them and
    /// joins the result.
    pub fn convert_text(&self, text: &str) -> Result<String, ConversionError> {
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        Ok(self.convert_lines(&lines)?.concat())
    }
}

fn log_transition(family: &str, line_number: usize, transition: Transition) {
    match transition {
        Transition::Activated => log::debug!("{family} opened on line {line_number}"),
        Transition::Deactivated => log::debug!("{family} closed on line {line_number}"),
        Transition::Unchanged => {}
    }
}

/// Shorthand for `LineConverter::new(registry).convert_lines(lines)`.
pub fn convert_lines<S: AsRef<str>>(
    registry: &TriggerRegistry,
    lines: &[S],
) -> Result<Vec<String>, ConversionError> {
    LineConverter::new(registry).convert_lines(lines)
}

/// Shorthand for `LineConverter::new(registry).convert_text(text)`.
pub fn convert_text(registry: &TriggerRegistry, text: &str) -> Result<String, ConversionError> {
    LineConverter::new(registry).convert_text(text)
}
