// crates/line_converter/src/codeblock.rs

use trigger_registry::CodeBlockType;

use crate::error::{TriggerError, TriggerFamily};
use crate::Transition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerKind {
    Start,
    End,
}

/// Tracks the (at most one) open codeblock of a conversion pass.
#[derive(Debug)]
pub struct BlockStateMachine<'r> {
    codeblock_types: &'r [CodeBlockType],
    active: Option<&'r CodeBlockType>,
    indentation: String,
}

impl<'r> BlockStateMachine<'r> {
    pub fn new(codeblock_types: &'r [CodeBlockType]) -> Self {
        Self {
            codeblock_types,
            active: None,
            indentation: String::new(),
        }
    }

    /// Advances the machine over one line.
    ///
    /// A start trigger opens a block and records the line's indentation; an
    /// end trigger closes the open block. Any other line leaves the state as is.
    pub fn on_line(&mut self, line: &str) -> Result<Transition, TriggerError> {
        let Some((codeblock_type, kind)) = self.find_trigger(line)? else {
            return Ok(Transition::Unchanged);
        };

        match kind {
            TriggerKind::Start => {
                if let Some(active) = self.active {
                    return Err(TriggerError::NestedBlock {
                        active: active.name().to_string(),
                        requested: codeblock_type.name().to_string(),
                    });
                }
                self.active = Some(codeblock_type);
                self.indentation = leading_indentation(line).to_string();
                Ok(Transition::Activated)
            }
            TriggerKind::End => {
                match self.active {
                    Some(active) if std::ptr::eq(active, codeblock_type) => {}
                    active => {
                        return Err(TriggerError::MismatchedBlockEnd {
                            active: active.map(|a| a.name().to_string()),
                            found: codeblock_type.name().to_string(),
                        })
                    }
                }
                self.active = None;
                self.indentation.clear();
                Ok(Transition::Deactivated)
            }
        }
    }

    /// The open block's replacement, indented like its start line.
    pub fn current_replacement(&self) -> Result<String, TriggerError> {
        let active = self.active.ok_or(TriggerError::NoActiveBlock)?;
        Ok(active.replacement(&self.indentation))
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_type(&self) -> Option<&'r CodeBlockType> {
        self.active
    }

    pub fn indentation(&self) -> &str {
        &self.indentation
    }

    /// Fails if a block is still open once the input is exhausted.
    pub fn end_of_input_check(&self) -> Result<(), TriggerError> {
        match self.active {
            Some(active) => Err(TriggerError::UnclosedBlock {
                name: active.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn find_trigger(
        &self,
        line: &str,
    ) -> Result<Option<(&'r CodeBlockType, TriggerKind)>, TriggerError> {
        let mut found = None;
        for codeblock_type in self.codeblock_types {
            for (trigger, kind) in [
                (codeblock_type.start_trigger(), TriggerKind::Start),
                (codeblock_type.end_trigger(), TriggerKind::End),
            ] {
                if !line.contains(trigger) {
                    continue;
                }
                if found.is_some() {
                    return Err(TriggerError::MultipleTriggers {
                        family: TriggerFamily::CodeBlock,
                        line: line.to_string(),
                    });
                }
                found = Some((codeblock_type, kind));
            }
        }
        Ok(found)
    }
}

/// The run of spaces and tabs a line starts with.
fn leading_indentation(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}
