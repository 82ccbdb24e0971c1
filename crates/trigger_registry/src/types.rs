// crates/trigger_registry/src/types.rs

/// A multi-line region delimited by a start and an end trigger substring.
/// Everything between (and including) the trigger lines is replaced by the
/// replacement template in the student version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockType {
    name: String,
    start_trigger: String,
    end_trigger: String,
    replacement_template: String,
}

impl CodeBlockType {
    /// Creates a new codeblock type.
    ///
    /// # Arguments
    ///
    /// * `name` - Used only to identify the block in error messages.
    /// * `start_trigger` - Substring that opens the block when found in a line.
    /// * `end_trigger` - Substring that closes the block when found in a line.
    /// * `replacement_template` - Text emitted in place of the block. One leading
    ///   newline is ignored so templates can be written as indented raw strings.
    pub fn new(
        name: impl Into<String>,
        start_trigger: impl Into<String>,
        end_trigger: impl Into<String>,
        replacement_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_trigger: start_trigger.into(),
            end_trigger: end_trigger.into(),
            replacement_template: replacement_template.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_trigger(&self) -> &str {
        &self.start_trigger
    }

    pub fn end_trigger(&self) -> &str {
        &self.end_trigger
    }

    /// Renders the replacement template for a block opened at `indentation`.
    ///
    /// A single leading `\n` is stripped, then every line except the last is
    /// prefixed with `indentation`. The last line is left untouched: for a
    /// template ending in `\n` it is the empty remainder after the final break.
    pub fn replacement(&self, indentation: &str) -> String {
        let template = self
            .replacement_template
            .strip_prefix('\n')
            .unwrap_or(&self.replacement_template);

        let lines: Vec<&str> = template.split('\n').collect();
        let last = lines.len() - 1;
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if i < last {
                    format!("{indentation}{line}")
                } else {
                    (*line).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A partial mask applied from a triggering line through the next blank line.
/// Only the triggering line is rewritten (from `start_char` onward); the
/// lines after it are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskType {
    name: String,
    trigger: String,
    start_char: char,
    replacement: String,
}

impl MaskType {
    /// Creates a new mask type.
    ///
    /// `start_char` is replaced as well: the masked line keeps only the text
    /// before its first occurrence.
    pub fn new(
        name: impl Into<String>,
        trigger: impl Into<String>,
        start_char: char,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            trigger: trigger.into(),
            start_char,
            replacement: replacement.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn start_char(&self) -> char {
        self.start_char
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}
