// crates/notebook_filter/src/lib.rs

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use thiserror::Error;

use line_converter::{ConversionError, LineConverter};
use trigger_registry::TriggerRegistry;

/// A cell with a line containing this marker is dropped from the student
/// notebook entirely.
pub const IPYNB_CELL_EXCLUDE: &str = "ANSWER_KEY_CELL";

#[derive(Debug, Error)]
pub enum NotebookError {
    #[error("Invalid notebook JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Notebook has no 'cells' array")]
    MissingCells,

    #[error("Cell {index} has a 'source' that is neither a string nor a list of strings")]
    InvalidSource { index: usize },

    #[error("Cell {index}: {source}")]
    Conversion {
        index: usize,
        source: ConversionError,
    },
}

/// Converts the JSON text of a notebook and returns the student version,
/// serialized the way Jupyter writes notebooks (one-space indent).
pub fn convert_notebook(registry: &TriggerRegistry, notebook_json: &str) -> Result<String, NotebookError> {
    let notebook: Value = serde_json::from_str(notebook_json)?;
    let converted = convert_notebook_value(registry, notebook)?;

    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    converted.serialize(&mut serializer)?;
    buf.push(b'\n');
    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Drops answer-key cells, then runs every remaining cell's source through
/// its own conversion pass. Everything outside `cells[*].source` is kept.
pub fn convert_notebook_value(registry: &TriggerRegistry, mut notebook: Value) -> Result<Value, NotebookError> {
    let cells = notebook
        .get_mut("cells")
        .and_then(Value::as_array_mut)
        .ok_or(NotebookError::MissingCells)?;

    let converter = LineConverter::new(registry);
    let original = std::mem::take(cells);
    let mut kept = Vec::with_capacity(original.len());

    for (index, mut cell) in original.into_iter().enumerate() {
        let Some(source) = cell.get_mut("source") else {
            kept.push(cell);
            continue;
        };
        let lines = source_lines(source).ok_or(NotebookError::InvalidSource { index })?;

        if lines.iter().any(|line| line.contains(IPYNB_CELL_EXCLUDE)) {
            log::debug!("dropping answer-key cell {index}");
            continue;
        }

        let converted = converter
            .convert_lines(&lines)
            .map_err(|err| NotebookError::Conversion { index, source: err })?;
        *source = match source {
            Value::String(_) => Value::String(converted.concat()),
            _ => Value::Array(converted.into_iter().map(Value::String).collect()),
        };
        kept.push(cell);
    }

    *cells = kept;
    Ok(notebook)
}

/// Cell sources are stored either as one string or as a list of lines.
fn source_lines(source: &Value) -> Option<Vec<String>> {
    match source {
        Value::String(text) => Some(text.split_inclusive('\n').map(str::to_string).collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}
