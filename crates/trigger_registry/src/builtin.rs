// crates/trigger_registry/src/builtin.rs

//! Trigger types available without a trigger file.

use crate::types::{CodeBlockType, MaskType};

/// Replacement for `STUDENT_CODE` blocks. The trailing `pass` keeps the
/// generated Python syntactically valid.
pub const STUDENT_CODE_REPLACEMENT: &str = "
# ==================== YOUR CODE HERE ====================

# TODO: Implement
pass

# ==================== YOUR CODE HERE ====================
";

/// Code students must implement; replaced by a placeholder.
pub fn student_code() -> CodeBlockType {
    CodeBlockType::new(
        "Student Code Block",
        "STUDENT_CODE_START",
        "STUDENT_CODE_END",
        STUDENT_CODE_REPLACEMENT,
    )
}

/// Answer-key material removed without replacement.
pub fn key_only() -> CodeBlockType {
    CodeBlockType::new("Key Only", "KEY_ONLY_START", "KEY_ONLY_END", "")
}

/// Masks the value of a Python assignment.
pub fn python_value_assignment() -> MaskType {
    MaskType::new(
        "Python Value Assignment Mask",
        "MASK_ASSIGNMENT",
        '=',
        "= None # TODO: Implement",
    )
}

pub fn codeblock_types() -> Vec<CodeBlockType> {
    vec![student_code(), key_only()]
}

pub fn mask_types() -> Vec<MaskType> {
    vec![python_value_assignment()]
}
