use line_converter::{convert_lines, convert_text, LineConverter, TriggerError, TriggerFamily};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use trigger_registry::{CodeBlockType, MaskType, TriggerRegistry};

const SOLUTION: &str = r#"import numpy as np


def add(a, b):
    """Adds two numbers."""
    # STUDENT_CODE_START
    result = a + b
    return result
    # STUDENT_CODE_END


def scale(values, factor):
    # KEY_ONLY_START
    assert factor != 0
    # KEY_ONLY_END
    return [v * factor for v in values]


THRESHOLD = 0.5  # MASK_ASSIGNMENT
print("threshold set")

print("done")
"#;

const STUDENT: &str = concat!(
    "import numpy as np\n",
    "\n",
    "\n",
    "def add(a, b):\n",
    "    \"\"\"Adds two numbers.\"\"\"\n",
    "    # ==================== YOUR CODE HERE ====================\n",
    "    \n",
    "    # TODO: Implement\n",
    "    pass\n",
    "    \n",
    "    # ==================== YOUR CODE HERE ====================\n",
    "\n",
    "\n",
    "def scale(values, factor):\n",
    "    return [v * factor for v in values]\n",
    "\n",
    "\n",
    "THRESHOLD = None # TODO: Implement\n",
    "\n",
    "print(\"done\")\n",
);

fn all_triggers(registry: &TriggerRegistry) -> Vec<&str> {
    let mut triggers = Vec::new();
    for ty in registry.codeblock_types() {
        triggers.push(ty.start_trigger());
        triggers.push(ty.end_trigger());
    }
    for ty in registry.mask_types() {
        triggers.push(ty.trigger());
    }
    triggers
}

#[test]
fn test_solution_file_converts_to_student_version() {
    let registry = TriggerRegistry::builtin();
    assert_eq!(convert_text(&registry, SOLUTION).unwrap(), STUDENT);
}

#[test]
fn test_no_trigger_survives_conversion() {
    let registry = TriggerRegistry::builtin();
    let converted = convert_text(&registry, SOLUTION).unwrap();
    for trigger in all_triggers(&registry) {
        assert!(
            !converted.contains(trigger),
            "trigger {trigger} was not removed:\n{converted}"
        );
    }
}

#[test]
fn test_converted_output_is_a_fixed_point() {
    let registry = TriggerRegistry::builtin();
    let once = convert_text(&registry, SOLUTION).unwrap();
    let twice = convert_text(&registry, &once).unwrap();
    assert_eq!(twice, once);
}

#[test]
fn test_identity_without_triggers() {
    let registry = TriggerRegistry::builtin();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let alphabet: Vec<char> = "abcdefghij xyz_=()[]#:\t\"'".chars().collect();

    for _ in 0..200 {
        let line_count = rng.gen_range(0..30);
        let lines: Vec<String> = (0..line_count)
            .map(|_| {
                let width = rng.gen_range(0..40);
                let mut line: String = (0..width)
                    .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                    .collect();
                line.push('\n');
                line
            })
            .collect();

        assert_eq!(convert_lines(&registry, &lines).unwrap(), lines);
    }
}

#[test]
fn test_block_indentation_law() {
    let registry = TriggerRegistry::builtin();
    let lines = [
        "def f():\n",
        "    # STUDENT_CODE_START\n",
        "    return 1\n",
        "    # STUDENT_CODE_END\n",
    ];
    let output = convert_lines(&registry, &lines).unwrap();
    assert_eq!(output.len(), 2);

    let replacement: Vec<&str> = output[1].split('\n').collect();
    let (last, rest) = replacement.split_last().unwrap();
    assert!(rest.iter().all(|line| line.starts_with("    ")));
    assert_eq!(*last, "");
}

#[test]
fn test_block_at_column_zero_is_not_indented() {
    let registry = TriggerRegistry::builtin();
    let output = convert_text(&registry, "# STUDENT_CODE_START\nx = 1\n# STUDENT_CODE_END\n").unwrap();
    assert_eq!(
        output,
        "# ==================== YOUR CODE HERE ====================\n\
         \n\
         # TODO: Implement\n\
         pass\n\
         \n\
         # ==================== YOUR CODE HERE ====================\n"
    );
}

#[test]
fn test_mask_law() {
    let registry = TriggerRegistry::builtin();
    let lines = [
        "x = 5  # MASK_ASSIGNMENT\n",
        "y = x * 2\n",
        "z = y + 1\n",
        "\n",
        "print(z)\n",
    ];
    let output = convert_lines(&registry, &lines).unwrap();
    assert_eq!(
        output,
        vec![
            format!("x {}\n\n", "= None # TODO: Implement"),
            "print(z)\n".to_string(),
        ]
    );
}

#[test]
fn test_mask_at_end_of_input_is_not_an_error() {
    let registry = TriggerRegistry::builtin();
    let output = convert_text(&registry, "x = 5  # MASK_ASSIGNMENT\ny = 6\n").unwrap();
    assert_eq!(output, "x = None # TODO: Implement\n\n");
}

#[test]
fn test_masks_separated_by_blank_line() {
    let registry = TriggerRegistry::builtin();
    let output = convert_text(
        &registry,
        "a = 1  # MASK_ASSIGNMENT\n\nb = 2  # MASK_ASSIGNMENT\n\nc = 3\n",
    )
    .unwrap();
    assert_eq!(
        output,
        "a = None # TODO: Implement\n\nb = None # TODO: Implement\n\nc = 3\n"
    );
}

#[test]
fn test_nested_block_error() {
    let registry = TriggerRegistry::builtin();
    let err = convert_text(&registry, "# STUDENT_CODE_START\n# STUDENT_CODE_START\n").unwrap_err();
    assert_eq!(err.line_number, 2);
    assert!(matches!(err.kind(), TriggerError::NestedBlock { .. }));
}

#[test]
fn test_unclosed_block_error() {
    let registry = TriggerRegistry::builtin();
    let err = convert_text(&registry, "x = 1\n# STUDENT_CODE_START\ny = 2\n").unwrap_err();
    assert_eq!(err.line_number, 3);
    assert_eq!(
        err.kind,
        TriggerError::UnclosedBlock {
            name: "Student Code Block".to_string()
        }
    );
}

#[test]
fn test_block_and_mask_trigger_on_one_line_conflict() {
    // Different families: each machine accepts its own trigger, then the
    // converter rejects the combined state.
    let registry = TriggerRegistry::builtin();
    let err = convert_text(&registry, "x = 1  # STUDENT_CODE_START MASK_ASSIGNMENT\n").unwrap_err();
    assert_eq!(err.line_number, 1);
    assert!(matches!(err.kind, TriggerError::ConflictingState { .. }));
}

#[test]
fn test_two_block_triggers_on_one_line() {
    // Same family: rejected by the codeblock machine itself.
    let registry = TriggerRegistry::builtin();
    let err = convert_text(&registry, "# STUDENT_CODE_START KEY_ONLY_START\n").unwrap_err();
    assert!(matches!(
        err.kind,
        TriggerError::MultipleTriggers {
            family: TriggerFamily::CodeBlock,
            ..
        }
    ));
}

#[test]
fn test_mask_trigger_inside_block_conflicts() {
    let registry = TriggerRegistry::builtin();
    let err = convert_text(
        &registry,
        "# KEY_ONLY_START\nx = 5  # MASK_ASSIGNMENT\n# KEY_ONLY_END\n",
    )
    .unwrap_err();
    assert_eq!(err.line_number, 2);
    assert!(matches!(err.kind, TriggerError::ConflictingState { .. }));
}

#[test]
fn test_crossed_blocks() {
    let registry = TriggerRegistry::builtin();
    let err = convert_text(
        &registry,
        "# STUDENT_CODE_START\n# KEY_ONLY_END\n# STUDENT_CODE_END\n",
    )
    .unwrap_err();
    assert_eq!(err.line_number, 2);
    assert!(matches!(err.kind, TriggerError::MismatchedBlockEnd { .. }));
}

#[test]
fn test_trigger_inside_string_literal_still_triggers() {
    let registry = TriggerRegistry::builtin();
    let err = convert_text(&registry, "print(\"KEY_ONLY_START\")\n").unwrap_err();
    assert!(matches!(err.kind, TriggerError::UnclosedBlock { .. }));
}

#[test]
fn test_custom_registry() {
    let registry = TriggerRegistry::builder()
        .codeblock_type(CodeBlockType::new(
            "Rust Body",
            "// SOLUTION_START",
            "// SOLUTION_END",
            "\ntodo!()\n",
        ))
        .mask_type(MaskType::new("Rust Const", "// MASK", '=', "= todo!();"))
        .build()
        .unwrap();
    let converter = LineConverter::new(&registry);

    let source = "\
const LIMIT: u32 = 10; // MASK

fn area(w: u32, h: u32) -> u32 {
    // SOLUTION_START
    w * h
    // SOLUTION_END
}
";
    let expected = "\
const LIMIT: u32 = todo!();

fn area(w: u32, h: u32) -> u32 {
    todo!()
}
";
    assert_eq!(converter.convert_text(source).unwrap(), expected);
}

#[test]
fn test_crlf_lines() {
    let registry = TriggerRegistry::builtin();
    let output = convert_text(
        &registry,
        "a = 1\r\n# KEY_ONLY_START\r\nsecret\r\n# KEY_ONLY_END\r\nb = 2\r\n",
    )
    .unwrap();
    assert_eq!(output, "a = 1\r\nb = 2\r\n");
}
