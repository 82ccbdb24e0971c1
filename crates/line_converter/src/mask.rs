// crates/line_converter/src/mask.rs

use trigger_registry::MaskType;

use crate::error::{TriggerError, TriggerFamily};
use crate::Transition;

/// Tracks the (at most one) active mask of a conversion pass.
///
/// A mask has no end trigger: it stays active until the next blank or
/// whitespace-only line.
#[derive(Debug)]
pub struct MaskStateMachine<'r> {
    mask_types: &'r [MaskType],
    active: Option<&'r MaskType>,
}

impl<'r> MaskStateMachine<'r> {
    pub fn new(mask_types: &'r [MaskType]) -> Self {
        Self {
            mask_types,
            active: None,
        }
    }

    pub fn on_line(&mut self, line: &str) -> Result<Transition, TriggerError> {
        if line.trim().is_empty() {
            return Ok(match self.active.take() {
                Some(_) => Transition::Deactivated,
                None => Transition::Unchanged,
            });
        }

        let Some(mask_type) = self.find_trigger(line)? else {
            return Ok(Transition::Unchanged);
        };
        if let Some(active) = self.active {
            return Err(TriggerError::NestedMask {
                active: active.name().to_string(),
                requested: mask_type.name().to_string(),
            });
        }
        self.active = Some(mask_type);
        Ok(Transition::Activated)
    }

    /// Rewrites the triggering line: everything from the first `start_char`
    /// onward becomes the mask's replacement, followed by one blank line.
    pub fn masked_line(&self, line: &str) -> Result<String, TriggerError> {
        let active = self.active.ok_or(TriggerError::NoActiveMask)?;
        let start = line
            .find(active.start_char())
            .ok_or_else(|| TriggerError::MaskStartCharNotFound {
                name: active.name().to_string(),
                start_char: active.start_char(),
                line: line.to_string(),
            })?;
        Ok(format!("{}{}\n\n", &line[..start], active.replacement()))
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_type(&self) -> Option<&'r MaskType> {
        self.active
    }

    fn find_trigger(&self, line: &str) -> Result<Option<&'r MaskType>, TriggerError> {
        let mut found = None;
        for mask_type in self.mask_types {
            if !line.contains(mask_type.trigger()) {
                continue;
            }
            if found.is_some() {
                return Err(TriggerError::MultipleTriggers {
                    family: TriggerFamily::Mask,
                    line: line.to_string(),
                });
            }
            found = Some(mask_type);
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types() -> Vec<MaskType> {
        vec![
            MaskType::new("Assignment", "MASK_ASSIGNMENT", '=', "= None # TODO: Implement"),
            MaskType::new("Return", "MASK_RETURN", 'r', "return None"),
        ]
    }

    #[test]
    fn test_blank_line_is_the_only_way_out() {
        let types = types();
        let mut machine = MaskStateMachine::new(&types);

        assert_eq!(
            machine.on_line("x = 5  # MASK_ASSIGNMENT\n").unwrap(),
            Transition::Activated
        );
        assert_eq!(machine.on_line("y = x + 1\n").unwrap(), Transition::Unchanged);
        assert!(machine.is_active());
        assert_eq!(machine.on_line(" \t\n").unwrap(), Transition::Deactivated);
        assert!(!machine.is_active());
        assert_eq!(machine.on_line("\n").unwrap(), Transition::Unchanged);
    }

    #[test]
    fn test_empty_string_deactivates() {
        let types = types();
        let mut machine = MaskStateMachine::new(&types);
        machine.on_line("x = 5  # MASK_ASSIGNMENT\n").unwrap();
        assert_eq!(machine.on_line("").unwrap(), Transition::Deactivated);
    }

    #[test]
    fn test_masked_line() {
        let types = types();
        let mut machine = MaskStateMachine::new(&types);
        machine.on_line("x = 5  # MASK_ASSIGNMENT\n").unwrap();
        assert_eq!(
            machine.masked_line("x = 5  # MASK_ASSIGNMENT\n").unwrap(),
            "x = None # TODO: Implement\n\n"
        );
    }

    #[test]
    fn test_masked_line_keeps_indentation() {
        let types = types();
        let mut machine = MaskStateMachine::new(&types);
        let line = "        return a + b  # MASK_RETURN\n";
        machine.on_line(line).unwrap();
        assert_eq!(machine.masked_line(line).unwrap(), "        return None\n\n");
    }

    #[test]
    fn test_masked_line_handles_multibyte_prefix() {
        let types = types();
        let mut machine = MaskStateMachine::new(&types);
        let line = "größe = 5  # MASK_ASSIGNMENT\n";
        machine.on_line(line).unwrap();
        assert_eq!(
            machine.masked_line(line).unwrap(),
            "größe = None # TODO: Implement\n\n"
        );
    }

    #[test]
    fn test_missing_start_char() {
        let types = types();
        let mut machine = MaskStateMachine::new(&types);
        let line = "print(x)  # MASK_ASSIGNMENT\n";
        machine.on_line(line).unwrap();
        let err = machine.masked_line(line).unwrap_err();
        assert!(matches!(
            err,
            TriggerError::MaskStartCharNotFound { start_char: '=', .. }
        ));
    }

    #[test]
    fn test_masked_line_requires_active_mask() {
        let types = types();
        let machine = MaskStateMachine::new(&types);
        assert_eq!(machine.masked_line("x = 1\n"), Err(TriggerError::NoActiveMask));
    }

    #[test]
    fn test_nested_mask() {
        let types = types();
        let mut machine = MaskStateMachine::new(&types);
        machine.on_line("x = 5  # MASK_ASSIGNMENT\n").unwrap();
        let err = machine.on_line("return x  # MASK_RETURN\n").unwrap_err();
        assert_eq!(
            err,
            TriggerError::NestedMask {
                active: "Assignment".to_string(),
                requested: "Return".to_string(),
            }
        );
    }

    #[test]
    fn test_same_mask_twice_without_blank_line() {
        let types = types();
        let mut machine = MaskStateMachine::new(&types);
        machine.on_line("x = 5  # MASK_ASSIGNMENT\n").unwrap();
        let err = machine.on_line("y = 6  # MASK_ASSIGNMENT\n").unwrap_err();
        assert!(matches!(err, TriggerError::NestedMask { .. }));
    }

    #[test]
    fn test_multiple_mask_triggers() {
        let types = types();
        let mut machine = MaskStateMachine::new(&types);
        let err = machine
            .on_line("return x = 1  # MASK_ASSIGNMENT MASK_RETURN\n")
            .unwrap_err();
        assert!(matches!(
            err,
            TriggerError::MultipleTriggers {
                family: TriggerFamily::Mask,
                ..
            }
        ));
    }
}
