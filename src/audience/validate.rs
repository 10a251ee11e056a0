//! Required-field checks for editor groups.
//!
//! Kept apart from the converters, which accept anything.

use crate::error::{AppError, Result};
use crate::models::{Group, Rule, ValueKind};

use super::to_api::parse_int;

/// Reject groups containing incomplete rules. Positions in the message are 1-based.
pub fn validate_groups(groups: &[Group]) -> Result<()> {
    for (g, group) in groups.iter().enumerate() {
        for (r, rule) in group.list.iter().enumerate() {
            if let Some(problem) = rule_problem(rule) {
                return Err(AppError::validation(format!(
                    "group {} rule {}: {}",
                    g + 1,
                    r + 1,
                    problem
                )));
            }
        }
    }
    Ok(())
}

fn rule_problem(rule: &Rule) -> Option<String> {
    let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

    match rule.field.value_kind() {
        ValueKind::Extra => {
            if !filled(&rule.field_extra) {
                Some("extra field slot is required".to_string())
            } else if rule.field_extra.as_deref().and_then(parse_int).is_none() {
                Some("extra field slot must be a numeric id".to_string())
            } else if !filled(&rule.value_extra) {
                Some("extra field value is required".to_string())
            } else {
                None
            }
        }
        ValueKind::IntegerRef => match rule.value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => match v.parse::<i64>() {
                Ok(_) => None,
                Err(_) if parse_int(v).is_some() => {
                    Some(format!("'{}' has trailing characters after its id", rule.field.label()))
                }
                Err(_) => Some(format!("'{}' must be a numeric id", rule.field.label())),
            },
            _ => Some(format!("'{}' is required", rule.field.label())),
        },
        ValueKind::Text => {
            if filled(&rule.value) {
                None
            } else {
                Some(format!("'{}' is required", rule.field.label()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Combinator, FieldKind};

    fn one(rule: Rule) -> Vec<Group> {
        vec![Group::new(Combinator::And, vec![rule])]
    }

    #[test]
    fn test_complete_rules_pass() {
        let groups = vec![
            Group::new(
                Combinator::And,
                vec![Rule::new("code", "A1"), Rule::new(FieldKind::Department, "3")],
            ),
            Group::new(Combinator::Or, vec![Rule::extra("1", "Norte")]),
        ];
        assert!(validate_groups(&groups).is_ok());
        assert!(validate_groups(&[]).is_ok());
    }

    #[test]
    fn test_blank_value_is_rejected_with_position() {
        let groups = vec![
            Group::new(Combinator::And, vec![Rule::new("code", "A1")]),
            Group::new(Combinator::And, vec![Rule::new("code", "B1"), Rule::new("first_name", " ")]),
        ];
        let err = validate_groups(&groups).unwrap_err().to_string();
        assert!(err.contains("group 2 rule 2"), "{err}");
        assert!(err.contains("Nombre"), "{err}");
    }

    #[test]
    fn test_extra_rule_needs_both_halves() {
        assert!(validate_groups(&one(Rule::extra("", "Norte"))).is_err());
        assert!(validate_groups(&one(Rule::extra("1", ""))).is_err());

        let err = validate_groups(&one(Rule::extra("zona", "Norte")))
            .unwrap_err()
            .to_string();
        assert!(err.contains("numeric"), "{err}");
    }

    #[test]
    fn test_reference_must_be_numeric() {
        assert!(validate_groups(&one(Rule::new(FieldKind::Role, "admin"))).is_err());
        assert!(validate_groups(&one(Rule::new(FieldKind::Role, "4x"))).is_err());
    }
}
