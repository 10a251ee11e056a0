// src/audience/to_api.rs

//! Editor groups → backend query tree.
//!
//! A list of N groups becomes a right-nested chain of depth N: the root
//! carries the first group's rules, and every following group is appended
//! as the last child of the group before it.

use crate::models::{ApiGroup, ApiNode, ApiRule, ApiValue, Combinator, Group, Rule, ValueKind};

use super::ids::IdGenerator;

/// Convert editor groups into a backend query tree.
///
/// Never fails: incomplete rules degrade to empty or unparsed values.
pub fn convert_to_api(groups: &[Group], ids: &mut impl IdGenerator) -> ApiGroup {
    let levels: Vec<ApiGroup> = groups
        .iter()
        .map(|group| ApiGroup {
            id: format!("g-{}", ids.next_id()),
            combinator: group.combinator,
            rules: group
                .list
                .iter()
                .map(|rule| ApiNode::Rule(convert_rule(rule, ids)))
                .collect(),
        })
        .collect();

    levels
        .into_iter()
        .rev()
        .reduce(|nested, mut parent| {
            parent.rules.push(ApiNode::Group(nested));
            parent
        })
        .unwrap_or_else(|| ApiGroup {
            rules: Vec::new(),
            id: format!("g-{}", ids.next_id()),
            combinator: Combinator::And,
        })
}

fn convert_rule(rule: &Rule, ids: &mut impl IdGenerator) -> ApiRule {
    let value = match rule.field.value_kind() {
        ValueKind::Extra => extra_value(rule).unwrap_or_else(|| text_value(rule)),
        ValueKind::IntegerRef => match non_empty(&rule.value) {
            Some(raw) => parse_int(raw).map(ApiValue::Number).unwrap_or_else(|| {
                log::debug!("{} value {:?} is not an integer, sending as text", rule.field, raw);
                ApiValue::Text(raw.to_string())
            }),
            None => ApiValue::default(),
        },
        ValueKind::Text => text_value(rule),
    };

    ApiRule {
        field: rule.field.clone(),
        id: format!("r-{}", ids.next_id()),
        operator: rule.operator,
        value,
    }
}

/// `{field, value}` pair of an extra-field rule, when both halves are usable.
fn extra_value(rule: &Rule) -> Option<ApiValue> {
    let field_extra = non_empty(&rule.field_extra)?;
    let value_extra = non_empty(&rule.value_extra)?;
    match parse_int(field_extra) {
        Some(field) => Some(ApiValue::Extra {
            field,
            value: value_extra.to_string(),
        }),
        None => {
            log::debug!("extra field slot {:?} is not an integer", field_extra);
            None
        }
    }
}

fn text_value(rule: &Rule) -> ApiValue {
    ApiValue::Text(non_empty(&rule.value).unwrap_or_default().to_string())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Leading decimal integer of `s`: optional whitespace and sign, then digits.
/// Trailing garbage is ignored; `None` when no digits lead.
pub(crate) fn parse_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audience::SequentialIds;
    use crate::models::FieldKind;

    fn rule_value(tree: &ApiGroup, index: usize) -> &ApiValue {
        &tree.rules[index].as_rule().unwrap().value
    }

    #[test]
    fn test_empty_input_yields_empty_and_root() {
        let mut ids = SequentialIds::new();
        let tree = convert_to_api(&[], &mut ids);
        assert!(tree.rules.is_empty());
        assert_eq!(tree.combinator, Combinator::And);
        assert_eq!(tree.id, "g-1");
    }

    #[test]
    fn test_department_value_becomes_number() {
        let mut ids = SequentialIds::new();
        let groups = vec![Group::new(
            Combinator::And,
            vec![Rule::new("memberships__department__id", "3")],
        )];
        let tree = convert_to_api(&groups, &mut ids);
        assert_eq!(rule_value(&tree, 0), &ApiValue::Number(3));
    }

    #[test]
    fn test_extra_field_value_becomes_pair() {
        let mut ids = SequentialIds::new();
        let groups = vec![Group::new(Combinator::And, vec![Rule::extra("1", "Norte")])];
        let tree = convert_to_api(&groups, &mut ids);
        assert_eq!(
            rule_value(&tree, 0),
            &ApiValue::Extra {
                field: 1,
                value: "Norte".to_string()
            }
        );
    }

    #[test]
    fn test_incomplete_extra_rule_falls_back_to_text() {
        let mut ids = SequentialIds::new();
        let mut rule = Rule::extra("1", "");
        rule.value = Some("x".into());
        let tree = convert_to_api(&[Group::new(Combinator::And, vec![rule])], &mut ids);
        assert_eq!(rule_value(&tree, 0), &ApiValue::Text("x".into()));
    }

    #[test]
    fn test_missing_value_becomes_empty_text() {
        let mut ids = SequentialIds::new();
        let mut rule = Rule::new(FieldKind::Role, "");
        rule.value = None;
        let tree = convert_to_api(&[Group::new(Combinator::And, vec![rule])], &mut ids);
        assert_eq!(rule_value(&tree, 0), &ApiValue::Text(String::new()));
    }

    #[test]
    fn test_unparsable_reference_is_kept_as_text() {
        let mut ids = SequentialIds::new();
        let groups = vec![Group::new(
            Combinator::And,
            vec![Rule::new(FieldKind::Role, "admin")],
        )];
        let tree = convert_to_api(&groups, &mut ids);
        assert_eq!(rule_value(&tree, 0), &ApiValue::Text("admin".into()));
    }

    #[test]
    fn test_two_groups_nest_right() {
        let mut ids = SequentialIds::new();
        let groups = vec![
            Group::new(Combinator::And, vec![Rule::new("code", "A1")]),
            Group::new(Combinator::Or, vec![Rule::new("first_name", "Ana")]),
        ];
        let tree = convert_to_api(&groups, &mut ids);

        assert_eq!(tree.combinator, Combinator::And);
        assert_eq!(tree.rules.len(), 2);
        assert_eq!(rule_value(&tree, 0), &ApiValue::Text("A1".into()));

        let nested = tree.rules[1].as_group().unwrap();
        assert_eq!(nested.combinator, Combinator::Or);
        assert_eq!(nested.rules.len(), 1);
        assert_eq!(rule_value(nested, 0), &ApiValue::Text("Ana".into()));
    }

    #[test]
    fn test_ids_are_prefixed_and_unique() {
        let mut ids = SequentialIds::new();
        let groups = vec![
            Group::new(Combinator::And, vec![Rule::new("code", "A1")]),
            Group::new(Combinator::Or, vec![]),
        ];
        let tree = convert_to_api(&groups, &mut ids);
        assert_eq!(tree.id, "g-1");
        assert_eq!(tree.rules[0].as_rule().unwrap().id, "r-2");
        assert_eq!(tree.rules[1].as_group().unwrap().id, "g-3");
    }

    #[test]
    fn test_parse_int_prefix_semantics() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  7abc"), Some(7));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+5"), Some(5));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
    }
}
