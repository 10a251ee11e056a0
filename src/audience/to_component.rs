// src/audience/to_component.rs

//! Backend query tree → editor groups.

use crate::models::{ApiGroup, ApiNode, ApiRule, ApiValue, Group, Operator, Rule, ValueKind};

/// Flatten a query tree into one editor group per nesting level, root first.
///
/// Leaf rules stay with the level they were found on; nested groups are
/// emitted after their parent in encounter order.
pub fn convert_to_component(root: &ApiGroup) -> Vec<Group> {
    let mut groups = Vec::new();
    flatten(root, &mut groups);
    groups
}

/// Editor seed for a stored tree. A missing or empty tree yields a single
/// default group, since the editor always shows at least one.
pub fn seed_groups(root: Option<&ApiGroup>) -> Vec<Group> {
    match root {
        Some(tree) if !tree.rules.is_empty() => convert_to_component(tree),
        _ => vec![Group::default()],
    }
}

fn flatten(group: &ApiGroup, out: &mut Vec<Group>) {
    let level = out.len();
    out.push(Group::new(group.combinator, Vec::new()));

    for node in &group.rules {
        match node {
            ApiNode::Rule(rule) => out[level].list.push(convert_rule(rule)),
            ApiNode::Group(nested) => flatten(nested, out),
        }
    }
}

fn convert_rule(rule: &ApiRule) -> Rule {
    let mut converted = Rule {
        field: rule.field.clone(),
        operator: Operator::Eq,
        value: None,
        field_extra: None,
        value_extra: None,
    };

    match (rule.field.value_kind(), &rule.value) {
        (ValueKind::Extra, ApiValue::Extra { field, value }) => {
            converted.field_extra = Some(field.to_string());
            converted.value_extra = Some(value.clone());
        }
        (_, value) => converted.value = Some(value.to_string()),
    }

    converted
}
