//! Human-readable rendering of editor groups.

use crate::models::{AudienceCatalog, FieldKind, Group, Rule};

/// One line per group, e.g. `Grupo 1 (and): Departamento = BI, Código = A1`.
pub fn describe_groups(groups: &[Group], catalog: &AudienceCatalog) -> Vec<String> {
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let rules: Vec<String> = group
                .list
                .iter()
                .map(|rule| describe_rule(rule, catalog))
                .collect();
            let body = if rules.is_empty() {
                "(sin reglas)".to_string()
            } else {
                rules.join(", ")
            };
            format!("Grupo {} ({}): {}", i + 1, group.combinator, body)
        })
        .collect()
}

fn describe_rule(rule: &Rule, catalog: &AudienceCatalog) -> String {
    let value = rule.value.as_deref().unwrap_or_default();
    match &rule.field {
        FieldKind::Department => format!(
            "{} = {}",
            rule.field.label(),
            catalog.department_label(value).unwrap_or(value)
        ),
        FieldKind::Role => format!(
            "{} = {}",
            rule.field.label(),
            catalog.role_label(value).unwrap_or(value)
        ),
        FieldKind::ExtraField => {
            let slot = rule.field_extra.as_deref().unwrap_or_default();
            format!(
                "{} = {}",
                catalog.extra_field_label(slot).unwrap_or(slot),
                rule.value_extra.as_deref().unwrap_or_default()
            )
        }
        _ => format!("{} = {}", rule.field.label(), value),
    }
}
