//! Conversion properties between editor groups and API trees.

use newsdesk::audience::{SequentialIds, convert_to_api, convert_to_component, to_api_tree};
use newsdesk::models::{ApiGroup, ApiNode, ApiValue, Combinator, FieldKind, Group, Rule};

fn sample_groups() -> Vec<Group> {
    vec![
        Group::new(
            Combinator::And,
            vec![
                Rule::new(FieldKind::Code, "A001"),
                Rule::new(FieldKind::Department, "3"),
            ],
        ),
        Group::new(
            Combinator::Or,
            vec![Rule::extra("1", "Norte"), Rule::new(FieldKind::Role, "7")],
        ),
        Group::new(Combinator::Or, vec![]),
        Group::new(
            Combinator::And,
            vec![
                Rule::new(FieldKind::LastName, "Paz"),
                Rule::new("custom__badge", "gold"),
            ],
        ),
    ]
}

#[test]
fn depth_and_combinators_follow_input() {
    let groups = sample_groups();
    for n in 1..=groups.len() {
        let tree = convert_to_api(&groups[..n], &mut SequentialIds::new());
        assert_eq!(tree.depth(), n);
        let expected: Vec<Combinator> = groups[..n].iter().map(|g| g.combinator).collect();
        assert_eq!(tree.combinator_chain(), expected);
    }
}

#[test]
fn round_trip_preserves_everything_but_ids() {
    let groups = sample_groups();
    let tree = to_api_tree(&groups);
    assert_eq!(convert_to_component(&tree), groups);
}

#[test]
fn round_trip_survives_json() {
    let groups = sample_groups();
    let tree = convert_to_api(&groups, &mut SequentialIds::new());
    let json = serde_json::to_string(&tree).unwrap();
    let parsed: ApiGroup = serde_json::from_str(&json).unwrap();
    assert_eq!(tree, parsed);
    assert_eq!(convert_to_component(&parsed), groups);
}

#[test]
fn empty_input_is_empty_and_root() {
    let tree = to_api_tree(&[]);
    assert!(tree.rules.is_empty());
    assert_eq!(tree.combinator, Combinator::And);
    assert!(tree.id.starts_with("g-"));
}

#[test]
fn fresh_ids_every_pass() {
    let groups = sample_groups();
    let a = to_api_tree(&groups);
    let b = to_api_tree(&groups);
    assert_ne!(a.id, b.id);
}

#[test]
fn wire_shape_of_two_groups() {
    let groups = vec![
        Group::new(Combinator::And, vec![Rule::new(FieldKind::Department, "3")]),
        Group::new(Combinator::Or, vec![Rule::extra("1", "Norte")]),
    ];
    let tree = convert_to_api(&groups, &mut SequentialIds::new());
    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "id": "g-1",
            "combinator": "and",
            "rules": [
                {"field": "memberships__department__id", "id": "r-2", "operator": "=", "value": 3},
                {
                    "id": "g-3",
                    "combinator": "or",
                    "rules": [
                        {
                            "field": "extra_field_values__value",
                            "id": "r-4",
                            "operator": "=",
                            "value": {"field": 1, "value": "Norte"}
                        }
                    ]
                }
            ]
        })
    );

    match &tree.rules[1] {
        ApiNode::Group(nested) => match &nested.rules[0] {
            ApiNode::Rule(rule) => assert_eq!(
                rule.value,
                ApiValue::Extra {
                    field: 1,
                    value: "Norte".to_string()
                }
            ),
            other => panic!("expected rule, got {other:?}"),
        },
        other => panic!("expected group, got {other:?}"),
    }
}
