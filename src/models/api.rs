//! Backend query-tree shapes for audience policies.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rule::{Combinator, FieldKind, Operator};

/// Comparison value of an API rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiValue {
    Number(i64),
    Extra { field: i64, value: String },
    Text(String),
    /// Any other JSON value, e.g. `null` left by a failed integer coercion or a fractional number.
    Other(serde_json::Value),
}

impl Default for ApiValue {
    fn default() -> Self {
        ApiValue::Text(String::new())
    }
}

impl fmt::Display for ApiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiValue::Number(n) => write!(f, "{n}"),
            ApiValue::Text(s) => f.write_str(s),
            ApiValue::Extra { .. } => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            ApiValue::Other(value) => write_loose(f, value),
        }
    }
}

/// Render a JSON value the way a script `toString` would: bare strings,
/// comma-joined arrays, and compact JSON for objects.
fn write_loose(f: &mut fmt::Formatter<'_>, value: &serde_json::Value) -> fmt::Result {
    use serde_json::Value;

    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write!(f, "{n}"),
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_loose(f, item)?;
            }
            Ok(())
        }
        Value::Object(_) => write!(f, "{value}"),
    }
}

/// Leaf condition of the backend query tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRule {
    pub field: FieldKind,

    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub operator: Operator,

    #[serde(default)]
    pub value: ApiValue,
}

/// Group node of the backend query tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiGroup {
    pub rules: Vec<ApiNode>,

    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub combinator: Combinator,
}

impl ApiGroup {
    /// Number of group levels along the nesting chain, counting this one.
    pub fn depth(&self) -> usize {
        1 + self
            .rules
            .iter()
            .filter_map(ApiNode::as_group)
            .map(ApiGroup::depth)
            .max()
            .unwrap_or(0)
    }

    /// Combinators read from this group down to the innermost one.
    pub fn combinator_chain(&self) -> Vec<Combinator> {
        let mut chain = vec![self.combinator];
        let mut current = self;
        while let Some(child) = current.rules.iter().find_map(ApiNode::as_group) {
            chain.push(child.combinator);
            current = child;
        }
        chain
    }

    /// Leaf rules directly under this group, in order.
    pub fn leaf_rules(&self) -> impl Iterator<Item = &ApiRule> {
        self.rules.iter().filter_map(ApiNode::as_rule)
    }
}

/// Child of an API group. Entries carrying `rules` are groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiNode {
    Group(ApiGroup),
    Rule(ApiRule),
}

impl ApiNode {
    pub fn as_group(&self) -> Option<&ApiGroup> {
        match self {
            ApiNode::Group(group) => Some(group),
            ApiNode::Rule(_) => None,
        }
    }

    pub fn as_rule(&self) -> Option<&ApiRule> {
        match self {
            ApiNode::Rule(rule) => Some(rule),
            ApiNode::Group(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_shapes_deserialize() {
        let n: ApiValue = serde_json::from_str("3").unwrap();
        assert_eq!(n, ApiValue::Number(3));

        let e: ApiValue = serde_json::from_str(r#"{"field": 1, "value": "Norte"}"#).unwrap();
        assert_eq!(
            e,
            ApiValue::Extra {
                field: 1,
                value: "Norte".to_string()
            }
        );

        let t: ApiValue = serde_json::from_str(r#""A001""#).unwrap();
        assert_eq!(t, ApiValue::Text("A001".to_string()));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(ApiValue::Number(7).to_string(), "7");
        assert_eq!(ApiValue::Text("x".into()).to_string(), "x");
        let extra = ApiValue::Extra {
            field: 2,
            value: "Sur".into(),
        };
        assert_eq!(extra.to_string(), r#"{"field":2,"value":"Sur"}"#);
    }

    #[test]
    fn test_loose_values_survive_parsing() {
        for (raw, shown) in [("2.5", "2.5"), ("null", "null"), ("true", "true")] {
            let json = format!(
                r#"{{"id": "g-1", "combinator": "and", "rules": [
                    {{"id": "r-2", "field": "memberships__role__id", "operator": "=", "value": {raw}}}
                ]}}"#
            );
            let tree: ApiGroup = serde_json::from_str(&json).unwrap();
            let rule = tree.leaf_rules().next().unwrap();
            assert!(matches!(rule.value, ApiValue::Other(_)), "{raw}");
            assert_eq!(rule.value.to_string(), shown);

            let back = serde_json::to_value(&tree).unwrap();
            assert_eq!(back["rules"][0]["value"].to_string(), raw);
        }
    }

    #[test]
    fn test_loose_array_display() {
        let value: ApiValue = serde_json::from_str(r#"[1, "a", null]"#).unwrap();
        assert_eq!(value.to_string(), "1,a,null");
    }

    #[test]
    fn test_nodes_split_on_rules_property() {
        let tree: ApiGroup = serde_json::from_str(
            r#"{
                "id": "g-root",
                "combinator": "and",
                "rules": [
                    {"id": "r-1", "field": "code", "operator": "=", "value": "A1"},
                    {"id": "g-2", "combinator": "or", "rules": [
                        {"id": "r-2", "field": "memberships__role__id", "operator": "=", "value": 4}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        assert!(matches!(tree.rules[0], ApiNode::Rule(_)));
        assert!(matches!(tree.rules[1], ApiNode::Group(_)));
        assert_eq!(tree.depth(), 2);
        assert_eq!(
            tree.combinator_chain(),
            vec![Combinator::And, Combinator::Or]
        );
    }

    #[test]
    fn test_group_without_id_or_combinator() {
        let tree: ApiGroup = serde_json::from_str(r#"{"rules": []}"#).unwrap();
        assert_eq!(tree.combinator, Combinator::And);
        assert!(tree.id.is_empty());
        assert_eq!(tree.depth(), 1);
    }
}
