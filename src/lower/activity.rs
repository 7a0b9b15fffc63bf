//! Lowering of execution nodes into activity calls.

use serde_json::Value;

use crate::ir::types::{ActivityCall, FieldInit, LiteralValue};
use crate::naming::{field_name, map_value_type, symbol_name, var_suffix};
use crate::parse::parameter::{Direction, Parameter, ValueType};
use crate::parse::types::Node;

const FALLBACK_ACTIVITY_NAME: &str = "UnnamedActivity";

/// `activityName` if set, else the last segment of the type key.
pub fn activity_name(node: &Node) -> String {
    if let Some(name) = node.config.activity_name.as_deref() {
        if !name.trim().is_empty() {
            return name.to_string();
        }
    }
    node.type_key
        .type_key()
        .rsplit('.')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_ACTIVITY_NAME)
        .to_string()
}

pub fn lower_activity(node: &Node) -> ActivityCall {
    let stem = symbol_name(&node.id);
    let inputs = node
        .config
        .parameters_in(Direction::Input)
        .map(|p| FieldInit {
            field: field_name(&p.key),
            value: literal_for(p),
        })
        .collect();

    ActivityCall {
        type_key: node.type_key.type_key().to_string(),
        activity_name: activity_name(node),
        var_suffix: var_suffix(&node.id),
        input_type: format!("{}Input", stem),
        output_type: format!("{}Output", stem),
        inputs,
    }
}

/// String-typed values are quoted; everything else is emitted as its raw
/// text. Null and empty values fall back to the zero value of the field type.
/// `ZSet` values are raw too, although their field is a Go `string`: such a
/// literal only compiles when the value text is itself a quoted Go string.
pub fn literal_for(p: &Parameter) -> LiteralValue {
    let text = match &p.value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    };

    match text {
        Some(text) if p.value_type == ValueType::String => LiteralValue::String(text),
        Some(text) if !text.trim().is_empty() => LiteralValue::Raw(text),
        _ => LiteralValue::Zero(map_value_type(p.value_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::types::FieldType;
    use crate::parse::kind::NodeKind;
    use crate::parse::types::{NodeConfig, Position};
    use serde_json::json;

    fn node(id: &str, kind: NodeKind, activity: Option<&str>) -> Node {
        Node {
            id: id.into(),
            type_key: kind,
            type_version: "1.0.0".into(),
            name: id.into(),
            config: NodeConfig {
                activity_name: activity.map(str::to_string),
                ..NodeConfig::default()
            },
            ui: Position::default(),
            label: None,
        }
    }

    fn input(key: &str, value_type: ValueType, value: Value) -> Parameter {
        Parameter::literal(key, key, value_type, value, Direction::Input)
    }

    #[test]
    fn activity_name_resolution() {
        assert_eq!(activity_name(&node("a", NodeKind::Activity, Some("Foo"))), "Foo");
        assert_eq!(activity_name(&node("a", NodeKind::Activity, Some("  "))), "activity");
        assert_eq!(activity_name(&node("t", NodeKind::Transform, None)), "transform");
        assert_eq!(
            activity_name(&node("x", NodeKind::Other("vendor.".into()), None)),
            FALLBACK_ACTIVITY_NAME
        );
    }

    #[test]
    fn literals_by_type() {
        assert_eq!(
            literal_for(&input("s", ValueType::String, json!("abc"))),
            LiteralValue::String("abc".into())
        );
        assert_eq!(
            literal_for(&input("s", ValueType::String, json!(42))),
            LiteralValue::String("42".into())
        );
        assert_eq!(
            literal_for(&input("n", ValueType::Number, json!(42))),
            LiteralValue::Raw("42".into())
        );
        assert_eq!(
            literal_for(&input("n", ValueType::Number, json!("3.5"))),
            LiteralValue::Raw("3.5".into())
        );
        assert_eq!(
            literal_for(&input("b", ValueType::Boolean, json!(true))),
            LiteralValue::Raw("true".into())
        );
        assert_eq!(
            literal_for(&input("z", ValueType::ZSet, json!("a,b"))),
            LiteralValue::Raw("a,b".into())
        );
    }

    #[test]
    fn empty_values_become_zero() {
        assert_eq!(
            literal_for(&input("n", ValueType::Number, json!(""))),
            LiteralValue::Zero(FieldType::Float64)
        );
        assert_eq!(
            literal_for(&input("o", ValueType::Object, json!(null))),
            LiteralValue::Zero(FieldType::Map)
        );
        assert_eq!(
            literal_for(&input("s", ValueType::String, json!(null))),
            LiteralValue::Zero(FieldType::String)
        );
    }

    #[test]
    fn lower_activity_uses_node_symbols() {
        let mut n = node("act-1", NodeKind::Activity, Some("Foo"));
        n.config.parameters = vec![
            input("amount", ValueType::Number, json!(42)),
            Parameter::literal("r", "result", ValueType::String, json!(""), Direction::Output),
        ];
        let call = lower_activity(&n);
        assert_eq!(call.activity_name, "Foo");
        assert_eq!(call.var_suffix, "act1");
        assert_eq!(call.input_type, "Act1Input");
        assert_eq!(call.output_type, "Act1Output");
        assert_eq!(call.inputs.len(), 1);
        assert_eq!(call.inputs[0].field, "Amount");
    }
}
