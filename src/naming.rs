//! Identifier sanitizing and value-type mapping.
//!
//! The key policy is ASCII-only and matches what the editor enforces while
//! typing, so the editor and the compiler agree on what a legal key is.

use crate::ir::types::FieldType;
use crate::parse::ValueType;

/// Keep only `[A-Za-z0-9_]`. Used for code symbols derived from node ids.
pub fn sanitize_identifier(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Keep only `[A-Za-z0-9_-]`. Used for user-facing keys.
pub fn sanitize_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Upper-case, with every character outside `[A-Z0-9_]` replaced by `_`.
pub fn sanitize_env_var_name(text: &str) -> String {
    text.chars()
        .map(|c| c.to_ascii_uppercase())
        .map(|c| {
            if c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Capitalize every underscore-delimited segment and drop the underscores.
/// The rest of each segment is left as written: `order_id` → `OrderId`,
/// `ORDER_ID` → `ORDERID`.
pub fn to_pascal_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    for segment in identifier.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Type name stem for a node: `start-1` → `Start1`, `9f2c` → `Node9f2c`.
pub fn symbol_name(node_id: &str) -> String {
    let name = to_pascal_case(&sanitize_identifier(node_id));
    if starts_like_identifier(&name) {
        name
    } else {
        format!("Node{}", name)
    }
}

/// Struct field name for a parameter key. May be empty when the key has no
/// legal characters at all; IR validation rejects that.
pub fn field_name(key: &str) -> String {
    let name = to_pascal_case(&sanitize_identifier(key));
    if name.is_empty() || starts_like_identifier(&name) {
        name
    } else {
        format!("Field{}", name)
    }
}

/// Variable-name suffix for a node: the sanitized id as written.
pub fn var_suffix(node_id: &str) -> String {
    sanitize_identifier(node_id)
}

/// Lossy for `ZSet`, which is carried as a string.
pub fn map_value_type(value_type: ValueType) -> FieldType {
    match value_type {
        ValueType::Number => FieldType::Float64,
        ValueType::Boolean => FieldType::Bool,
        ValueType::Object | ValueType::Array => FieldType::Map,
        ValueType::String | ValueType::ZSet => FieldType::String,
    }
}

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Reserved words that can never name a Go function or package.
pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

fn starts_like_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_identifier_strips_everything_else() {
        assert_eq!(sanitize_identifier("a-b c!1"), "ab1");
        assert_eq!(sanitize_identifier("ORDER_ID"), "ORDER_ID");
        assert_eq!(sanitize_identifier("héllo"), "hllo");
    }

    #[test]
    fn sanitize_key_keeps_dashes() {
        assert_eq!(sanitize_key("order-id 2!"), "order-id2");
        assert_eq!(sanitize_key("ключ_1"), "_1");
    }

    #[test]
    fn env_var_names() {
        assert_eq!(sanitize_env_var_name("api-token v2"), "API_TOKEN_V2");
        assert_eq!(sanitize_env_var_name("DB_URL"), "DB_URL");
    }

    #[test]
    fn go_keywords() {
        assert!(is_go_keyword("func"));
        assert!(is_go_keyword("type"));
        assert!(!is_go_keyword("Func"));
        assert!(!is_go_keyword("workflows"));
    }

    #[test]
    fn pascal_case() {
        assert_eq!(to_pascal_case("amount"), "Amount");
        assert_eq!(to_pascal_case("order_id"), "OrderId");
        assert_eq!(to_pascal_case("ORDER_ID"), "ORDERID");
        assert_eq!(to_pascal_case("_leading__double_"), "LeadingDouble");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn symbol_and_field_names() {
        assert_eq!(symbol_name("start-1"), "Start1");
        assert_eq!(symbol_name("act_charge"), "ActCharge");
        assert_eq!(symbol_name("9f2c"), "Node9f2c");
        assert_eq!(symbol_name("---"), "Node");
        assert_eq!(field_name("total_count"), "TotalCount");
        assert_eq!(field_name("2fa"), "Field2fa");
        assert_eq!(field_name("!!"), "");
    }

    #[test]
    fn value_type_mapping() {
        assert_eq!(map_value_type(ValueType::Number), FieldType::Float64);
        assert_eq!(map_value_type(ValueType::Boolean), FieldType::Bool);
        assert_eq!(map_value_type(ValueType::Array), FieldType::Map);
        assert_eq!(map_value_type(ValueType::Object), FieldType::Map);
        assert_eq!(map_value_type(ValueType::String), FieldType::String);
        assert_eq!(map_value_type(ValueType::ZSet), FieldType::String);
    }
}
