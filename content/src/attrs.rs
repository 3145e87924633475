use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// Attribute names the repository maintains itself. Payload fields must
/// never shadow them.
pub const RESERVED_ATTRIBUTES: &[&str] = &["PK", "SK", "created_at", "updated_at"];

/// Convert a JSON value into a DynamoDB attribute. Content documents are
/// schema-flexible, so the repository maps whatever shape the validated
/// payload carries instead of naming attributes one by one.
pub fn to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attr).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), to_attr(v)))
                .collect(),
        ),
    }
}

/// Convert a DynamoDB attribute back into a JSON value. Attribute types
/// this repository never writes (sets, binary) come back as null.
pub fn from_attr(attr: &AttributeValue) -> Value {
    if let Ok(s) = attr.as_s() {
        return Value::String(s.clone());
    }
    if let Ok(b) = attr.as_bool() {
        return Value::Bool(*b);
    }
    if let Ok(n) = attr.as_n() {
        if let Ok(i) = n.parse::<i64>() {
            return Value::Number(Number::from(i));
        }
        if let Some(num) = n.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(num);
        }
        return Value::Null;
    }
    if let Ok(items) = attr.as_l() {
        return Value::Array(items.iter().map(from_attr).collect());
    }
    if let Ok(map) = attr.as_m() {
        return Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), from_attr(v)))
                .collect(),
        );
    }
    Value::Null
}

/// Extract the document fields from a stored item, skipping the key and
/// timestamp attributes the repository maintains itself.
pub fn item_fields(item: &HashMap<String, AttributeValue>) -> Map<String, Value> {
    item.iter()
        .filter(|(name, _)| !RESERVED_ATTRIBUTES.contains(&name.as_str()))
        .map(|(name, attr)| (name.clone(), from_attr(attr)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_document_round_trips() {
        let doc = json!({
            "hero": {
                "title": "Launch",
                "author": {"name": "Ada", "title": "Director"},
            },
            "content": [
                {"type": "paragraph", "text": "Hello"},
                {"type": "image", "url": "http://x", "caption": null},
            ],
            "verified": false,
            "readTime": 7,
        });
        assert_eq!(from_attr(&to_attr(&doc)), doc);
    }

    #[test]
    fn numbers_keep_integer_and_float_forms() {
        assert_eq!(from_attr(&to_attr(&json!(42))), json!(42));
        assert_eq!(from_attr(&to_attr(&json!(1.5))), json!(1.5));
    }

    #[test]
    fn item_fields_skips_repository_attributes() {
        let mut item = HashMap::new();
        item.insert("PK".to_string(), AttributeValue::S("VIDEO".to_string()));
        item.insert("SK".to_string(), AttributeValue::S("VIDEO#1".to_string()));
        item.insert(
            "created_at".to_string(),
            AttributeValue::S("2025-01-01T00:00:00+00:00".to_string()),
        );
        item.insert("title".to_string(), AttributeValue::S("Demo".to_string()));

        let fields = item_fields(&item);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["title"], json!("Demo"));
    }
}
