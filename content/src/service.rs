use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use serde_json::{Map, Value};

use crate::attrs::{item_fields, to_attr, RESERVED_ATTRIBUTES};
use crate::model::{ContentItem, ContentKind};

/// Drop attribute names the repository maintains itself, so a payload
/// cannot spoof the storage keys or the server-side timestamps.
fn sanitize_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    for name in RESERVED_ATTRIBUTES {
        fields.remove(*name);
    }
    fields
}

/// List every document of a kind, newest first.
/// PK = kind partition, SK = "{prefix}{id}"
pub async fn list_items(
    client: &DynamoClient,
    table_name: &str,
    kind: ContentKind,
) -> Result<Vec<ContentItem>, String> {
    let descriptor = kind.descriptor();

    let result = client
        .query()
        .table_name(table_name)
        .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
        .expression_attribute_values(":pk", AttributeValue::S(descriptor.partition.to_string()))
        .expression_attribute_values(
            ":sk_prefix",
            AttributeValue::S(descriptor.item_prefix.to_string()),
        )
        .send()
        .await
        .map_err(|e| format!("DynamoDB query error: {}", e))?;

    let mut items = Vec::new();
    for item in result.items() {
        if let Some(sk) = item.get("SK").and_then(|v| v.as_s().ok()) {
            if let Some(id) = sk.strip_prefix(descriptor.item_prefix) {
                let created_at = item
                    .get("created_at")
                    .and_then(|v| v.as_s().ok())
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                let updated_at = item
                    .get("updated_at")
                    .and_then(|v| v.as_s().ok())
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                items.push(ContentItem {
                    id: id.to_string(),
                    created_at,
                    updated_at,
                    fields: item_fields(item),
                });
            }
        }
    }

    // Newest first; RFC3339 strings order lexicographically
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(items)
}

/// Persist one new document with server-side id and timestamps.
/// The caller has already validated required fields.
pub async fn create_item(
    client: &DynamoClient,
    table_name: &str,
    kind: ContentKind,
    fields: Map<String, Value>,
) -> Result<ContentItem, String> {
    let descriptor = kind.descriptor();
    let fields = sanitize_fields(fields);
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();
    let pk = descriptor.partition.to_string();
    let sk = format!("{}{}", descriptor.item_prefix, id);

    let mut builder = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(pk))
        .item("SK", AttributeValue::S(sk))
        .item("created_at", AttributeValue::S(now.clone()))
        .item("updated_at", AttributeValue::S(now.clone()));

    for (name, value) in &fields {
        builder = builder.item(name.clone(), to_attr(value));
    }

    builder
        .send()
        .await
        .map_err(|e| format!("DynamoDB put_item error: {}", e))?;

    Ok(ContentItem {
        id,
        created_at: now.clone(),
        updated_at: now,
        fields,
    })
}

/// Remove a document by identifier. The delete is unconditional, so a
/// missing identifier reports the same success as a real removal.
pub async fn delete_item(
    client: &DynamoClient,
    table_name: &str,
    kind: ContentKind,
    id: &str,
) -> Result<(), String> {
    let descriptor = kind.descriptor();
    let pk = descriptor.partition.to_string();
    let sk = format!("{}{}", descriptor.item_prefix, id);

    client
        .delete_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(pk))
        .key("SK", AttributeValue::S(sk))
        .send()
        .await
        .map_err(|e| format!("DynamoDB delete_item error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_orders_newest_first() {
        let mut items = vec![
            ContentItem {
                id: "old".to_string(),
                created_at: "2025-01-01T00:00:00+00:00".to_string(),
                updated_at: "2025-01-01T00:00:00+00:00".to_string(),
                fields: Map::new(),
            },
            ContentItem {
                id: "new".to_string(),
                created_at: "2025-06-01T00:00:00+00:00".to_string(),
                updated_at: "2025-06-01T00:00:00+00:00".to_string(),
                fields: Map::new(),
            },
            ContentItem {
                id: "mid".to_string(),
                created_at: "2025-03-01T00:00:00+00:00".to_string(),
                updated_at: "2025-03-01T00:00:00+00:00".to_string(),
                fields: Map::new(),
            },
        ];

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let order: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["new", "mid", "old"]);
    }

    #[test]
    fn kinds_do_not_share_storage_coordinates() {
        let partitions: Vec<&str> = [
            ContentKind::Video,
            ContentKind::Website,
            ContentKind::Model3d,
            ContentKind::BlogPost,
        ]
        .iter()
        .map(|k| k.descriptor().partition)
        .collect();

        for (i, p) in partitions.iter().enumerate() {
            for other in &partitions[i + 1..] {
                assert_ne!(p, other);
            }
        }
    }

    #[test]
    fn reserved_attribute_names_never_reach_the_store() {
        let fields = match json!({
            "title": "Demo",
            "PK": "WEBSITE",
            "SK": "WEBSITE#other",
            "created_at": "2099-01-01T00:00:00+00:00",
            "updated_at": "2099-01-01T00:00:00+00:00",
        }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };

        let clean = sanitize_fields(fields);
        assert_eq!(clean.len(), 1);
        assert!(clean.contains_key("title"));
    }

    #[test]
    fn created_fields_survive_into_the_item() {
        // Mirrors what create_item returns without touching the store
        let fields = match json!({"title": "Demo", "tags": ["ad"]}) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        let item = ContentItem {
            id: "x".to_string(),
            created_at: "now".to_string(),
            updated_at: "now".to_string(),
            fields,
        };
        assert_eq!(item.into_json()["tags"], json!(["ad"]));
    }
}
