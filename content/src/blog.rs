use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::ContentKind;
use crate::service::create_item;

/// Blog posts are the one nested content shape, so they get a typed model
/// instead of a bare field list. Storage still goes through the generic
/// repository.

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Author {
    pub name: String,
    pub title: String,
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub author: Author,
    #[serde(rename = "featuredImage")]
    pub featured_image: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostMetadata {
    pub date: String,
    #[serde(rename = "readTime")]
    pub read_time: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Paragraph {
        text: String,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Blockquote {
        quote: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateBlogPostPayload {
    pub hero: Hero,
    pub metadata: PostMetadata,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub verified: bool,
}

/// Required strings that deserialized empty, plus an empty content body.
pub fn missing_post_fields(payload: &CreateBlogPostPayload) -> Vec<&'static str> {
    let checks: [(&str, &'static str); 8] = [
        (&payload.hero.title, "hero.title"),
        (&payload.hero.subtitle, "hero.subtitle"),
        (&payload.hero.author.name, "hero.author.name"),
        (&payload.hero.author.title, "hero.author.title"),
        (&payload.hero.author.image, "hero.author.image"),
        (&payload.hero.featured_image, "hero.featuredImage"),
        (&payload.metadata.date, "metadata.date"),
        (&payload.metadata.read_time, "metadata.readTime"),
    ];

    let mut missing: Vec<&'static str> = checks
        .iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, name)| *name)
        .collect();

    if payload.content.is_empty() {
        missing.push("content");
    }
    missing
}

/// HTTP Handler: POST /api/admin/blog
pub async fn create_post_handler(
    client: &DynamoClient,
    table_name: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: CreateBlogPostPayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Invalid blog post payload: {}", e);
            return Ok(Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(
                    serde_json::json!({"error": "Missing required fields"})
                        .to_string()
                        .into(),
                )
                .map_err(Box::new)?);
        }
    };

    let missing = missing_post_fields(&payload);
    if !missing.is_empty() {
        tracing::warn!("Blog post creation rejected, missing fields: {:?}", missing);
        return Ok(Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .body(
                serde_json::json!({"error": "Missing required fields"})
                    .to_string()
                    .into(),
            )
            .map_err(Box::new)?);
    }

    let fields = match serde_json::to_value(&payload)? {
        Value::Object(map) => map,
        _ => unreachable!("blog payload serializes to an object"),
    };

    match create_item(client, table_name, ContentKind::BlogPost, fields).await {
        Ok(_) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/plain")
            .header("Access-Control-Allow-Origin", "*")
            .body("Blog post added successfully".into())
            .map_err(Box::new)?),
        Err(e) => {
            tracing::error!("Failed to create blog post: {}", e);
            Ok(Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(
                    serde_json::json!({"error": "Internal server error"})
                        .to_string()
                        .into(),
                )
                .map_err(Box::new)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "hero": {
                "title": "Designing in the open",
                "subtitle": "Notes from a studio rebuild",
                "author": {"name": "Ada", "title": "Creative Director", "image": "http://a"},
                "featuredImage": "http://f",
            },
            "metadata": {"date": "2025-06-01", "readTime": "7 min"},
            "content": [
                {"type": "paragraph", "text": "We rebuilt the studio site."},
                {"type": "image", "url": "http://img", "caption": "Before and after"},
                {"type": "blockquote", "quote": "Ship small.", "attribution": "Ada"},
            ],
        })
    }

    #[test]
    fn tagged_blocks_deserialize() {
        let payload: CreateBlogPostPayload =
            serde_json::from_value(sample_payload()).unwrap();
        assert_eq!(payload.content.len(), 3);
        assert!(matches!(payload.content[0], ContentBlock::Paragraph { .. }));
        assert!(matches!(payload.content[1], ContentBlock::Image { .. }));
        assert!(matches!(payload.content[2], ContentBlock::Blockquote { .. }));
    }

    #[test]
    fn verified_defaults_to_false() {
        let payload: CreateBlogPostPayload =
            serde_json::from_value(sample_payload()).unwrap();
        assert!(!payload.verified);
    }

    #[test]
    fn unknown_block_tags_are_rejected() {
        let mut doc = sample_payload();
        doc["content"][0] = json!({"type": "video", "url": "http://v"});
        assert!(serde_json::from_value::<CreateBlogPostPayload>(doc).is_err());
    }

    #[test]
    fn empty_title_and_body_are_reported_missing() {
        let mut doc = sample_payload();
        doc["hero"]["title"] = json!("  ");
        doc["content"] = json!([]);
        let payload: CreateBlogPostPayload = serde_json::from_value(doc).unwrap();
        assert_eq!(missing_post_fields(&payload), vec!["hero.title", "content"]);
    }

    #[test]
    fn every_hero_and_metadata_string_is_required() {
        let mut doc = sample_payload();
        doc["hero"]["subtitle"] = json!("");
        doc["hero"]["author"]["image"] = json!(" ");
        doc["metadata"]["readTime"] = json!("");
        let payload: CreateBlogPostPayload = serde_json::from_value(doc).unwrap();
        assert_eq!(
            missing_post_fields(&payload),
            vec!["hero.subtitle", "hero.author.image", "metadata.readTime"]
        );
    }

    #[test]
    fn block_serialization_keeps_the_tag() {
        let block = ContentBlock::Paragraph {
            text: "Hello".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({"type": "paragraph", "text": "Hello"})
        );
    }
}
