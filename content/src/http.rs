use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde_json::{Map, Value};

use crate::model::{missing_required_fields, ContentKind};
use crate::service::{create_item, delete_item, list_items};

fn plain_ok(message: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .header("Access-Control-Allow-Origin", "*")
        .body(message.into())
        .map_err(Box::new)?)
}

fn json_error(status: StatusCode, message: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::json!({"error": message}).to_string().into())
        .map_err(Box::new)?)
}

/// HTTP Handler: GET /api/admin/{kind}
pub async fn list_handler(
    client: &DynamoClient,
    table_name: &str,
    kind: ContentKind,
) -> Result<Response<Body>, Error> {
    match list_items(client, table_name, kind).await {
        Ok(items) => {
            let docs: Vec<Value> = items.into_iter().map(|item| item.into_json()).collect();
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(serde_json::to_string(&docs)?.into())
                .map_err(Box::new)?)
        }
        Err(e) => {
            tracing::error!("Failed to list {}: {}", kind.descriptor().label, e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// HTTP Handler: POST /api/admin/{kind}
///
/// Responds with a plaintext confirmation; the new identifier is not part
/// of the response.
pub async fn create_handler(
    client: &DynamoClient,
    table_name: &str,
    kind: ContentKind,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let descriptor = kind.descriptor();

    let payload: Map<String, Value> = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Invalid {} payload: {}", descriptor.label, e);
            return json_error(StatusCode::BAD_REQUEST, "Missing required fields");
        }
    };

    let missing = missing_required_fields(descriptor, &payload);
    if !missing.is_empty() {
        tracing::warn!(
            "{} creation rejected, missing fields: {:?}",
            descriptor.label,
            missing
        );
        return json_error(StatusCode::BAD_REQUEST, "Missing required fields");
    }

    match create_item(client, table_name, kind, payload).await {
        Ok(_) => plain_ok(format!("{} added successfully", descriptor.label)),
        Err(e) => {
            tracing::error!("Failed to create {}: {}", descriptor.label, e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// HTTP Handler: DELETE /api/admin/{kind}?id={id}
///
/// Deleting an identifier that does not exist reports the same success as
/// deleting one that does.
pub async fn delete_handler(
    client: &DynamoClient,
    table_name: &str,
    kind: ContentKind,
    id: &str,
) -> Result<Response<Body>, Error> {
    let result = delete_item(client, table_name, kind, id).await;
    if let Err(e) = &result {
        tracing::error!("Failed to delete {} {}: {}", kind.descriptor().label, id, e);
    }
    delete_response(kind, result)
}

fn delete_response(kind: ContentKind, result: Result<(), String>) -> Result<Response<Body>, Error> {
    match result {
        Ok(()) => plain_ok(format!("{} deleted successfully", kind.descriptor().label)),
        Err(_) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_uses_the_kind_label() {
        let resp = plain_ok(format!(
            "{} added successfully",
            ContentKind::Video.descriptor().label
        ))
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        match resp.body() {
            Body::Text(text) => assert_eq!(text, "Video added successfully"),
            _ => panic!("expected text body"),
        }
    }

    #[test]
    fn delete_confirms_whether_or_not_the_id_existed() {
        // The service issues an unconditional delete, so an unknown id and
        // a real removal both come back Ok(()) and share this confirmation
        let resp = delete_response(ContentKind::Video, Ok(())).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        match resp.body() {
            Body::Text(text) => assert_eq!(text, "Video deleted successfully"),
            _ => panic!("expected text body"),
        }
    }

    #[test]
    fn error_responses_are_json_with_cors() {
        let resp = json_error(StatusCode::BAD_REQUEST, "Missing required fields").unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        match resp.body() {
            Body::Text(text) => {
                assert_eq!(text, r#"{"error":"Missing required fields"}"#);
            }
            _ => panic!("expected text body"),
        }
    }
}
