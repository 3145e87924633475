use lambda_http::http::header::{HeaderValue, VARY};
use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use lumen_content::{blog, http as content_http, model::ContentKind};
use lumen_shared::{auth, inquiry, AppState};
use std::sync::Arc;

fn with_cors_headers(mut resp: Response<Body>) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,POST,DELETE,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type,Authorization"),
    );
    headers.append(VARY, HeaderValue::from_static("Origin"));
    resp
}

fn finalize_response(resp: Result<Response<Body>, Error>) -> Result<Response<Body>, Error> {
    resp.map(with_cors_headers)
}

/// Main Lambda handler - routes requests to auth, admin content, or
/// inquiry endpoints
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let body = event.body();
    tracing::info!("API invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if method == "OPTIONS" {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp));
    }

    // Admin login (no token required)
    if path == "/api/admin/auth" {
        return match method {
            &Method::POST => finalize_response(auth::login(&state.admin, body).await),
            _ => finalize_response(method_not_allowed()),
        };
    }

    // Public project inquiry form
    if path == "/api/project" {
        return match method {
            &Method::POST => finalize_response(
                inquiry::handle_inquiry(&state.ses_client, &state.mail, body).await,
            ),
            _ => finalize_response(method_not_allowed()),
        };
    }

    // Admin content routes: /api/admin/{video|web|model|blog}
    if let Some(segment) = path.strip_prefix("/api/admin/") {
        let kind = match ContentKind::from_route(segment) {
            Some(kind) => kind,
            None => return finalize_response(not_found()),
        };

        // Every content route requires a verified bearer token
        let auth_header = event
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok());
        let verified = auth::bearer_token(auth_header)
            .and_then(|token| auth::verify_token(&state.admin, token));
        if verified.is_none() {
            tracing::warn!("Rejected unauthenticated admin request to {}", path);
            return finalize_response(unauthorized());
        }

        let resp = match (method, kind) {
            (&Method::GET, _) => {
                content_http::list_handler(&state.dynamo_client, &state.table_name, kind).await
            }
            (&Method::POST, ContentKind::BlogPost) => {
                blog::create_post_handler(&state.dynamo_client, &state.table_name, body).await
            }
            (&Method::POST, _) => {
                content_http::create_handler(&state.dynamo_client, &state.table_name, kind, body)
                    .await
            }
            // Blog posts have no delete route
            (&Method::DELETE, ContentKind::BlogPost) => method_not_allowed(),
            (&Method::DELETE, _) => {
                match event
                    .query_string_parameters_ref()
                    .and_then(|params| params.first("id"))
                {
                    Some(id) => {
                        content_http::delete_handler(
                            &state.dynamo_client,
                            &state.table_name,
                            kind,
                            id,
                        )
                        .await
                    }
                    None => Ok(Response::builder()
                        .status(StatusCode::BAD_REQUEST)
                        .header("Content-Type", "application/json")
                        .body(
                            serde_json::json!({"error": "Missing id query parameter"})
                                .to_string()
                                .into(),
                        )
                        .map_err(Box::new)?),
                }
            }
            _ => method_not_allowed(),
        };

        return finalize_response(resp);
    }

    // No matching route
    tracing::warn!("No route matched - Method: {} Path: {}", method, path);
    finalize_response(not_found())
}

fn not_found() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(serde_json::json!({"error": "Not found"}).to_string().into())
        .map_err(Box::new)?)
}

fn method_not_allowed() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({"error": "Method not allowed"})
                .to_string()
                .into(),
        )
        .map_err(Box::new)?)
}

fn unauthorized() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({"success": false, "message": "Unauthorized"})
                .to_string()
                .into(),
        )
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_shared::auth::AdminConfig;

    fn config() -> AdminConfig {
        AdminConfig {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
            session_secret: "router-test-secret".to_string(),
        }
    }

    #[test]
    fn admin_routes_reject_missing_or_unsigned_tokens() {
        let config = config();

        assert!(auth::bearer_token(None)
            .and_then(|t| auth::verify_token(&config, t))
            .is_none());

        // A bare base64(username:millis) token with no signature segment,
        // as the original site issued, is not accepted
        let header = Some("Bearer YWRtaW46MTcwMDAwMDAwMDAwMA==");
        assert!(auth::bearer_token(header)
            .and_then(|t| auth::verify_token(&config, t))
            .is_none());
    }

    #[test]
    fn cors_headers_are_applied() {
        let resp = with_cors_headers(
            Response::builder()
                .status(StatusCode::OK)
                .body(Body::Empty)
                .unwrap(),
        );
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Methods").unwrap(),
            "GET,POST,DELETE,OPTIONS"
        );
    }

    #[test]
    fn unknown_admin_segments_are_not_content_kinds() {
        assert!(ContentKind::from_route("auth").is_none());
        assert!(ContentKind::from_route("users").is_none());
    }
}
