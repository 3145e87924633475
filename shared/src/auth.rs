use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Admin credentials and the token signing key, read from the environment
/// once at startup.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
    pub session_secret: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub message: String,
}

/// Issue a signed session token.
///
/// The first segment is `base64(username ":" epoch-millis)`; the second is
/// an HMAC-SHA256 signature over that payload. The payload stays readable,
/// the signature is what the admin routes check.
pub fn issue_token(config: &AdminConfig, now_millis: i64) -> Result<String, String> {
    let payload = format!("{}:{}", config.username, now_millis);
    let mut mac = HmacSha256::new_from_slice(config.session_secret.as_bytes())
        .map_err(|e| format!("HMAC key error: {}", e))?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    Ok(format!(
        "{}.{}",
        STANDARD.encode(payload.as_bytes()),
        STANDARD.encode(signature)
    ))
}

/// Verify a token and return the username it was issued to.
pub fn verify_token(config: &AdminConfig, token: &str) -> Option<String> {
    let (payload_b64, signature_b64) = token.split_once('.')?;
    let payload = STANDARD.decode(payload_b64).ok()?;
    let signature = STANDARD.decode(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(config.session_secret.as_bytes()).ok()?;
    mac.update(&payload);
    mac.verify_slice(&signature).ok()?;

    let payload = String::from_utf8(payload).ok()?;
    let (username, millis) = payload.rsplit_once(':')?;
    millis.parse::<i64>().ok()?;

    Some(username.to_string())
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix("Bearer ").map(str::trim)
}

/// HTTP Handler: POST /api/admin/auth
///
/// Equality-compares the submitted credentials against the configured
/// admin secrets. Stateless: no lockout, no rate limiting, no server-side
/// session record.
pub async fn login(config: &AdminConfig, body: &[u8]) -> Result<Response<Body>, Error> {
    let request: LoginRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Failed to parse login request: {}", e);
            return login_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                LoginResponse {
                    success: false,
                    token: None,
                    message: "Internal server error".to_string(),
                },
            );
        }
    };

    if request.username != config.username || request.password != config.password {
        tracing::warn!("Rejected login for username: {}", request.username);
        return login_response(
            StatusCode::UNAUTHORIZED,
            LoginResponse {
                success: false,
                token: None,
                message: "Invalid username or password".to_string(),
            },
        );
    }

    match issue_token(config, chrono::Utc::now().timestamp_millis()) {
        Ok(token) => {
            tracing::info!("Admin login succeeded");
            login_response(
                StatusCode::OK,
                LoginResponse {
                    success: true,
                    token: Some(token),
                    message: "Authenticated".to_string(),
                },
            )
        }
        Err(e) => {
            tracing::error!("Failed to issue session token: {}", e);
            login_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                LoginResponse {
                    success: false,
                    token: None,
                    message: "Internal server error".to_string(),
                },
            )
        }
    }
}

fn login_response(status: StatusCode, body: LoginResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::to_string(&body)?.into())
        .map_err(Box::new)?)
}
