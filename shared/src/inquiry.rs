use aws_sdk_sesv2::Client as SesClient;
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::{Deserialize, Serialize};

use crate::email::send_inquiry_email;
use crate::types::MailConfig;

/// A project inquiry from the public site. Never persisted: it is turned
/// into an email and discarded.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectInquiry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "projectType", default)]
    pub project_type: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize)]
struct InquiryResponse {
    success: bool,
    message: String,
}

/// Required fields that arrived absent or empty.
pub fn missing_inquiry_fields(inquiry: &ProjectInquiry) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if inquiry.name.trim().is_empty() {
        missing.push("name");
    }
    if inquiry.email.trim().is_empty() {
        missing.push("email");
    }
    if inquiry.project_type.trim().is_empty() {
        missing.push("projectType");
    }
    if inquiry.budget.trim().is_empty() {
        missing.push("budget");
    }
    if inquiry.description.trim().is_empty() {
        missing.push("description");
    }
    missing
}

/// HTTP Handler: POST /api/project
///
/// One send attempt, no retry; transport failure surfaces as a generic
/// internal error.
pub async fn handle_inquiry(
    ses_client: &SesClient,
    mail: &MailConfig,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    tracing::info!("Project inquiry received");

    let inquiry: ProjectInquiry = match serde_json::from_slice(body) {
        Ok(inquiry) => inquiry,
        Err(e) => {
            tracing::warn!("Failed to parse project inquiry: {}", e);
            return inquiry_response(
                StatusCode::BAD_REQUEST,
                InquiryResponse {
                    success: false,
                    message: "Missing required fields".to_string(),
                },
            );
        }
    };

    let missing = missing_inquiry_fields(&inquiry);
    if !missing.is_empty() {
        tracing::warn!("Project inquiry rejected, missing fields: {:?}", missing);
        return inquiry_response(
            StatusCode::BAD_REQUEST,
            InquiryResponse {
                success: false,
                message: "Missing required fields".to_string(),
            },
        );
    }

    match send_inquiry_email(ses_client, mail, &inquiry).await {
        Ok(_) => {
            tracing::info!("Inquiry email sent for: {}", inquiry.email);
            inquiry_response(
                StatusCode::OK,
                InquiryResponse {
                    success: true,
                    message: "Inquiry sent successfully".to_string(),
                },
            )
        }
        Err(e) => {
            tracing::error!("Failed to send inquiry email: {}", e);
            inquiry_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                InquiryResponse {
                    success: false,
                    message: "Failed to send inquiry. Please try again later.".to_string(),
                },
            )
        }
    }
}

fn inquiry_response(status: StatusCode, body: InquiryResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::to_string(&body)?.into())
        .map_err(Box::new)?)
}
