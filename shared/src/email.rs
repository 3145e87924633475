use aws_sdk_sesv2::types::{Body as EmailBody, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;

use crate::inquiry::ProjectInquiry;
use crate::types::MailConfig;

/// Escape a user-supplied string for interpolation into an HTML body.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn html_row(label: &str, value: &str) -> String {
    format!(
        "<tr><td style=\"padding:8px 16px;font-weight:bold;\">{}</td>\
         <td style=\"padding:8px 16px;\">{}</td></tr>",
        label,
        escape_html(value)
    )
}

/// Render the inquiry notification as an HTML document. Every
/// user-supplied value goes through escape_html.
pub fn render_inquiry_html(inquiry: &ProjectInquiry) -> String {
    let mut rows = String::new();
    rows.push_str(&html_row("Name", &inquiry.name));
    rows.push_str(&html_row("Email", &inquiry.email));
    if let Some(company) = &inquiry.company {
        rows.push_str(&html_row("Company", company));
    }
    rows.push_str(&html_row("Project type", &inquiry.project_type));
    rows.push_str(&html_row("Budget", &inquiry.budget));
    if let Some(timeline) = &inquiry.timeline {
        rows.push_str(&html_row("Timeline", timeline));
    }

    format!(
        "<!DOCTYPE html>\
         <html><body style=\"font-family:Arial,sans-serif;color:#1a1a1a;\">\
         <h2>New project inquiry</h2>\
         <table style=\"border-collapse:collapse;\">{}</table>\
         <h3>Description</h3>\
         <p>{}</p>\
         </body></html>",
        rows,
        escape_html(&inquiry.description)
    )
}

/// Plaintext fallback for clients that do not render HTML.
pub fn render_inquiry_text(inquiry: &ProjectInquiry) -> String {
    let mut text = String::from("New project inquiry\n\n");
    text.push_str(&format!("Name: {}\n", inquiry.name));
    text.push_str(&format!("Email: {}\n", inquiry.email));
    if let Some(company) = &inquiry.company {
        text.push_str(&format!("Company: {}\n", company));
    }
    text.push_str(&format!("Project type: {}\n", inquiry.project_type));
    text.push_str(&format!("Budget: {}\n", inquiry.budget));
    if let Some(timeline) = &inquiry.timeline {
        text.push_str(&format!("Timeline: {}\n", timeline));
    }
    text.push_str(&format!("\nDescription:\n{}\n", inquiry.description));
    text
}

/// Send the inquiry notification through SES. One attempt, no retry.
pub async fn send_inquiry_email(
    client: &SesClient,
    mail: &MailConfig,
    inquiry: &ProjectInquiry,
) -> Result<(), String> {
    let subject = Content::builder()
        .data(format!("New project inquiry from {}", inquiry.name))
        .charset("UTF-8")
        .build()
        .map_err(|e| format!("SES subject error: {}", e))?;

    let html = Content::builder()
        .data(render_inquiry_html(inquiry))
        .charset("UTF-8")
        .build()
        .map_err(|e| format!("SES html body error: {}", e))?;

    let text = Content::builder()
        .data(render_inquiry_text(inquiry))
        .charset("UTF-8")
        .build()
        .map_err(|e| format!("SES text body error: {}", e))?;

    let message = Message::builder()
        .subject(subject)
        .body(EmailBody::builder().html(html).text(text).build())
        .build();

    client
        .send_email()
        .from_email_address(&mail.from_address)
        .destination(
            Destination::builder()
                .to_addresses(&mail.to_address)
                .build(),
        )
        .reply_to_addresses(&inquiry.email)
        .content(EmailContent::builder().simple(message).build())
        .send()
        .await
        .map_err(|e| format!("SES send_email error: {}", e))?;

    Ok(())
}
