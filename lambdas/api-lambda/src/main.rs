use lambda_http::{run, service_fn, Error};
use lumen_shared::auth::AdminConfig;
use lumen_shared::types::MailConfig;
use lumen_shared::AppState;
use std::env;
use std::sync::Arc;

mod http_handler;
use http_handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    // Clients and configuration are built exactly once; every request
    // shares this state
    let config = aws_config::load_from_env().await;
    let dynamo_client = aws_sdk_dynamodb::Client::new(&config);
    let ses_client = aws_sdk_sesv2::Client::new(&config);

    let state = Arc::new(AppState {
        dynamo_client,
        ses_client,
        table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "lumen".to_string()),
        admin: AdminConfig {
            username: env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME must be set"),
            password: env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set"),
            session_secret: env::var("SESSION_SECRET").expect("SESSION_SECRET must be set"),
        },
        mail: MailConfig {
            from_address: env::var("INQUIRY_FROM_EMAIL").expect("INQUIRY_FROM_EMAIL must be set"),
            to_address: env::var("INQUIRY_TO_EMAIL").expect("INQUIRY_TO_EMAIL must be set"),
        },
    });

    run(service_fn(move |event| {
        let state = state.clone();
        async move { function_handler(event, state).await }
    }))
    .await
}
