use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_sesv2::Client as SesClient;

use crate::auth::AdminConfig;

// ========== CONTENT ==========
pub use lumen_content::blog::{Author, ContentBlock, CreateBlogPostPayload, Hero, PostMetadata};
pub use lumen_content::model::{ContentItem, ContentKind};

// ========== INQUIRY ==========
pub use crate::inquiry::ProjectInquiry;

/// Sender and recipient for inquiry notifications.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from_address: String,
    pub to_address: String,
}

/// Process-wide state, constructed once at startup and shared behind Arc.
/// Clients are established eagerly; there is no lazily memoized global
/// connection.
pub struct AppState {
    pub dynamo_client: DynamoClient,
    pub ses_client: SesClient,
    pub table_name: String,
    pub admin: AdminConfig,
    pub mail: MailConfig,
}
