use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Columns;

/// Chat thread between a tenant and a landlord about one listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    #[serde(default)]
    pub listing_id: Option<Uuid>,
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    #[serde(default)]
    pub landlord_id: Option<Uuid>,
    #[serde(default)]
    pub last_message_id: Option<Uuid>,
    #[serde(flatten)]
    pub extra: Columns,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub reply_to: Option<Uuid>,
    #[serde(flatten)]
    pub extra: Columns,
}

/// Request DTO for opening a conversation with its first message
#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    pub listing_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
}

/// Request DTO for posting a message to an existing conversation
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub sender_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub reply_to: Option<Uuid>,
}
