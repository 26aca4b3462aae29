use std::sync::Arc;

use rentnest_core::{
    constants::{CONVERSATIONS_TABLE, MESSAGES_TABLE},
    models::{Conversation, Message, SendMessageRequest},
    AppError,
};
use serde_json::json;
use uuid::Uuid;

use crate::store::{Filter, Query, RemoteStore};

const WITH_LAST_MESSAGE: &str = "*, last_message:messages!last_message_id(*)";

/// Repository for conversations
#[derive(Clone)]
pub struct ConversationRepository {
    store: Arc<dyn RemoteStore>,
}

impl ConversationRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(db.table = "conversations", db.operation = "insert"))]
    pub async fn create(
        &self,
        listing_id: Uuid,
        tenant_id: Uuid,
        landlord_id: Uuid,
    ) -> Result<Conversation, AppError> {
        let row = json!({
            "listing_id": listing_id,
            "tenant_id": tenant_id,
            "landlord_id": landlord_id,
        });
        let conversation = self
            .store
            .insert(CONVERSATIONS_TABLE, row)
            .await?
            .decode_single()?;
        Ok(conversation)
    }

    /// Point the conversation at its newest message
    #[tracing::instrument(skip(self), fields(db.table = "conversations", db.operation = "update", db.record_id = %id))]
    pub async fn set_last_message(
        &self,
        id: Uuid,
        message_id: Uuid,
    ) -> Result<Option<Conversation>, AppError> {
        let query = Query::new().eq("id", id);
        let conversation = self
            .store
            .update(
                CONVERSATIONS_TABLE,
                &query,
                json!({ "last_message_id": message_id }),
            )
            .await?
            .decode_first()?;
        Ok(conversation)
    }

    #[tracing::instrument(skip(self), fields(db.table = "conversations", db.operation = "select", db.record_id = %id))]
    pub async fn get_with_last_message(&self, id: Uuid) -> Result<Option<Conversation>, AppError> {
        let query = Query::new().select(WITH_LAST_MESSAGE).eq("id", id);
        let conversation = self
            .store
            .select(CONVERSATIONS_TABLE, &query)
            .await?
            .decode_first()?;
        Ok(conversation)
    }

    /// Conversations where the user is tenant or landlord, newest first
    #[tracing::instrument(skip(self), fields(db.table = "conversations", db.operation = "select"))]
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Conversation>, AppError> {
        let query = Query::new()
            .select(WITH_LAST_MESSAGE)
            .or(vec![
                Filter::eq("tenant_id", user_id),
                Filter::eq("landlord_id", user_id),
            ])
            .order("created_at", false);
        let conversations = self
            .store
            .select(CONVERSATIONS_TABLE, &query)
            .await?
            .decode()?;
        Ok(conversations)
    }
}

/// Repository for messages
#[derive(Clone)]
pub struct MessageRepository {
    store: Arc<dyn RemoteStore>,
}

impl MessageRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self, request), fields(db.table = "messages", db.operation = "insert"))]
    pub async fn create(
        &self,
        conversation_id: Uuid,
        request: &SendMessageRequest,
    ) -> Result<Message, AppError> {
        let row = json!({
            "conversation_id": conversation_id,
            "sender_id": request.sender_id,
            "content": request.content,
            "reply_to": request.reply_to,
        });
        let message = self
            .store
            .insert(MESSAGES_TABLE, row)
            .await?
            .decode_single()?;
        Ok(message)
    }

    /// Messages of a conversation, oldest first
    #[tracing::instrument(skip(self), fields(db.table = "messages", db.operation = "select"))]
    pub async fn list_for_conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Vec<Message>, AppError> {
        let query = Query::new()
            .eq("conversation_id", conversation_id)
            .order("created_at", true);
        let messages = self.store.select(MESSAGES_TABLE, &query).await?.decode()?;
        Ok(messages)
    }
}
