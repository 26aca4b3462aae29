//! Conversation bookkeeping: every new message becomes the conversation's
//! `last_message_id`.
//!
//! The writes are sequential and dependent. A failure after the first insert
//! leaves the earlier rows behind (a conversation without a last message, or
//! a message the conversation does not point at yet).

use rentnest_core::{
    constants::RECORD_NOT_FOUND,
    models::{Conversation, CreateConversationRequest, Message, SendMessageRequest},
    AppError,
};
use uuid::Uuid;

use crate::state::Repositories;

/// Create a conversation with its first message and return it with the
/// `last_message` relation embedded.
#[tracing::instrument(skip(repos, request), fields(listing_id = %request.listing_id))]
pub async fn start_conversation(
    repos: &Repositories,
    request: CreateConversationRequest,
) -> Result<Conversation, AppError> {
    let conversation = repos
        .conversations
        .create(request.listing_id, request.tenant_id, request.landlord_id)
        .await?;

    let first = SendMessageRequest {
        sender_id: request.sender_id,
        content: request.content,
        reply_to: None,
    };
    let message = repos
        .messages
        .create(conversation.id, &first)
        .await
        .inspect_err(|e| {
            tracing::warn!(
                conversation_id = %conversation.id,
                error = %e,
                "First message insert failed; conversation left without messages"
            );
        })?;

    repos
        .conversations
        .set_last_message(conversation.id, message.id)
        .await
        .inspect_err(|e| {
            tracing::warn!(
                conversation_id = %conversation.id,
                message_id = %message.id,
                error = %e,
                "Failed to point conversation at its first message"
            );
        })?;

    repos
        .conversations
        .get_with_last_message(conversation.id)
        .await?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_FOUND.to_string()))
}

/// Append a message and move the conversation's `last_message_id` to it.
#[tracing::instrument(skip(repos, request), fields(conversation_id = %conversation_id))]
pub async fn send_message(
    repos: &Repositories,
    conversation_id: Uuid,
    request: SendMessageRequest,
) -> Result<Message, AppError> {
    let message = repos.messages.create(conversation_id, &request).await?;

    let updated = repos
        .conversations
        .set_last_message(conversation_id, message.id)
        .await
        .inspect_err(|e| {
            tracing::warn!(
                conversation_id = %conversation_id,
                message_id = %message.id,
                error = %e,
                "Message stored but conversation still points at the previous one"
            );
        })?;

    if updated.is_none() {
        tracing::warn!(
            conversation_id = %conversation_id,
            message_id = %message.id,
            "Message stored for a conversation that does not exist"
        );
    }

    Ok(message)
}
