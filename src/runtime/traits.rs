//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the controller with mock implementations.

use crate::api::{ApiError, ChatResponse, ReplyRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Client for the two dialogue-service exchanges
#[async_trait]
pub trait DialogueClient: Send + Sync {
    /// Open a new session
    async fn start(&self) -> Result<ChatResponse, ApiError>;

    /// Send one user turn within an open session
    async fn reply(&self, request: &ReplyRequest) -> Result<ChatResponse, ApiError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: DialogueClient + ?Sized> DialogueClient for Arc<T> {
    async fn start(&self) -> Result<ChatResponse, ApiError> {
        (**self).start().await
    }

    async fn reply(&self, request: &ReplyRequest) -> Result<ChatResponse, ApiError> {
        (**self).reply(request).await
    }
}
