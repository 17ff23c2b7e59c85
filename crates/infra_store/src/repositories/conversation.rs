//! Chat transcript repository
//!
//! One row per session. Saving replaces the stored message sequence as a
//! whole; concurrent saves for the same session are last-writer-wins.

use std::sync::Arc;

use tracing::{debug, instrument};

use domain_crm::{ChatConversation, SaveConversation};

use super::{from_row, to_row, Stamped, CHAT_CONVERSATIONS_TABLE};
use crate::error::StoreError;
use crate::provider::StoreHandle;
use crate::query::Select;
use crate::store::TableStore;

/// Data access for `security_chat_conversations`
#[derive(Debug, Clone)]
pub struct ConversationRepository {
    store: Arc<dyn TableStore>,
}

impl ConversationRepository {
    pub fn new(handle: &StoreHandle) -> Self {
        Self::from_store(handle.store())
    }

    pub fn from_store(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Creates or replaces the transcript for a session
    #[instrument(
        skip(self, request),
        fields(session_id = %request.session_id, messages = request.messages.len())
    )]
    pub async fn save(&self, request: SaveConversation) -> Result<ChatConversation, StoreError> {
        let request = request.prepare()?;
        let row = to_row(&Stamped::now(request))?;
        let saved = self
            .store
            .upsert(CHAT_CONVERSATIONS_TABLE, row, "session_id")
            .await?;
        debug!("Conversation saved");
        from_row(saved)
    }

    /// The transcript for a session
    #[instrument(skip(self))]
    pub async fn get_by_session(&self, session_id: &str) -> Result<ChatConversation, StoreError> {
        let query = Select::from(CHAT_CONVERSATIONS_TABLE).eq("session_id", session_id);
        from_row(self.store.select_single(&query).await?)
    }
}
