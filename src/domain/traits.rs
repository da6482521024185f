//! # Domain Traits
//!
//! Abstract interfaces for the bot's collaborators (chat platform, ship-data
//! service, persistence). Allows for pluggable implementations in the
//! Infrastructure layer and keeps the dispatcher testable without a live network.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::types::UserRecord;

/// Abstract interface for a chat channel (e.g., Discord, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the channel, returning the platform's message id
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Get the current channel ID
    fn channel_id(&self) -> String;
}

/// Abstract interface for the external ship-data service
#[async_trait]
pub trait ShipDataProvider: Send + Sync {
    /// Fetch the ship payload for one character name
    async fn ships_for(&self, character: &str) -> Result<Value, String>;

    /// Fetch a generated Mudae command string
    async fn mudae_command(&self) -> Result<String, String>;
}

/// Abstract interface for the per-user ship-list store
#[async_trait]
pub trait ShipListStore: Send + Sync {
    /// Return the stored record for the user, or a fresh unpersisted one
    async fn find_or_create(&self, discord_id: &str) -> Result<UserRecord, String>;

    /// Append one named list to the record and persist the whole record
    async fn append_and_save(
        &self,
        record: UserRecord,
        name: &str,
        ships: Value,
    ) -> Result<(), String>;
}
