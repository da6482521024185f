//! # Domain Types
//!
//! Common data structures and enums used across the application logic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One inbound chat message, as seen by the dispatcher.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub author_id: String,
    pub from_bot: bool,
    pub text: String,
}

/// The closed set of commands the bot reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `$mm` / `$mymarry`: sync every listed character
    SyncList,
    /// `!ship <name>`: look up one character; `None` if the name is missing
    ShipLookup { character: Option<String> },
    /// `!mudae`: generate a Mudae ship command
    GenerateCommand,
}

/// One user's persisted document. Serialized with the camelCase field names
/// the store documents were written with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub discord_id: String,
    #[serde(default)]
    pub ship_lists: Vec<ShipListEntry>,
}

impl UserRecord {
    pub fn new(discord_id: &str) -> Self {
        Self {
            discord_id: discord_id.to_string(),
            ship_lists: Vec::new(),
        }
    }
}

/// One named ship list. The `ships` payload is opaque to the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShipListEntry {
    pub name: String,
    pub ships: Value,
}
