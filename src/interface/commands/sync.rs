//! # Sync Workflow
//!
//! Handles `$mm` / `$mymarry`: fetches ships for every character listed under
//! the command line and appends the result as a new named list to the user's
//! persisted record.

use anyhow::Result;
use std::sync::Arc;

use crate::application::parsing::extract_characters;
use crate::domain::traits::{ChatProvider, ShipDataProvider, ShipListStore};
use crate::strings::messages;

/// Name given to every list appended by this workflow.
pub const SYNC_LIST_NAME: &str = "Mudae Sync";

pub async fn handle_sync(
    shipdata: &Arc<dyn ShipDataProvider>,
    store: Option<&Arc<dyn ShipListStore>>,
    chat: &impl ChatProvider,
    author_id: &str,
    text: &str,
) -> Result<()> {
    chat.send_message(messages::SYNC_ACK)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    let characters = extract_characters(text);

    // One lookup at a time; a failed character is logged and skipped, the
    // rest of the batch continues.
    let mut ships = Vec::new();
    for character in &characters {
        match shipdata.ships_for(character).await {
            Ok(payload) => {
                let rendered = serde_json::to_string(&payload)?;
                ships.push(format!("{character}: {rendered}"));
            }
            Err(e) => tracing::error!("Error fetching ships for {character}: {e}"),
        }
    }

    if ships.is_empty() {
        chat.send_message(messages::NO_SHIPS)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    chat.send_message(&messages::ship_list(&ships))
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    let Some(store) = store else {
        tracing::warn!("Store unavailable, skipping sync for user {author_id}");
        return Ok(());
    };

    match sync_with_store(store, author_id, &ships).await {
        Ok(()) => tracing::info!("Synced Mudae list for user {author_id}"),
        Err(e) => tracing::error!("Error syncing with database: {e}"),
    }

    Ok(())
}

async fn sync_with_store(
    store: &Arc<dyn ShipListStore>,
    author_id: &str,
    ships: &[String],
) -> Result<(), String> {
    let record = store.find_or_create(author_id).await?;
    let ships = serde_json::to_value(ships).map_err(|e| e.to_string())?;
    store.append_and_save(record, SYNC_LIST_NAME, ships).await
}
