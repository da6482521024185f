//! # Single Lookup Workflow
//!
//! Handles `!ship <name>`: one lookup whose failure is surfaced to the user
//! directly, unlike the batched sync lookups.

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::traits::{ChatProvider, ShipDataProvider};
use crate::strings::messages;

pub async fn handle_ship(
    shipdata: &Arc<dyn ShipDataProvider>,
    chat: &impl ChatProvider,
    character: Option<&str>,
) -> Result<()> {
    let Some(character) = character else {
        chat.send_message(messages::PROVIDE_CHARACTER)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    };

    match shipdata.ships_for(character).await {
        Ok(payload) if has_entries(&payload) => {
            let rendered = serde_json::to_string_pretty(&payload)?;
            chat.send_message(&messages::ships_for(character, &rendered))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Ok(_) => {
            chat.send_message(&messages::no_ships_for(character))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Err(e) => {
            tracing::error!("Error fetching ships for {character}: {e}");
            chat.send_message(messages::SHIP_LOOKUP_FAILED)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    Ok(())
}

/// An empty object, empty array or null counts as "no ships".
fn has_entries(payload: &Value) -> bool {
    match payload {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
