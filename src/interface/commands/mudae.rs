//! # Generate Workflow
//!
//! Handles `!mudae`: asks the ship-data service for a ready-to-paste Mudae
//! command and relays it back.

use anyhow::Result;
use std::sync::Arc;

use crate::domain::traits::{ChatProvider, ShipDataProvider};
use crate::strings::messages;

pub async fn handle_mudae(
    shipdata: &Arc<dyn ShipDataProvider>,
    chat: &impl ChatProvider,
) -> Result<()> {
    chat.send_message(messages::MUDAE_ACK)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    match shipdata.mudae_command().await {
        Ok(command) => {
            chat.send_message(&messages::mudae_command(&command))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Err(e) => {
            tracing::error!("Error generating Mudae command: {e}");
            chat.send_message(messages::MUDAE_FAILED)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    Ok(())
}
