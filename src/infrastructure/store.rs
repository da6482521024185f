//! # User List Store
//!
//! Redis-backed persistence for per-user ship lists: one JSON document per
//! user under `user:{discordId}`. Implements `ShipListStore`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde_json::Value;

use crate::domain::traits::ShipListStore;
use crate::domain::types::{ShipListEntry, UserRecord};

pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Open a connection to the store. Fails if the server is unreachable;
    /// the caller decides whether to run without persistence.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).context("Invalid Redis URL")?;
        let conn = client
            .get_connection_manager()
            .await
            .context("Failed to connect to Redis")?;
        Ok(Self { conn })
    }
}

fn user_key(discord_id: &str) -> String {
    format!("user:{discord_id}")
}

#[async_trait]
impl ShipListStore for RedisStore {
    async fn find_or_create(&self, discord_id: &str) -> Result<UserRecord, String> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(user_key(discord_id))
            .await
            .map_err(|e| e.to_string())?;

        match raw {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| format!("Corrupt user record: {e}"))
            }
            None => Ok(UserRecord::new(discord_id)),
        }
    }

    async fn append_and_save(
        &self,
        mut record: UserRecord,
        name: &str,
        ships: Value,
    ) -> Result<(), String> {
        record.ship_lists.push(ShipListEntry {
            name: name.to_string(),
            ships,
        });

        let json = serde_json::to_string(&record).map_err(|e| e.to_string())?;
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(user_key(&record.discord_id), json)
            .await
            .map_err(|e| e.to_string())
    }
}
