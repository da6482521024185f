//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in
//! `interface/commands`). Matching is a total match over the closed `Command`
//! set, so exactly one workflow runs per addressed message.

use anyhow::Result;
use std::sync::Arc;

use crate::application::parsing::parse_command;
use crate::domain::traits::{ChatProvider, ShipDataProvider, ShipListStore};
use crate::domain::types::{Command, IncomingMessage};
use crate::interface::commands;

pub struct CommandRouter {
    shipdata: Arc<dyn ShipDataProvider>,
    /// `None` when the store failed to connect at startup; syncs still reply
    /// but persistence is skipped.
    store: Option<Arc<dyn ShipListStore>>,
}

impl CommandRouter {
    pub fn new(
        shipdata: Arc<dyn ShipDataProvider>,
        store: Option<Arc<dyn ShipListStore>>,
    ) -> Self {
        Self { shipdata, store }
    }

    pub async fn dispatch<C>(&self, chat: &C, message: &IncomingMessage) -> Result<()>
    where
        C: ChatProvider,
    {
        if message.from_bot {
            return Ok(());
        }

        let Some(command) = parse_command(&message.text) else {
            return Ok(());
        };

        tracing::info!(
            "Router dispatching {:?} for author '{}' in channel '{}'",
            command,
            message.author_id,
            chat.channel_id()
        );

        match command {
            Command::SyncList => {
                commands::sync::handle_sync(
                    &self.shipdata,
                    self.store.as_ref(),
                    chat,
                    &message.author_id,
                    &message.text,
                )
                .await
            }
            Command::ShipLookup { character } => {
                commands::ship::handle_ship(&self.shipdata, chat, character.as_deref()).await
            }
            Command::GenerateCommand => commands::mudae::handle_mudae(&self.shipdata, chat).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ShipListEntry, UserRecord};
    use crate::interface::commands::sync::SYNC_LIST_NAME;
    use crate::strings::messages;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockChat {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatProvider for MockChat {
        fn channel_id(&self) -> String {
            "channel".to_string()
        }

        async fn send_message(&self, content: &str) -> Result<String, String> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(content.to_string());
            Ok(format!("msg-{}", sent.len()))
        }
    }

    struct ScriptedShipData {
        ships: HashMap<String, Value>,
        command: Result<String, String>,
        lookups: Mutex<Vec<String>>,
    }

    impl ScriptedShipData {
        fn new(ships: &[(&str, Value)]) -> Self {
            Self {
                ships: ships
                    .iter()
                    .map(|(name, payload)| (name.to_string(), payload.clone()))
                    .collect(),
                command: Err("not scripted".to_string()),
                lookups: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ShipDataProvider for ScriptedShipData {
        async fn ships_for(&self, character: &str) -> Result<Value, String> {
            self.lookups.lock().unwrap().push(character.to_string());
            self.ships
                .get(character)
                .cloned()
                .ok_or_else(|| format!("HTTP 404 Not Found for {character}"))
        }

        async fn mudae_command(&self) -> Result<String, String> {
            self.command.clone()
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<String, UserRecord>>,
        fail_saves: bool,
    }

    #[async_trait]
    impl ShipListStore for MemoryStore {
        async fn find_or_create(&self, discord_id: &str) -> Result<UserRecord, String> {
            let records = self.records.lock().unwrap();
            Ok(records
                .get(discord_id)
                .cloned()
                .unwrap_or_else(|| UserRecord::new(discord_id)))
        }

        async fn append_and_save(
            &self,
            mut record: UserRecord,
            name: &str,
            ships: Value,
        ) -> Result<(), String> {
            if self.fail_saves {
                return Err("write refused".to_string());
            }
            record.ship_lists.push(ShipListEntry {
                name: name.to_string(),
                ships,
            });
            self.records
                .lock()
                .unwrap()
                .insert(record.discord_id.clone(), record);
            Ok(())
        }
    }

    fn message(text: &str) -> IncomingMessage {
        IncomingMessage {
            author_id: "42".to_string(),
            from_bot: false,
            text: text.to_string(),
        }
    }

    fn router(
        shipdata: &Arc<ScriptedShipData>,
        store: Option<&Arc<MemoryStore>>,
    ) -> CommandRouter {
        CommandRouter::new(
            shipdata.clone(),
            store.map(|s| s.clone() as Arc<dyn ShipListStore>),
        )
    }

    #[tokio::test]
    async fn bot_messages_never_reach_any_collaborator() {
        let shipdata = Arc::new(ScriptedShipData::new(&[("Rem", json!({"partner": "Subaru"}))]));
        let store = Arc::new(MemoryStore::default());
        let chat = MockChat::default();

        let mut msg = message("$mm\nRem");
        msg.from_bot = true;
        router(&shipdata, Some(&store))
            .dispatch(&chat, &msg)
            .await
            .unwrap();

        assert!(chat.sent.lock().unwrap().is_empty());
        assert!(shipdata.lookups.lock().unwrap().is_empty());
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unmatched_text_is_ignored() {
        let shipdata = Arc::new(ScriptedShipData::new(&[]));
        let chat = MockChat::default();

        router(&shipdata, None)
            .dispatch(&chat, &message("good morning everyone"))
            .await
            .unwrap();

        assert!(chat.sent.lock().unwrap().is_empty());
        assert!(shipdata.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sync_collects_successes_and_appends_one_list() {
        let shipdata = Arc::new(ScriptedShipData::new(&[
            ("Rem", json!({"partner": "Subaru"})),
            ("Emilia", json!({})),
        ]));
        let store = Arc::new(MemoryStore::default());
        let chat = MockChat::default();

        router(&shipdata, Some(&store))
            .dispatch(&chat, &message("$mm\nRem\nNonexistent\nEmilia"))
            .await
            .unwrap();

        // Lookups run in order of appearance, failures skipped silently.
        assert_eq!(
            *shipdata.lookups.lock().unwrap(),
            vec!["Rem", "Nonexistent", "Emilia"]
        );

        let sent = chat.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], messages::SYNC_ACK);
        assert_eq!(
            sent[1],
            "Here are your ships:\nRem: {\"partner\":\"Subaru\"}\nEmilia: {}"
        );

        let records = store.records.lock().unwrap();
        let record = records.get("42").unwrap();
        assert_eq!(record.ship_lists.len(), 1);
        assert_eq!(record.ship_lists[0].name, SYNC_LIST_NAME);
        assert_eq!(
            record.ship_lists[0].ships,
            json!(["Rem: {\"partner\":\"Subaru\"}", "Emilia: {}"])
        );
    }

    #[tokio::test]
    async fn sync_with_no_successes_replies_and_skips_the_store() {
        let shipdata = Arc::new(ScriptedShipData::new(&[]));
        let store = Arc::new(MemoryStore::default());
        let chat = MockChat::default();

        router(&shipdata, Some(&store))
            .dispatch(&chat, &message("$mymarry\nNonexistent\nAlso missing"))
            .await
            .unwrap();

        let sent = chat.sent.lock().unwrap();
        assert_eq!(*sent, vec![messages::SYNC_ACK, messages::NO_SHIPS]);
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_syncs_strictly_append() {
        let shipdata = Arc::new(ScriptedShipData::new(&[("Rem", json!({}))]));
        let store = Arc::new(MemoryStore::default());
        let chat = MockChat::default();
        let router = router(&shipdata, Some(&store));

        for _ in 0..3 {
            router.dispatch(&chat, &message("$mm\nRem")).await.unwrap();
        }

        let records = store.records.lock().unwrap();
        assert_eq!(records.get("42").unwrap().ship_lists.len(), 3);
    }

    #[tokio::test]
    async fn sync_survives_a_failed_save() {
        let shipdata = Arc::new(ScriptedShipData::new(&[("Rem", json!({}))]));
        let store = Arc::new(MemoryStore {
            fail_saves: true,
            ..Default::default()
        });
        let chat = MockChat::default();

        router(&shipdata, Some(&store))
            .dispatch(&chat, &message("$mm\nRem"))
            .await
            .unwrap();

        // The user already got the ship reply; the failed append is dropped.
        let sent = chat.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1], "Here are your ships:\nRem: {}");
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sync_without_a_store_still_replies() {
        let shipdata = Arc::new(ScriptedShipData::new(&[("Rem", json!({}))]));
        let chat = MockChat::default();

        router(&shipdata, None)
            .dispatch(&chat, &message("$mm\nRem"))
            .await
            .unwrap();

        let sent = chat.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1], "Here are your ships:\nRem: {}");
    }

    #[tokio::test]
    async fn ship_without_a_name_prompts_and_skips_the_lookup() {
        let shipdata = Arc::new(ScriptedShipData::new(&[("Rem", json!({}))]));
        let chat = MockChat::default();

        router(&shipdata, None)
            .dispatch(&chat, &message("!ship"))
            .await
            .unwrap();

        assert_eq!(
            *chat.sent.lock().unwrap(),
            vec![messages::PROVIDE_CHARACTER]
        );
        assert!(shipdata.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ship_renders_a_populated_payload() {
        let payload = json!({"partner": "Subaru"});
        let shipdata = Arc::new(ScriptedShipData::new(&[("Rem", payload.clone())]));
        let chat = MockChat::default();

        router(&shipdata, None)
            .dispatch(&chat, &message("!ship Rem"))
            .await
            .unwrap();

        let expected = format!(
            "Ships for **Rem**:\n{}",
            serde_json::to_string_pretty(&payload).unwrap()
        );
        assert_eq!(*chat.sent.lock().unwrap(), vec![expected]);
    }

    #[tokio::test]
    async fn ship_with_an_empty_payload_reports_no_ships() {
        let shipdata = Arc::new(ScriptedShipData::new(&[("Rem", json!({}))]));
        let chat = MockChat::default();

        router(&shipdata, None)
            .dispatch(&chat, &message("!ship Rem"))
            .await
            .unwrap();

        assert_eq!(
            *chat.sent.lock().unwrap(),
            vec!["No ships found for **Rem**.".to_string()]
        );
    }

    #[tokio::test]
    async fn ship_lookup_failure_is_surfaced_to_the_user() {
        let shipdata = Arc::new(ScriptedShipData::new(&[]));
        let chat = MockChat::default();

        router(&shipdata, None)
            .dispatch(&chat, &message("!ship Rem"))
            .await
            .unwrap();

        assert_eq!(
            *chat.sent.lock().unwrap(),
            vec![messages::SHIP_LOOKUP_FAILED]
        );
    }

    #[tokio::test]
    async fn mudae_replies_with_the_generated_command() {
        let mut shipdata = ScriptedShipData::new(&[]);
        shipdata.command = Ok("$ship Rem".to_string());
        let shipdata = Arc::new(shipdata);
        let chat = MockChat::default();

        router(&shipdata, None)
            .dispatch(&chat, &message("!mudae"))
            .await
            .unwrap();

        assert_eq!(
            *chat.sent.lock().unwrap(),
            vec![
                messages::MUDAE_ACK.to_string(),
                "Your Mudae ship command:\n`$ship Rem`".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn mudae_failure_replies_with_the_generic_error() {
        let shipdata = Arc::new(ScriptedShipData::new(&[]));
        let chat = MockChat::default();

        router(&shipdata, None)
            .dispatch(&chat, &message("!mudae"))
            .await
            .unwrap();

        assert_eq!(
            *chat.sent.lock().unwrap(),
            vec![messages::MUDAE_ACK.to_string(), messages::MUDAE_FAILED.to_string()]
        );
    }
}
