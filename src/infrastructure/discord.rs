//! # Discord Adapter
//!
//! Implements the `ChatProvider` trait for Discord using `serenity`, and
//! bridges the gateway event stream to the `CommandRouter`. This module acts
//! as the boundary between the generic interfaces used by the bot's core
//! logic and the specifics of the Discord SDK.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::ChannelId;
use serenity::prelude::*;

use crate::application::router::CommandRouter;
use crate::domain::traits::ChatProvider;
use crate::domain::types::IncomingMessage;

/// `ChatProvider` backed by one Discord channel.
#[derive(Clone)]
pub struct DiscordChannel {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordChannel {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl ChatProvider for DiscordChannel {
    fn channel_id(&self) -> String {
        self.channel_id.to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.channel_id(), content);
        self.channel_id
            .say(&self.http, content)
            .await
            .map(|message| message.id.to_string())
            .map_err(|e| e.to_string())
    }
}

struct Handler {
    router: Arc<CommandRouter>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        let incoming = IncomingMessage {
            author_id: msg.author.id.to_string(),
            from_bot: msg.author.bot,
            text: msg.content.clone(),
        };

        let chat = DiscordChannel::new(ctx.http.clone(), msg.channel_id);
        if let Err(e) = self.router.dispatch(&chat, &incoming).await {
            tracing::error!("Failed to route message: {e}");
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!("Logged in as {}", ready.user.name);
    }
}

/// Log in and run the gateway loop until the connection ends.
pub async fn run(token: &str, router: Arc<CommandRouter>) -> Result<()> {
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(Handler { router })
        .await?;

    client.start().await?;
    Ok(())
}
