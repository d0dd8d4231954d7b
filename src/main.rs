// This is the entry point of the relay bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (in-memory store, Groq client)
// - `discord/` = Discord-specific adapters (commands, gateway bridge)
//
// This file's job is to:
// 1. Load configuration (and refuse to start without credentials)
// 2. Initialize services (dependency injection)
// 3. Wire the gateway to the relay through mpsc queues
// 4. Register the slash command and start the client

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::config::BotConfig;
use crate::core::ai::{AiConfig, AiService};
use crate::core::channels::ChannelService;
use crate::core::relay::RelayService;
use crate::discord::gateway_bridge;
use crate::discord::{Data, Error};
use crate::infra::ai::GroqClient;
use crate::infra::channels::InMemoryChannelStore;
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::mpsc;

/// How many messages may wait in either relay queue.
const QUEUE_CAPACITY: usize = 256;

/// Event handler for non-command Discord events.
async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            tracing::info!("Logged in as {}", data_about_bot.user.name);
        }
        serenity::FullEvent::Message { new_message } => {
            // All filtering happens in the relay so it stays testable
            data.inbound
                .send(gateway_bridge::to_inbound(new_message))
                .await?;
        }
        _ => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    let config = BotConfig::from_env().context("Invalid bot configuration")?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let channels = Arc::new(ChannelService::new(InMemoryChannelStore::new()));

    let groq = GroqClient::new(
        config.groq_api_key.clone(),
        config.groq_url.clone(),
        config.request_timeout,
    )
    .context("Failed to build Groq HTTP client")?;
    let ai_config = AiConfig {
        model: config.model.clone(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };
    let ai = Arc::new(AiService::new(groq, config.system_prompt.clone(), ai_config));

    let relay = Arc::new(RelayService::new(Arc::clone(&channels), ai));
    let (inbound_tx, inbound_rx) = mpsc::channel(QUEUE_CAPACITY);
    let (outbound_tx, outbound_rx) = mpsc::channel(QUEUE_CAPACITY);
    tokio::spawn(relay.run(inbound_rx, outbound_tx));

    let data = Data {
        channels,
        inbound: inbound_tx,
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![discord::commands::setchannel::set_channel()],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                // Global registration can take a while to show up in clients
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("Slash commands registered");

                tokio::spawn(gateway_bridge::run_outbound(ctx.http.clone(), outbound_rx));

                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .context("Error creating Discord client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}
