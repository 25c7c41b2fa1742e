// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (external APIs)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a handful of mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::ai::{AiConfig, RelayService};
use crate::core::config::BotConfig;
use crate::core::rooms::RoomRegistry;
use crate::discord::ai::responder;
use crate::discord::{Data, Error};
use crate::infra::ai::GeminiClient;
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
/// Ordinary messages in relay-active rooms are forwarded to Gemini.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        // Ignore bot messages (including our own)
        if new_message.author.bot {
            return Ok(());
        }

        if !data.rooms.is_active(new_message.channel_id.get()) {
            return Ok(());
        }

        // Let the channel know we're working on it
        let _ = new_message.channel_id.broadcast_typing(&ctx.http).await;

        let reply = data.relay.ask(&new_message.content).await;
        if let Err(e) = responder::deliver_to_message(ctx, new_message, &reply).await {
            tracing::error!("Failed to deliver relay reply: {}", e);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Missing configuration is fatal. Bail out here, before any network
    // connection is attempted.
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let gemini_client = GeminiClient::new(config.gemini_api_key.clone());
    let ai_config = AiConfig {
        model: config.model.clone(),
        temperature: 0.7,
        max_output_tokens: None,
        top_p: Some(1.0),
    };
    let relay_service = Arc::new(RelayService::new(
        gemini_client,
        config.system_prompt.clone(),
        ai_config,
    ));

    // Relay rooms live in memory only; the set starts empty on every boot.
    let room_registry = Arc::new(RoomRegistry::new());

    let data = Data {
        rooms: Arc::clone(&room_registry),
        relay: Arc::clone(&relay_service),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================
    // Configure the poise framework with our commands and settings.

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT; // Required to read message content

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Register all our commands here
            commands: vec![
                discord::commands::relay::ask(),
                discord::commands::relay::room(),
                discord::commands::relay::the_rooms(),
                discord::commands::relay::delete_room(),
            ],
            // Event handler for relay-room messages
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                println!("🤖 Bot is starting up...");

                // Register the slash commands in every guild we're a member
                // of. One guild failing must not abort startup, so each
                // registration error is captured and logged on its own.
                for guild in &ready.guilds {
                    if let Err(e) = poise::builtins::register_in_guild(
                        ctx,
                        &framework.options().commands,
                        guild.id,
                    )
                    .await
                    {
                        tracing::warn!("Failed to register commands in guild {}: {}", guild.id, e);
                    }
                }

                println!("✅ Commands registered!");
                println!("🚀 Bot is ready!");

                Ok(data)
            })
        })
        .build();

    // Create the client and start the bot
    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;

    Ok(())
}
