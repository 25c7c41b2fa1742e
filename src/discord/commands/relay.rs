// Discord commands for the Gemini relay.
//
// **Notice the pattern:**
// 1. Extract primitive data from Discord types
// 2. Call core service
// 3. Format the response based on the result
//
// This layer is THIN - no business logic, just translation.

use crate::core::ai::RelayService;
use crate::core::rooms::RoomRegistry;
use crate::discord::ai::responder;
use crate::infra::ai::GeminiClient;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared state handed to every command invocation and event handler.
pub struct Data {
    pub rooms: Arc<RoomRegistry>,
    pub relay: Arc<RelayService<GeminiClient>>,
}

/// Ask Gemini a question.
#[poise::command(slash_command, guild_only)]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "Your question for Gemini"] question: String,
) -> Result<(), Error> {
    // The model call can easily outlive Discord's 3 second interaction window.
    ctx.defer().await?;

    let reply = ctx.data().relay.ask(&question).await;
    responder::deliver_to_command(ctx, &reply).await?;

    Ok(())
}

/// Enable the Gemini relay in a channel.
#[poise::command(slash_command, guild_only)]
pub async fn room(
    ctx: Context<'_>,
    #[description = "Channel to relay"] channel: serenity::GuildChannel,
) -> Result<(), Error> {
    ctx.data().rooms.add_room(channel.id.get());
    ctx.say(format!("✅ Gemini relay enabled in #{}", channel.name))
        .await?;

    Ok(())
}

/// List the channels with the Gemini relay enabled.
#[poise::command(slash_command, guild_only, rename = "the-rooms")]
pub async fn the_rooms(ctx: Context<'_>) -> Result<(), Error> {
    let rooms = ctx.data().rooms.list_rooms();
    if rooms.is_empty() {
        ctx.say("No relay rooms are active.").await?;
        return Ok(());
    }

    let list = rooms
        .iter()
        .map(|id| format!("<#{id}>"))
        .collect::<Vec<_>>()
        .join("\n");
    ctx.say(format!("📌 Active relay rooms:\n{list}")).await?;

    Ok(())
}

/// Disable the Gemini relay in a channel.
#[poise::command(slash_command, guild_only, rename = "delete-room")]
pub async fn delete_room(
    ctx: Context<'_>,
    #[description = "Channel to stop relaying"] channel: serenity::GuildChannel,
) -> Result<(), Error> {
    ctx.data().rooms.remove_room(channel.id.get());
    ctx.say(format!("🗑️ Gemini relay disabled in #{}", channel.name))
        .await?;

    Ok(())
}
