// Reply delivery for relay responses.
//
// Short responses go out as ordinary replies. Anything at or over the inline
// limit is staged as a file in the working directory, attached to the reply,
// and removed as soon as the reply is sent. The filename depends only on the
// detected language, so two oversized replies in flight at the same time can
// collide on the path.

use crate::core::ai::formatting::{plan_reply, ReplyPlan};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;
use std::path::{Path, PathBuf};

/// Notice posted alongside a file attachment.
const FILE_NOTICE: &str = "📄 The response was too long, so it's attached as a file:";

/// Writes the response text into `dir` under `filename`, returning the
/// staged path.
pub fn stage_response_file(dir: &Path, filename: &str, content: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(filename);
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Best-effort removal of a staged response file.
pub fn discard_response_file(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::warn!(
            "Failed to remove staged response file {}: {}",
            path.display(),
            e
        );
    }
}

/// Delivers a relay response for a slash command invocation.
pub async fn deliver_to_command(ctx: Context<'_>, text: &str) -> Result<(), Error> {
    match plan_reply(text) {
        ReplyPlan::Inline => {
            ctx.say(text).await?;
        }
        ReplyPlan::File { filename } => {
            let path = stage_response_file(Path::new("."), &filename, text)?;
            let attachment = serenity::CreateAttachment::path(&path).await?;

            // The file must outlive the send, so clean up before bubbling
            // any send error.
            let result = ctx
                .send(
                    poise::CreateReply::default()
                        .content(FILE_NOTICE)
                        .attachment(attachment),
                )
                .await;
            discard_response_file(&path);
            result?;
        }
    }

    Ok(())
}

/// Delivers a relay response as a reply to an ordinary channel message.
pub async fn deliver_to_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    text: &str,
) -> Result<(), Error> {
    match plan_reply(text) {
        ReplyPlan::Inline => {
            message.reply(&ctx.http, text).await?;
        }
        ReplyPlan::File { filename } => {
            let path = stage_response_file(Path::new("."), &filename, text)?;
            let attachment = serenity::CreateAttachment::path(&path).await?;

            let result = message
                .channel_id
                .send_message(
                    &ctx.http,
                    serenity::CreateMessage::new()
                        .content(FILE_NOTICE)
                        .add_file(attachment)
                        .reference_message(message),
                )
                .await;
            discard_response_file(&path);
            result?;
        }
    }

    Ok(())
}
