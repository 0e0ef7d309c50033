use crate::commands::{create_error_embed, create_info_embed, CommandResult, Context};
use crate::components::event_browser::StartOutcome;
use rust_i18n::t;
use std::sync::Arc;
use tracing::{debug, error};

/// Get upcoming CTF events
#[poise::command(slash_command, prefix_command)]
pub async fn upcoming(
    ctx: Context<'_>,
    #[description = "Number of events to retrieve"] limit: i64,
) -> CommandResult {
    if limit <= 0 {
        return send_invalid_limit(ctx).await;
    }

    // Acknowledge right away; the fetch can outlast the interaction deadline
    let waiting = ctx.say(t!("fetch_processing")).await?;

    let sessions = Arc::clone(&ctx.data().sessions);
    match sessions.start(ctx.author().id, limit).await {
        StartOutcome::Opened { session_id, page } => {
            let reply = poise::CreateReply::default()
                .content("")
                .embed(page.to_embed())
                .components(page.to_components(session_id));

            if let Err(e) = waiting.edit(ctx, reply).await {
                sessions.discard(session_id).await;
                return Err(e.into());
            }

            let message = match waiting.message().await {
                Ok(message) => message,
                Err(e) => {
                    sessions.discard(session_id).await;
                    return Err(e.into());
                }
            };

            if !sessions
                .bind_message(session_id, message.channel_id, message.id)
                .await
            {
                debug!("Session {} expired before its message was bound", session_id);
            }
        }
        StartOutcome::Empty => {
            let _ = waiting.delete(ctx).await;
            ctx.send(
                poise::CreateReply::default()
                    .embed(create_info_embed(
                        &t!("upcoming_title"),
                        &t!("upcoming_no_events"),
                    ))
                    .ephemeral(true),
            )
            .await?;
        }
        StartOutcome::Failed(e) => {
            debug!("Reporting fetch failure to {}: {}", ctx.author().id, e);
            let _ = waiting.delete(ctx).await;
            ctx.send(
                poise::CreateReply::default()
                    .embed(create_error_embed(
                        &t!("error_title", context = "upcoming"),
                        &t!("upcoming_fetch_failed"),
                    ))
                    .ephemeral(true),
            )
            .await?;
        }
        StartOutcome::InvalidLimit => {
            error!("Limit {} passed validation but was rejected", limit);
            let _ = waiting.delete(ctx).await;
            return send_invalid_limit(ctx).await;
        }
    }

    Ok(())
}

async fn send_invalid_limit(ctx: Context<'_>) -> CommandResult {
    ctx.send(
        poise::CreateReply::default()
            .content(t!("upcoming_invalid_limit"))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
