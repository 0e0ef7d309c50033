use crate::commands::{create_success_embed, CommandResult, Context};
use rust_i18n::t;

/// Health check showing gateway latency and open browsing sessions
#[poise::command(slash_command, prefix_command)]
pub async fn ping(ctx: Context<'_>) -> CommandResult {
    let latency = ctx.ping().await.as_millis();
    let sessions = ctx.data().sessions.session_count().await;

    ctx.send(
        poise::CreateReply::default()
            .embed(create_success_embed(
                &t!("ping_command"),
                &t!("ping_response", latency = latency, sessions = sessions),
            ))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
