use crate::commands::CommandContext;
use crate::components::event_browser::{is_browser_custom_id, parse_custom_id, NavigateOutcome};
use crate::error::{BotResult, Error};
use poise::serenity_prelude as serenity;
use rust_i18n::t;
use tracing::{debug, error};

/// Framework-wide event handler; routes navigation button presses to their session
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, CommandContext, Error>,
    data: &CommandContext,
) -> BotResult<()> {
    if let serenity::FullEvent::InteractionCreate {
        interaction: serenity::Interaction::Component(component),
    } = event
    {
        if !is_browser_custom_id(&component.data.custom_id) {
            return Ok(());
        }

        // Failures stay inside this interaction; they never reach other sessions
        if let Err(e) = handle_navigation(ctx, component, data).await {
            error!(
                "Error handling navigation '{}': {:?}",
                component.data.custom_id, e
            );
            let _ = respond_ephemeral(ctx, component, &t!("generic_failure")).await;
        }
    }

    Ok(())
}

async fn handle_navigation(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &CommandContext,
) -> BotResult<()> {
    let Some((action, session_id)) = parse_custom_id(&component.data.custom_id) else {
        return respond_ephemeral(ctx, component, &t!("session_invalid")).await;
    };

    debug!(
        "{:?} pressed by {} for session {}",
        action, component.user.id, session_id
    );

    match data
        .sessions
        .navigate(session_id, action, component.user.id)
        .await
    {
        NavigateOutcome::Updated(page) => {
            component
                .create_response(
                    &ctx.http,
                    serenity::CreateInteractionResponse::UpdateMessage(
                        serenity::CreateInteractionResponseMessage::new()
                            .embed(page.to_embed())
                            .components(page.to_components(session_id)),
                    ),
                )
                .await?;
        }
        NavigateOutcome::Unchanged => {
            component
                .create_response(&ctx.http, serenity::CreateInteractionResponse::Acknowledge)
                .await?;
        }
        NavigateOutcome::Stale => {
            respond_ephemeral(ctx, component, &t!("session_expired")).await?;
        }
        NavigateOutcome::WrongUser => {
            respond_ephemeral(ctx, component, &t!("session_wrong_user")).await?;
        }
    }

    Ok(())
}

async fn respond_ephemeral(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    content: &str,
) -> BotResult<()> {
    component
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}
