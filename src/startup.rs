use crate::commands::{create_error_embed, get_all_application_commands, CommandContext};
use crate::components::ctftime::CtfTime;
use crate::components::event_browser::EventBrowser;
use crate::components::{ComponentManager, CtfTimeHandle, SessionController};
use crate::config::Config;
use crate::error::Error;
use crate::handlers;
use crate::shutdown;
use poise::serenity_prelude as serenity;
use rust_i18n::t;
use serenity::model::user::OnlineStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn,poise=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the HTTP client used for every CTFtime request
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|e| Error::Other(format!("Failed to build HTTP client: {}", e)))
}

/// Initialize and start the Discord bot
pub async fn start_bot(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let (token, activity, guild_id, page_size, session_timeout, client) = {
        let config_read = config.read().await;

        crate::utils::i18n::set_locale(&config_read.bot_locale);
        info!("Setting locale to {}", config_read.bot_locale);

        (
            config_read.discord_token.clone(),
            config_read.activity.clone(),
            config_read.guild_id,
            config_read.page_size,
            Duration::from_secs(config_read.session_timeout_secs),
            build_http_client(&config_read)?,
        )
    };

    // Set up framework options
    let options = poise::FrameworkOptions {
        commands: get_all_application_commands(),
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, framework, data| {
            Box::pin(handlers::event_handler(ctx, event, framework, data))
        },
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some("!".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    // Set intents
    let intents = serenity::GatewayIntents::non_privileged();

    // Dependencies are built here and passed down; nothing is global
    let ctftime = CtfTimeHandle::new(Arc::clone(&config), client);
    let sessions = Arc::new(SessionController::new(
        Arc::new(ctftime.clone()),
        page_size,
        session_timeout,
    ));

    // Sessions close before the fetch actor stops
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    component_manager.register(EventBrowser::new(Arc::clone(&sessions)));
    component_manager.register(CtfTime::new(ctftime));
    let component_manager = Arc::new(component_manager);

    let command_data = CommandContext::new(Arc::clone(&sessions));

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_components = Arc::clone(&component_manager);
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components).await;
    });

    let client_result = serenity::ClientBuilder::new(token, intents)
        .framework(poise::Framework::new(
            options,
            move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("{} is connected!", ready.user.name);

                    // Set the bot's status
                    ctx.set_presence(
                        Some(serenity::ActivityData::playing(&activity)),
                        OnlineStatus::Online,
                    );
                    info!("Setting activity to {}", activity);

                    // Initialize components
                    if let Err(e) = component_manager.init_all(ctx).await {
                        error!("Failed to initialize components: {:?}", e);
                    }

                    // Register slash commands
                    let registered = match guild_id {
                        Some(guild_id) => {
                            poise::builtins::register_in_guild(
                                ctx,
                                &framework.options().commands,
                                serenity::GuildId::new(guild_id),
                            )
                            .await
                        }
                        None => {
                            poise::builtins::register_globally(ctx, &framework.options().commands)
                                .await
                        }
                    };

                    if let Err(e) = registered {
                        error!("Failed to register slash commands: {:?}", e);
                    } else {
                        info!("Slash commands registered successfully");
                    }

                    Ok(command_data)
                })
            },
        ))
        .await;

    // Start the bot
    info!("Starting bot...");
    let mut client = client_result.map_err(Error::from)?;

    // Create a separate task to handle the client
    let client_handle = tokio::spawn(async move {
        if let Err(e) = client.start().await {
            Err(Error::from(e))
        } else {
            Ok(())
        }
    });

    // Wait for either the client to end or a shutdown signal
    tokio::select! {
        result = client_handle => {
            info!("Bot process ended");
            match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.into()),
                Err(e) => {
                    error!("Client task error: {:?}", e);
                    Err(Error::Other(format!("Client task error: {}", e)).into())
                }
            }
        }
        _ = shutdown_recv => {
            info!("Received shutdown signal, shutting down bot...");
            Ok(())
        }
    }
}

/// Handle errors from commands
async fn on_error(error: poise::FrameworkError<'_, CommandContext, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Error during setup: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {:?}", ctx.command().name, error);
            if let Err(e) = ctx
                .send(
                    poise::CreateReply::default()
                        .embed(create_error_embed(
                            &t!("error_title", context = "command"),
                            &t!("generic_failure"),
                        ))
                        .ephemeral(true),
                )
                .await
            {
                error!("Error while sending error message: {:?}", e);
            }
        }
        poise::FrameworkError::ArgumentParse { error, input, ctx, .. } => {
            error!("Could not parse argument {:?}: {}", input, error);
            if let Err(e) = ctx
                .send(
                    poise::CreateReply::default()
                        .content(t!("upcoming_invalid_limit"))
                        .ephemeral(true),
                )
                .await
            {
                error!("Error while sending error message: {:?}", e);
            }
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(
                "Error in event handler for {}: {:?}",
                event.snake_case_name(),
                error
            );
        }
        error => {
            error!("Other error: {:?}", error);
        }
    }
}
