use crate::components::SessionController;
use crate::error::BotResult;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

// Export submodules
pub mod upcoming;
pub mod util;

/// Shared context for all commands
#[derive(Debug)]
pub struct CommandContext {
    pub sessions: Arc<SessionController>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(sessions: Arc<SessionController>) -> Self {
        Self { sessions }
    }
}

/// Type alias for command result
pub type CommandResult = BotResult<()>;

/// Type alias for poise context
pub type Context<'a> = poise::Context<'a, CommandContext, crate::error::Error>;

/// All application commands
pub fn get_all_application_commands() -> Vec<poise::Command<CommandContext, crate::error::Error>> {
    vec![
        // Utility commands
        util::ping(),
        // Event browsing
        upcoming::upcoming(),
    ]
}

/// Red embed for failures
pub fn create_error_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(0xE7_4C_3C)
}

/// Blue embed for neutral notices
pub fn create_info_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(0x00_99_FF)
}

/// Green embed for confirmations
pub fn create_success_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(0x2E_CC_71)
}
