pub mod custom_id;
pub mod paginator;
pub mod render;
mod session;

pub use custom_id::{is_browser_custom_id, parse_custom_id, SessionId};
pub use paginator::{NavAction, Paginator};
pub use render::RenderedPage;
pub use session::{NavigateOutcome, SessionController, StartOutcome};

use crate::config::Config;
use crate::error::BotResult;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Event browser component owning the live paginated sessions
pub struct EventBrowser {
    controller: Arc<SessionController>,
}

impl EventBrowser {
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self { controller }
    }
}

#[async_trait]
impl super::Component for EventBrowser {
    fn name(&self) -> &'static str {
        "event_browser"
    }

    async fn init(&self, ctx: &serenity::Context, _config: Arc<RwLock<Config>>) -> BotResult<()> {
        self.controller.set_http(Arc::clone(&ctx.http)).await;
        Ok(())
    }

    async fn shutdown(&self) -> BotResult<()> {
        self.controller.close_all().await;
        Ok(())
    }
}
