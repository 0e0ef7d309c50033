mod actor;
mod handle;
pub mod models;
pub mod time;
pub mod transform;

pub use actor::{build_events_url, parse_events};
pub use handle::CtfTimeHandle;
pub use models::{DisplayEvent, RemoteEvent};
pub use transform::transform;

use crate::config::Config;
use crate::error::{BotResult, FetchError};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Anything that can produce upcoming events for a browsing session
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch at most `limit` events, in the order the source returns them
    async fn fetch(&self, limit: u32) -> Result<Vec<RemoteEvent>, FetchError>;
}

/// CTFtime component wrapping the fetch actor
pub struct CtfTime {
    handle: CtfTimeHandle,
}

impl CtfTime {
    /// Create a new CTFtime component around an already spawned handle
    pub fn new(handle: CtfTimeHandle) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl super::Component for CtfTime {
    fn name(&self) -> &'static str {
        "ctftime"
    }

    async fn init(&self, _ctx: &serenity::Context, config: Arc<RwLock<Config>>) -> BotResult<()> {
        let config_read = config.read().await;
        info!(
            "CTFtime source ready at {} (timeout {}s)",
            config_read.api_url, config_read.http_timeout_secs
        );
        Ok(())
    }

    async fn shutdown(&self) -> BotResult<()> {
        self.handle.shutdown().await
    }
}
