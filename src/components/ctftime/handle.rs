use super::actor::{CtfTimeActor, CtfTimeActorHandle};
use super::models::RemoteEvent;
use super::EventSource;
use crate::config::Config;
use crate::error::{BotResult, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the CTFtime actor
#[derive(Clone)]
pub struct CtfTimeHandle {
    actor_handle: CtfTimeActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl CtfTimeHandle {
    /// Create a new CtfTimeHandle and spawn the actor
    pub fn new(config: Arc<RwLock<Config>>, client: Client) -> Self {
        let (mut actor, handle) = CtfTimeActor::new(config, client);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BotResult<()> {
        self.actor_handle.shutdown().await
    }
}

#[async_trait]
impl EventSource for CtfTimeHandle {
    async fn fetch(&self, limit: u32) -> Result<Vec<RemoteEvent>, FetchError> {
        self.actor_handle.fetch_events(limit).await
    }
}
