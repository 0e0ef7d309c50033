use super::models::RemoteEvent;
use crate::config::Config;
use crate::error::{component_error, BotResult, FetchError};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};
use url::Url;

type FetchResult = Result<Vec<RemoteEvent>, FetchError>;

/// The CTFtime actor that owns the HTTP client and serves fetch requests
pub struct CtfTimeActor {
    config: Arc<RwLock<Config>>,
    client: Client,
    command_rx: mpsc::Receiver<CtfTimeCommand>,
}

/// Commands that can be sent to the CTFtime actor
pub enum CtfTimeCommand {
    FetchEvents(u32, mpsc::Sender<FetchResult>),
    Shutdown,
}

/// Handle for communicating with the CTFtime actor
#[derive(Clone)]
pub struct CtfTimeActorHandle {
    command_tx: mpsc::Sender<CtfTimeCommand>,
}

impl CtfTimeActorHandle {
    /// Fetch up to `limit` upcoming events
    pub async fn fetch_events(&self, limit: u32) -> FetchResult {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(CtfTimeCommand::FetchEvents(limit, response_tx))
            .await
            .map_err(|e| FetchError::Network(format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| FetchError::Network("Response channel closed".to_string()))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BotResult<()> {
        self.command_tx
            .send(CtfTimeCommand::Shutdown)
            .await
            .map_err(|e| component_error(&format!("CTFtime actor already stopped: {}", e)))
    }
}

impl CtfTimeActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>, client: Client) -> (Self, CtfTimeActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            client,
            command_rx,
        };

        (actor, CtfTimeActorHandle { command_tx })
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("CTFtime actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                CtfTimeCommand::FetchEvents(limit, response_tx) => {
                    let (api_url, user_agent) = {
                        let config_read = self.config.read().await;
                        (config_read.api_url.clone(), config_read.user_agent.clone())
                    };
                    let client = self.client.clone();

                    // Each fetch runs on its own task so a slow request never holds up the mailbox
                    tokio::spawn(async move {
                        let result = fetch_events(&client, &api_url, &user_agent, limit).await;
                        let _ = response_tx.send(result).await;
                    });
                }
                CtfTimeCommand::Shutdown => {
                    info!("CTFtime actor shutting down");
                    break;
                }
            }
        }

        info!("CTFtime actor shut down");
    }
}

/// Perform one GET against the events endpoint
pub async fn fetch_events(
    client: &Client,
    api_url: &str,
    user_agent: &str,
    limit: u32,
) -> FetchResult {
    let url = build_events_url(api_url, limit)?;
    debug!("Fetching CTFtime events from {}", url);

    let response = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .send()
        .await
        .map_err(|e| FetchError::Network(format!("Failed to reach CTFtime: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Network(format!("HTTP {}", status)));
    }

    let body = response.text().await?;
    parse_events(&body)
}

/// Build the request URL with the `limit` query parameter
pub fn build_events_url(api_url: &str, limit: u32) -> Result<Url, FetchError> {
    let mut url = Url::parse(api_url)
        .map_err(|e| FetchError::Network(format!("Failed to parse URL: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("limit", &limit.to_string());
    Ok(url)
}

/// Parse a response body into events
pub fn parse_events(body: &str) -> FetchResult {
    Ok(serde_json::from_str::<Vec<RemoteEvent>>(body)?)
}
