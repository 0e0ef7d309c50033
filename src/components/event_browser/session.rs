use super::custom_id::SessionId;
use super::paginator::{NavAction, Paginator};
use super::render::{render_paginator, RenderedPage};
use crate::components::ctftime::{transform, DisplayEvent, EventSource};
use crate::config::MAX_SESSION_TIMEOUT_SECS;
use crate::error::FetchError;
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// One live browsing session
#[derive(Debug)]
pub struct Session {
    paginator: Paginator,
    requester: serenity::UserId,
    message: Option<(serenity::ChannelId, serenity::MessageId)>,
    expires_at: Instant,
    /// Set once the session leaves the store; a press holding it must not re-render
    closed: bool,
}

impl Session {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Result of starting a browsing session
#[derive(Debug)]
pub enum StartOutcome {
    /// `limit` was zero or negative; nothing was fetched
    InvalidLimit,
    /// The fetch or the transformation failed
    Failed(FetchError),
    /// The source had nothing scheduled
    Empty,
    /// A session is registered and its first page is ready to send
    Opened {
        session_id: SessionId,
        page: RenderedPage,
    },
}

/// Result of a navigation button press
#[derive(Debug, PartialEq, Eq)]
pub enum NavigateOutcome {
    /// The page moved; the message should show this render
    Updated(RenderedPage),
    /// Already at the boundary; nothing to re-render
    Unchanged,
    /// No live session under that id
    Stale,
    /// Someone other than the requester pressed the button
    WrongUser,
}

/// Owns every live browsing session, keyed by session id
pub struct SessionController {
    source: Arc<dyn EventSource>,
    page_size: usize,
    timeout: Duration,
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<Session>>>>,
    http: RwLock<Option<Arc<serenity::Http>>>,
    shutdown: CancellationToken,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SessionController {
    pub fn new(source: Arc<dyn EventSource>, page_size: usize, timeout: Duration) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            timeout,
            sessions: Mutex::new(HashMap::new()),
            http: RwLock::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    /// Provide the HTTP client used to strip buttons from expired messages
    pub async fn set_http(&self, http: Arc<serenity::Http>) {
        *self.http.write().await = Some(http);
    }

    /// Fetch events and, when there are any, register a session on its first page
    pub async fn start(self: &Arc<Self>, requester: serenity::UserId, limit: i64) -> StartOutcome {
        if limit <= 0 {
            debug!("Rejected limit {} from {}", limit, requester);
            return StartOutcome::InvalidLimit;
        }
        let limit = u32::try_from(limit).unwrap_or(u32::MAX);

        let events = match self.fetch_display_events(limit).await {
            Ok(events) => events,
            Err(e) => {
                error!("Failed to fetch CTF events for {}: {}", requester, e);
                return StartOutcome::Failed(e);
            }
        };

        let Some(paginator) = Paginator::new(events, self.page_size) else {
            info!("No upcoming CTF events for {}", requester);
            return StartOutcome::Empty;
        };

        let page = render_paginator(&paginator);
        let session_id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session {
            paginator,
            requester,
            message: None,
            expires_at: self.next_deadline(),
            closed: false,
        }));

        self.sessions
            .lock()
            .await
            .insert(session_id, Arc::clone(&session));
        self.spawn_expiry(session_id, session);

        info!("Opened browsing session {} for {}", session_id, requester);
        StartOutcome::Opened { session_id, page }
    }

    async fn fetch_display_events(&self, limit: u32) -> Result<Arc<[DisplayEvent]>, FetchError> {
        let raw = self.source.fetch(limit).await?;
        Ok(transform(&raw)?.into())
    }

    /// Record which message shows this session. Returns `false` if it already expired.
    pub async fn bind_message(
        &self,
        session_id: SessionId,
        channel_id: serenity::ChannelId,
        message_id: serenity::MessageId,
    ) -> bool {
        let Some(session) = self.get(session_id).await else {
            return false;
        };
        session.lock().await.message = Some((channel_id, message_id));
        true
    }

    /// Drop a session whose message never made it out
    pub async fn discard(&self, session_id: SessionId) {
        let removed = self.sessions.lock().await.remove(&session_id);
        if let Some(session) = removed {
            session.lock().await.closed = true;
            debug!("Discarded browsing session {}", session_id);
        }
    }

    /// Apply a button press to the session it targets
    pub async fn navigate(
        &self,
        session_id: SessionId,
        action: NavAction,
        actor: serenity::UserId,
    ) -> NavigateOutcome {
        let Some(session) = self.get(session_id).await else {
            return NavigateOutcome::Stale;
        };
        self.navigate_session(session_id, &session, action, actor).await
    }

    async fn navigate_session(
        &self,
        session_id: SessionId,
        session: &Mutex<Session>,
        action: NavAction,
        actor: serenity::UserId,
    ) -> NavigateOutcome {
        let mut session = session.lock().await;
        if session.closed || session.is_expired() {
            return NavigateOutcome::Stale;
        }
        if session.requester != actor {
            return NavigateOutcome::WrongUser;
        }

        session.expires_at = self.next_deadline();

        if !session.paginator.apply(action) {
            debug!("Ignored {:?} at page boundary in session {}", action, session_id);
            return NavigateOutcome::Unchanged;
        }

        debug!(
            "Session {} moved to page {}",
            session_id,
            session.paginator.index() + 1
        );
        NavigateOutcome::Updated(render_paginator(&session.paginator))
    }

    /// Remove a session and strip the buttons from its message
    pub async fn expire(&self, session_id: SessionId) -> bool {
        let Some(session) = self.sessions.lock().await.remove(&session_id) else {
            return false;
        };

        let message = Self::close(&session).await;
        if let Some((channel_id, message_id)) = message {
            self.strip_buttons(channel_id, message_id).await;
        }

        info!("Browsing session {} expired", session_id);
        true
    }

    /// Expire from the timer, deciding under the session lock so a press either
    /// refreshes the deadline first or finds the session closed
    async fn expire_if_due(&self, session_id: SessionId, session: &Mutex<Session>) -> bool {
        let message = {
            let mut session = session.lock().await;
            if session.closed {
                return true;
            }
            if !session.is_expired() {
                return false;
            }
            session.closed = true;
            self.sessions.lock().await.remove(&session_id);
            session.message
        };

        if let Some((channel_id, message_id)) = message {
            self.strip_buttons(channel_id, message_id).await;
        }

        info!("Browsing session {} expired", session_id);
        true
    }

    async fn close(session: &Mutex<Session>) -> Option<(serenity::ChannelId, serenity::MessageId)> {
        let mut session = session.lock().await;
        session.closed = true;
        session.message
    }

    /// Close every session; used at shutdown
    pub async fn close_all(&self) {
        self.shutdown.cancel();

        let drained: Vec<_> = self.sessions.lock().await.drain().collect();
        for (session_id, session) in drained {
            let message = Self::close(&session).await;
            if let Some((channel_id, message_id)) = message {
                self.strip_buttons(channel_id, message_id).await;
            }
            debug!("Closed browsing session {}", session_id);
        }
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn next_deadline(&self) -> Instant {
        let now = Instant::now();
        now.checked_add(self.timeout)
            .or_else(|| now.checked_add(Duration::from_secs(MAX_SESSION_TIMEOUT_SECS)))
            .unwrap_or(now)
    }

    async fn get(&self, session_id: SessionId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.lock().await.get(&session_id).cloned()
    }

    async fn strip_buttons(&self, channel_id: serenity::ChannelId, message_id: serenity::MessageId) {
        let Some(http) = self.http.read().await.clone() else {
            return;
        };

        if let Err(e) = channel_id
            .edit_message(
                &*http,
                message_id,
                serenity::EditMessage::new().components(vec![]),
            )
            .await
        {
            warn!("Could not remove buttons from message {}: {}", message_id, e);
        }
    }

    fn spawn_expiry(self: &Arc<Self>, session_id: SessionId, session: Arc<Mutex<Session>>) {
        let controller: Weak<Self> = Arc::downgrade(self);
        let cancelled = self.shutdown.clone();

        tokio::spawn(async move {
            loop {
                let deadline = session.lock().await.expires_at;
                tokio::select! {
                    _ = cancelled.cancelled() => return,
                    _ = tokio::time::sleep_until(deadline) => {}
                }

                // Navigation pushes the deadline forward; sleep again if it moved
                let Some(controller) = controller.upgrade() else {
                    return;
                };
                if controller.expire_if_due(session_id, &session).await {
                    return;
                }
            }
        });
    }
}
