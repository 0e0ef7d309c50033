use async_trait::async_trait;
use ctfbot::commands::{get_all_application_commands, CommandContext};
use ctfbot::components::event_browser::custom_id::build_custom_id;
use ctfbot::components::event_browser::{is_browser_custom_id, parse_custom_id, NavAction};
use ctfbot::components::ctftime::RemoteEvent;
use ctfbot::components::{Component, ComponentManager, EventSource, SessionController};
use ctfbot::config::{Config, FileOverrides};
use ctfbot::error::{component_error, BotResult, FetchError};
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([("DISCORD_TOKEN", "test-token")]);
    Config::from_lookup(move |key: &str| vars.get(key).map(|v| v.to_string()))
        .expect("config from lookup")
}

/// Smoke test to verify that the config can be built from the environment
#[tokio::test]
async fn test_config_loads() {
    let config = test_config();

    assert_eq!(config.discord_token, "test-token");
    assert_eq!(config.page_size, 5);
    assert_eq!(config.api_url, "https://ctftime.org/api/v1/events/");
    assert!(config.guild_id.is_none());
    assert!(config.validate().is_ok());
}

/// File overrides change tunables but leave the token alone
#[tokio::test]
async fn test_file_overrides_apply() {
    let mut config = test_config();
    let overrides: FileOverrides =
        toml::from_str("page_size = 8\nsession_timeout_secs = 300\nguild_id = 1234\n")
            .expect("valid overrides");

    config.apply_overrides(overrides);

    assert_eq!(config.page_size, 8);
    assert_eq!(config.session_timeout_secs, 300);
    assert_eq!(config.guild_id, Some(1234));
    assert_eq!(config.discord_token, "test-token");
}

/// Component that records lifecycle calls into a shared log
struct RecordingComponent {
    name: &'static str,
    fail_shutdown: bool,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Component for RecordingComponent {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn init(&self, _ctx: &serenity::Context, _config: Arc<RwLock<Config>>) -> BotResult<()> {
        Ok(())
    }

    async fn shutdown(&self) -> BotResult<()> {
        self.log
            .lock()
            .expect("log lock")
            .push(format!("shutdown:{}", self.name));
        if self.fail_shutdown {
            return Err(component_error("shutdown failed"));
        }
        Ok(())
    }
}

/// Components shut down in registration order, even when one fails
#[tokio::test]
async fn test_component_shutdown_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut manager = ComponentManager::new(Arc::new(RwLock::new(test_config())));

    manager.register(RecordingComponent {
        name: "event_browser",
        fail_shutdown: true,
        log: Arc::clone(&log),
    });
    manager.register(RecordingComponent {
        name: "ctftime",
        fail_shutdown: false,
        log: Arc::clone(&log),
    });

    assert!(manager.shutdown_all().await.is_ok());
    assert_eq!(
        *log.lock().expect("log lock"),
        vec!["shutdown:event_browser", "shutdown:ctftime"]
    );
}

/// Both slash commands are registered
#[test]
fn test_commands_registered() {
    let names: Vec<String> = get_all_application_commands()
        .into_iter()
        .map(|command| command.name)
        .collect();

    assert!(names.contains(&"upcoming".to_string()));
    assert!(names.contains(&"ping".to_string()));
}

/// Only browser buttons are routed to the session controller
#[test]
fn test_custom_id_routing() {
    let id = uuid::Uuid::new_v4();
    let custom_id = build_custom_id(NavAction::Next, id);

    assert!(is_browser_custom_id(&custom_id));
    assert_eq!(parse_custom_id(&custom_id), Some((NavAction::Next, id)));
    assert!(!is_browser_custom_id("poll:vote:1"));
    assert_eq!(parse_custom_id("ctf:sideways:abc"), None);
}

/// Source with nothing scheduled
struct NoEvents;

#[async_trait]
impl EventSource for NoEvents {
    async fn fetch(&self, _limit: u32) -> Result<Vec<RemoteEvent>, FetchError> {
        Ok(Vec::new())
    }
}

/// Framework errors log the command data, so it must be printable
#[test]
fn test_command_context_debug() {
    let sessions = Arc::new(SessionController::new(
        Arc::new(NoEvents),
        5,
        Duration::from_secs(120),
    ));
    let printed = format!("{:?}", CommandContext::new(sessions));

    assert!(printed.contains("CommandContext"));
    assert!(printed.contains("page_size: 5"));
}
