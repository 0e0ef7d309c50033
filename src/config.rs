use crate::error::{config_error, env_error, BotResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Default activity text for the bot
pub const DEFAULT_ACTIVITY: &str = "Watching the CTF calendar";

/// Default CTFtime events endpoint
pub const DEFAULT_API_URL: &str = "https://ctftime.org/api/v1/events/";

/// Identifying header sent with every CTFtime request
pub const DEFAULT_USER_AGENT: &str = "DiscordBot (ctfbot)";

/// Discord allows at most 25 fields per embed
pub const MAX_PAGE_SIZE: usize = 25;

/// Longest allowed idle time for a browsing session, one day
pub const MAX_SESSION_TIMEOUT_SECS: u64 = 86_400;

/// Optional file with non-secret overrides
pub const CONFIG_FILE: &str = "config/ctfbot.toml";

/// Main configuration structure for the bot
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token
    pub discord_token: String,
    /// Guild to register commands in; global registration when unset
    pub guild_id: Option<u64>,
    /// CTFtime events endpoint
    pub api_url: String,
    /// User-Agent header for CTFtime requests
    pub user_agent: String,
    /// Request timeout for CTFtime calls, in seconds
    pub http_timeout_secs: u64,
    /// Events shown per page
    pub page_size: usize,
    /// Seconds a browsing session stays interactive after its last use
    pub session_timeout_secs: u64,
    /// Bot activity status text
    pub activity: String,
    /// Locale for user-facing strings
    pub bot_locale: String,
}

/// Values that may be set from `config/ctfbot.toml`.
///
/// The token is not accepted here; it only comes from the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileOverrides {
    pub guild_id: Option<u64>,
    pub api_url: Option<String>,
    pub user_agent: Option<String>,
    pub http_timeout_secs: Option<u64>,
    pub page_size: Option<usize>,
    pub session_timeout_secs: Option<u64>,
    pub activity: Option<String>,
    pub bot_locale: Option<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> BotResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;

        if Path::new(CONFIG_FILE).exists() {
            let content = fs::read_to_string(CONFIG_FILE)?;
            let overrides: FileOverrides = toml::from_str(&content)?;
            config.apply_overrides(overrides);
            tracing::info!("Applied overrides from {}", CONFIG_FILE);
        }

        config.validate()?;
        Ok(config)
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN").ok_or_else(|| env_error("DISCORD_TOKEN"))?;

        let guild_id = match lookup("GUILD_ID") {
            Some(raw) => Some(parse_var::<u64>("GUILD_ID", &raw)?),
            None => None,
        };

        Ok(Config {
            discord_token,
            guild_id,
            api_url: lookup("CTFTIME_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            user_agent: lookup("CTFTIME_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", lookup("HTTP_TIMEOUT_SECS"), 30)?,
            page_size: parse_or("PAGE_SIZE", lookup("PAGE_SIZE"), 5)?,
            session_timeout_secs: parse_or(
                "SESSION_TIMEOUT_SECS",
                lookup("SESSION_TIMEOUT_SECS"),
                120,
            )?,
            activity: lookup("BOT_ACTIVITY").unwrap_or_else(|| DEFAULT_ACTIVITY.to_string()),
            bot_locale: lookup("BOT_LOCALE").unwrap_or_else(|| String::from("en")),
        })
    }

    /// Merge file overrides on top of environment values
    pub fn apply_overrides(&mut self, overrides: FileOverrides) {
        if let Some(guild_id) = overrides.guild_id {
            self.guild_id = Some(guild_id);
        }
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if let Some(user_agent) = overrides.user_agent {
            self.user_agent = user_agent;
        }
        if let Some(secs) = overrides.http_timeout_secs {
            self.http_timeout_secs = secs;
        }
        if let Some(page_size) = overrides.page_size {
            self.page_size = page_size;
        }
        if let Some(secs) = overrides.session_timeout_secs {
            self.session_timeout_secs = secs;
        }
        if let Some(activity) = overrides.activity {
            self.activity = activity;
        }
        if let Some(locale) = overrides.bot_locale {
            self.bot_locale = locale;
        }
    }

    /// Reject values the rest of the bot cannot work with
    pub fn validate(&self) -> BotResult<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(config_error(&format!(
                "PAGE_SIZE must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.session_timeout_secs == 0 || self.session_timeout_secs > MAX_SESSION_TIMEOUT_SECS {
            return Err(config_error(&format!(
                "SESSION_TIMEOUT_SECS must be between 1 and {}",
                MAX_SESSION_TIMEOUT_SECS
            )));
        }
        url::Url::parse(&self.api_url)
            .map_err(|e| config_error(&format!("Invalid CTFTIME_API_URL: {}", e)))?;
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> BotResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| config_error(&format!("Invalid {} format: {}", name, raw)))
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> BotResult<T> {
    match raw {
        Some(raw) => parse_var(name, &raw),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "abc")])).unwrap();
        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.guild_id, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.session_timeout_secs, 120);
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.bot_locale, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, crate::error::Error::Environment(_)));
    }

    #[test]
    fn test_bad_numbers_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("PAGE_SIZE", "five"),
        ]));
        assert!(matches!(result, Err(crate::error::Error::Config(_))));

        let result = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("GUILD_ID", "-1"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_page_size_invalid() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("PAGE_SIZE", "0"),
        ]))
        .unwrap();
        assert!(config.validate().is_err());

        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("PAGE_SIZE", "26"),
        ]))
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_timeout_bounds() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("SESSION_TIMEOUT_SECS", "86400"),
        ]))
        .unwrap();
        assert!(config.validate().is_ok());

        for raw in ["0", "86401", "18446744073709551615"] {
            let config = Config::from_lookup(lookup_from(&[
                ("DISCORD_TOKEN", "abc"),
                ("SESSION_TIMEOUT_SECS", raw),
            ]))
            .unwrap();
            assert!(config.validate().is_err(), "{}", raw);
        }
    }

    #[test]
    fn test_file_overrides() {
        let mut config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("PAGE_SIZE", "3"),
        ]))
        .unwrap();

        let overrides: FileOverrides = toml::from_str(
            r#"
            page_size = 8
            guild_id = 42
            activity = "Solving pwn"
            "#,
        )
        .unwrap();
        config.apply_overrides(overrides);

        assert_eq!(config.page_size, 8);
        assert_eq!(config.guild_id, Some(42));
        assert_eq!(config.activity, "Solving pwn");
        // Untouched values keep their env/default value
        assert_eq!(config.session_timeout_secs, 120);
        assert_eq!(config.discord_token, "abc");
    }

    #[test]
    fn test_file_cannot_set_token() {
        let result = toml::from_str::<FileOverrides>(r#"discord_token = "leak""#);
        assert!(result.is_err());
    }
}
