use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::board::CategoryMutator;
use crate::contact::ContactDirectory;
use crate::error::{AppError, Result};
use crate::gesture::GestureConfig;
use crate::task::{TaskService, TaskStore};
use crate::websocket::ConnectionManager;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub task_store: Arc<dyn TaskStore>,
    pub contact_directory: Arc<dyn ContactDirectory>,
    pub task_service: TaskService,
    pub mutator: CategoryMutator,
    pub ws_connections: ConnectionManager,
}

impl AppState {
    pub fn new(
        config: Config,
        task_store: Arc<dyn TaskStore>,
        contact_directory: Arc<dyn ContactDirectory>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            task_service: TaskService::new(task_store.clone(), contact_directory.clone()),
            mutator: CategoryMutator::new(task_store.clone()),
            ws_connections: ConnectionManager::new(),
            task_store,
            contact_directory,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root of the remote document store. `None` keeps tasks in memory.
    pub store_base_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub long_press_ms: u64,
    pub tap_slop_px: f64,
    pub scroll_multiplier: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_base_url: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
            long_press_ms: 500,
            tap_slop_px: 10.0,
            scroll_multiplier: 1.5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            store_base_url: lookup("STORE_BASE_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            long_press_ms: parse_var(&lookup, "LONG_PRESS_MS", defaults.long_press_ms)?,
            tap_slop_px: parse_var(&lookup, "TAP_SLOP_PX", defaults.tap_slop_px)?,
            scroll_multiplier: parse_var(&lookup, "SCROLL_MULTIPLIER", defaults.scroll_multiplier)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn gesture(&self) -> GestureConfig {
        GestureConfig {
            long_press: Duration::from_millis(self.long_press_ms),
            tap_slop: self.tap_slop_px,
            scroll_multiplier: self.scroll_multiplier,
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr(), "127.0.0.1:3000");
        assert_eq!(config.gesture(), GestureConfig::default());
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("STORE_BASE_URL", "https://board-demo.example.com/"),
            ("PORT", "8080"),
            ("LONG_PRESS_MS", "650"),
        ]))
        .unwrap();

        assert_eq!(config.store_base_url.as_deref(), Some("https://board-demo.example.com"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.gesture().long_press, Duration::from_millis(650));
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let result = Config::from_lookup(lookup(&[("TAP_SLOP_PX", "ten")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
