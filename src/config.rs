use crate::storage::Backend;
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";

/// Process settings read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub data_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().unwrap_or_else(|_| {
                warn!("ignoring invalid PORT '{value}'");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let data_dir = lookup("APP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self { port, data_dir }
    }

    pub fn backend(&self) -> Backend {
        Backend::new(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let settings = settings(&[]);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let parsed = settings(&[("PORT", "9123"), ("APP_DATA_DIR", "/tmp/x")]);
        assert_eq!(parsed.port, 9123);
        assert_eq!(parsed.data_dir, PathBuf::from("/tmp/x"));
        assert_eq!(parsed.backend().dir(), PathBuf::from("/tmp/x").as_path());

        let fallback = settings(&[("PORT", "eighty")]);
        assert_eq!(fallback.port, 8080);
    }
}
