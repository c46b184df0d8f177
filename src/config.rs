// Runtime configuration.
// Parses the optional .env file and resolves settings into an explicit struct.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::cache::paths;
use crate::error::Result;
use crate::raindrop::client::RAINDROP_API_BASE;

pub const TOKEN_VAR: &str = "RAINDROP_TOKEN";
pub const API_BASE_VAR: &str = "RAINDROP_API_BASE";
pub const CACHE_FILE_VAR: &str = "RAINDROP_CACHE_FILE";
pub const LOG_FILE_VAR: &str = "RAINDROP_LOG_FILE";

/// How long a cached article list stays fresh: 5 minutes.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Timeout applied to every API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token; `None` disables every network call.
    pub token: Option<String>,
    pub api_base: String,
    pub cache_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_base: RAINDROP_API_BASE.to_string(),
            cache_path: paths::cache_path(),
            log_path: paths::log_path(),
            cache_ttl: CACHE_TTL,
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    /// Build a config from env-file values and a process environment lookup.
    /// Values from the file take precedence.
    pub fn resolve<F>(file_vars: &HashMap<String, String>, env_lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            file_vars
                .get(key)
                .cloned()
                .or_else(|| env_lookup(key))
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            token: get(TOKEN_VAR),
            api_base: get(API_BASE_VAR).unwrap_or(defaults.api_base),
            cache_path: get(CACHE_FILE_VAR).map(PathBuf::from).or(defaults.cache_path),
            log_path: get(LOG_FILE_VAR).map(PathBuf::from).or(defaults.log_path),
            ..defaults
        }
    }

    /// Build a config from the real process environment.
    pub fn from_env(file_vars: &HashMap<String, String>) -> Self {
        Self::resolve(file_vars, |key| std::env::var(key).ok())
    }
}

/// Default env file: `.env` next to the executable.
pub fn default_env_file() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(".env")))
}

/// Read and parse an env file. A missing file is an empty mapping.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => Ok(collect_vars(iter)),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(e.into()),
    }
}

/// Parse `KEY=VALUE` lines in dotenv syntax.
///
/// Comments, an `export ` prefix and quoted values are handled by dotenvy.
/// Lines it cannot parse are skipped.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    collect_vars(dotenvy::from_read_iter(contents.as_bytes()))
}

fn collect_vars<R: Read>(iter: dotenvy::Iter<R>) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, unquote(value.trim()).to_string());
            }
            Err(e) => debug!("Skipping env line: {}", e),
        }
    }

    vars
}

// Stray quotes left around a value are dropped too
fn unquote(value: &str) -> &str {
    value.trim_matches(|c: char| c == '"' || c == '\'')
}
