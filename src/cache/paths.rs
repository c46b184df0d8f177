// Cache path utilities.
// Resolves the fixed cache and log file locations in the user's home directory.

use std::path::PathBuf;

use directories::BaseDirs;

/// File name of the cached article list.
pub const CACHE_FILE_NAME: &str = ".alfred_random_raindrop_cache.json";

/// File name of the append-only error log.
pub const LOG_FILE_NAME: &str = ".alfred_random_raindrop.log";

/// Get the user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Path to the cached article list (~/.alfred_random_raindrop_cache.json).
pub fn cache_path() -> Option<PathBuf> {
    home_dir().map(|dir| dir.join(CACHE_FILE_NAME))
}

/// Path to the error log (~/.alfred_random_raindrop.log).
pub fn log_path() -> Option<PathBuf> {
    home_dir().map(|dir| dir.join(LOG_FILE_NAME))
}
