// Error types for raindrop-random.
// Covers API transport and status errors, decoding, configuration and cache IO.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaindropError {
    #[error("Raindrop.io API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Missing RAINDROP_TOKEN")]
    MissingToken,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not locate the home directory")]
    NoHomeDir,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RaindropError>;
