// Raindrop.io API module.
// Provides client and types for interacting with the Raindrop.io REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::RaindropClient;
pub use types::*;
