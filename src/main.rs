// raindrop-random: print the URL of a random Raindrop.io bookmark.
// Entry point for launcher integrations.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, warn};

mod cache;
mod config;
mod error;
mod fetcher;
mod logging;
mod pick;
mod raindrop;

use config::Config;
use fetcher::BookmarkFetcher;

#[derive(Parser)]
#[command(name = "raindrop-random")]
#[command(version, about = "Print the URL of a random Raindrop.io bookmark", long_about = None)]
struct Cli {
    /// Launcher query (accepted, not used for filtering)
    query: Option<String>,

    /// Ignore the cache and fetch from the API
    #[arg(long)]
    refresh: bool,

    /// Env file holding RAINDROP_TOKEN (defaults to .env next to the binary)
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let Cli {
        query,
        refresh,
        env_file,
    } = Cli::parse();

    let env_file = env_file.or_else(config::default_env_file);
    let (file_vars, env_error) = match env_file.as_deref().map(config::load_env_file) {
        Some(Ok(vars)) => (vars, None),
        Some(Err(e)) => (HashMap::new(), Some(e)),
        None => (HashMap::new(), None),
    };

    let config = Config::from_env(&file_vars);
    logging::init(config.log_path.as_deref());

    if let Some(e) = env_error {
        warn!("Env file error: {}", e);
    }
    if let Some(query) = &query {
        debug!("Ignoring launcher query {:?}", query);
    }

    let mut fetcher = BookmarkFetcher::new(config);
    let articles = fetcher.get_all_articles(refresh).await;

    let picked = pick::pick_random(&articles, &mut rand::rng());
    println!("{}", pick::render(picked));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["raindrop-random"]).unwrap();
        assert!(cli.query.is_none());
        assert!(!cli.refresh);
        assert!(cli.env_file.is_none());
    }

    #[test]
    fn test_cli_query_and_flags() {
        let cli = Cli::try_parse_from([
            "raindrop-random",
            "rust",
            "--refresh",
            "--env-file",
            "/tmp/raindrop.env",
        ])
        .unwrap();
        assert_eq!(cli.query.as_deref(), Some("rust"));
        assert!(cli.refresh);
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/raindrop.env")));
    }
}
