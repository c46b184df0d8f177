// Bookmark fetching pipeline.
// Checks the cache, pages through collections, merges and persists the result.

use tracing::{debug, info, warn};

use crate::cache;
use crate::config::Config;
use crate::error::{RaindropError, Result};
use crate::raindrop::{ALL_BOOKMARKS_ID, Article, Collection, RaindropClient};

/// Source label for bookmarks without a named collection.
pub const DEFAULT_SOURCE: &str = "Raindrop.io";

/// How many user collections are fetched on top of "All Bookmarks".
pub const MAX_EXTRA_COLLECTIONS: usize = 5;

/// Fetches bookmarks with a short-lived file cache in front of the API.
///
/// Every external call is fallible internally, but the public operations never
/// fail: errors are logged and downgraded to an empty result.
pub struct BookmarkFetcher {
    config: Config,
    /// `None` when no token is configured.
    client: Option<RaindropClient>,
    /// Collections fetched during this run, reused for display names.
    collections: Option<Vec<Collection>>,
}

impl BookmarkFetcher {
    pub fn new(config: Config) -> Self {
        let client = match RaindropClient::from_config(&config) {
            Ok(client) => Some(client),
            Err(RaindropError::MissingToken) => {
                debug!("No token configured, API calls disabled");
                None
            }
            Err(e) => {
                warn!("Client setup error: {}", e);
                None
            }
        };

        Self {
            config,
            client,
            collections: None,
        }
    }

    /// Fetch the newest page of bookmarks in a collection.
    pub async fn fetch_articles(&mut self, collection_id: i64) -> Vec<Article> {
        let Some(client) = &self.client else {
            return Vec::new();
        };

        let result = client.get_raindrops(collection_id).await;
        let items: Vec<_> = fail_soft("Raindrop.io error", result)
            .unwrap_or_default()
            .into_iter()
            .filter(|item| item.is_usable())
            .collect();
        if items.is_empty() {
            return Vec::new();
        }

        let source = self.resolve_collection_display_name(collection_id).await;
        let articles: Vec<Article> = items
            .into_iter()
            .filter_map(|item| item.into_article(&source))
            .collect();

        debug!(collection_id, count = articles.len(), "Fetched articles");
        articles
    }

    /// Fetch the user's collections, followed by the "All Bookmarks" entry.
    pub async fn fetch_collections(&mut self) -> Vec<Collection> {
        let Some(client) = &self.client else {
            return Vec::new();
        };

        let result = client.get_collections().await.map(|items| {
            let mut collections: Vec<Collection> = items.into_iter().map(Into::into).collect();
            collections.push(Collection::all_bookmarks());
            collections
        });

        match fail_soft("Collections error", result) {
            Some(collections) => {
                self.collections = Some(collections.clone());
                collections
            }
            None => vec![Collection::all_bookmarks()],
        }
    }

    /// Display name used as an article's source.
    ///
    /// The collection list is fetched at most once per run and reused.
    pub async fn resolve_collection_display_name(&mut self, collection_id: i64) -> String {
        if collection_id == ALL_BOOKMARKS_ID {
            return DEFAULT_SOURCE.to_string();
        }

        if self.collections.is_none() {
            self.fetch_collections().await;
        }

        self.collections
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|collection| collection.id == collection_id)
            .map(|collection| format!("Raindrop ({})", collection.title))
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
    }

    /// Cached articles, if the cache exists and is still fresh.
    pub fn load_cache(&self) -> Option<Vec<Article>> {
        let path = self.config.cache_path.as_deref()?;

        match cache::read_if_fresh(path, self.config.cache_ttl) {
            Ok(articles) => articles,
            Err(e) => {
                debug!("Ignoring unreadable cache {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Replace the cache with `articles`.
    pub fn save_cache(&self, articles: &[Article]) {
        let result = self
            .config
            .cache_path
            .as_deref()
            .ok_or(RaindropError::NoHomeDir)
            .and_then(|path| cache::write_record(path, articles));

        fail_soft("Cache save error", result);
    }

    /// All articles, from the cache when fresh, otherwise from the API.
    pub async fn get_all_articles(&mut self, force_refresh: bool) -> Vec<Article> {
        if !force_refresh {
            if let Some(cached) = self.load_cache().filter(|articles| !articles.is_empty()) {
                debug!(count = cached.len(), "Serving articles from cache");
                return cached;
            }
        }

        let mut articles = self.fetch_articles(ALL_BOOKMARKS_ID).await;

        let collections = self.fetch_collections().await;
        for collection in collections.iter().take(MAX_EXTRA_COLLECTIONS) {
            if collection.id != ALL_BOOKMARKS_ID {
                articles.extend(self.fetch_articles(collection.id).await);
            }
        }

        if !articles.is_empty() {
            self.save_cache(&articles);
        }

        info!(count = articles.len(), "Fetched articles from Raindrop.io");
        articles
    }
}

/// Downgrade an error to `None`, logging it with `context`.
fn fail_soft<T>(context: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{}: {}", context, e);
            None
        }
    }
}
