// Cache store for the article list.
// Handles JSON serialization, freshness checking, and atomic writes.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::raindrop::Article;

/// The persisted article list with the instant it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    /// When the list was cached.
    pub timestamp: DateTime<Local>,
    /// The merged article list.
    pub articles: Vec<Article>,
}

impl CacheRecord {
    /// Create a record stamped with the current time.
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            timestamp: Local::now(),
            articles,
        }
    }

    /// Check whether the record is younger than `ttl`.
    /// A timestamp in the future counts as fresh.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        match Local::now().signed_duration_since(self.timestamp).to_std() {
            Ok(elapsed) => elapsed < ttl,
            Err(_) => true,
        }
    }
}

/// Read the cache record from a file.
pub fn read_record(path: &Path) -> Result<Option<CacheRecord>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let record: CacheRecord = serde_json::from_str(&contents)?;
    Ok(Some(record))
}

/// Read the cached articles, returning None if the record is stale.
pub fn read_if_fresh(path: &Path, ttl: Duration) -> Result<Option<Vec<Article>>> {
    match read_record(path)? {
        Some(record) if record.is_fresh(ttl) => Ok(Some(record.articles)),
        _ => Ok(None),
    }
}

/// Write the articles to the cache, stamped with the current time.
pub fn write_record(path: &Path, articles: &[Article]) -> Result<()> {
    write_json(path, &CacheRecord::new(articles.to_vec()))
}

/// Write a record as JSON, replacing the target atomically.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    // Ensure parent directory exists
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let json = serde_json::to_string_pretty(value)?;

    // Each writer gets its own temp file, so readers never observe a partial file
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(json.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_articles() -> Vec<Article> {
        vec![
            Article {
                title: "Rust book".to_string(),
                url: "https://doc.rust-lang.org/book/".to_string(),
                source: "Raindrop.io".to_string(),
            },
            Article {
                title: "Tokio".to_string(),
                url: "https://tokio.rs".to_string(),
                source: "Raindrop (Reading)".to_string(),
            },
        ]
    }

    #[test]
    fn test_write_and_read_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");

        write_record(&path, &sample_articles()).unwrap();

        let record = read_record(&path).unwrap().unwrap();
        assert_eq!(record.articles, sample_articles());
        assert!(record.is_fresh(Duration::from_secs(300)));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_record_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");

        write_record(&path, &sample_articles()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(value["timestamp"].is_string());
        assert_eq!(value["articles"][1]["url"], "https://tokio.rs");
        assert_eq!(value["articles"][1]["source"], "Raindrop (Reading)");
    }

    #[test]
    fn test_concurrent_writers_never_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");

        let large: Vec<Article> = sample_articles().into_iter().cycle().take(200).collect();
        let small = sample_articles();
        write_record(&path, &small).unwrap();

        std::thread::scope(|scope| {
            let writers: Vec<_> = [&large, &small]
                .into_iter()
                .map(|articles| {
                    let path = &path;
                    scope.spawn(move || {
                        for _ in 0..200 {
                            write_record(path, articles).unwrap();
                        }
                    })
                })
                .collect();

            while writers.iter().any(|writer| !writer.is_finished()) {
                let record = read_record(&path).unwrap().unwrap();
                assert!(record.articles.len() == 200 || record.articles.len() == 2);
            }

            for writer in writers {
                writer.join().unwrap();
            }
        });

        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_stale_record() {
        let mut record = CacheRecord::new(sample_articles());

        record.timestamp = Local::now() - chrono::Duration::seconds(600);
        assert!(!record.is_fresh(Duration::from_secs(300)));

        record.timestamp = Local::now() - chrono::Duration::seconds(60);
        assert!(record.is_fresh(Duration::from_secs(300)));
    }

    #[test]
    fn test_future_record_is_fresh() {
        let mut record = CacheRecord::new(sample_articles());
        record.timestamp = Local::now() + chrono::Duration::seconds(60);
        assert!(record.is_fresh(Duration::from_secs(300)));
    }

    #[test]
    fn test_read_if_fresh_skips_stale() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");

        let mut record = CacheRecord::new(sample_articles());
        record.timestamp = Local::now() - chrono::Duration::seconds(600);
        write_json(&path, &record).unwrap();

        assert!(read_if_fresh(&path, Duration::from_secs(300)).unwrap().is_none());
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        assert!(read_record(&path).unwrap().is_none());
    }

    #[test]
    fn test_read_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        fs::write(&path, "{\"timestamp\": \"yesterday\"").unwrap();

        assert!(read_record(&path).is_err());
    }
}
