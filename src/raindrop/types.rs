// Raindrop.io API response types and the domain types built from them.

use serde::{Deserialize, Serialize};

/// Id of the pseudo-collection that holds every bookmark.
pub const ALL_BOOKMARKS_ID: i64 = 0;

/// Title of the pseudo-collection that holds every bookmark.
pub const ALL_BOOKMARKS_TITLE: &str = "All Bookmarks";

/// A bookmarked link ready to be picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    /// Display name of the collection the article came from.
    pub source: String,
}

/// A user-defined collection of bookmarks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: i64,
    pub title: String,
}

impl Collection {
    /// The synthetic "All Bookmarks" collection.
    pub fn all_bookmarks() -> Self {
        Self {
            id: ALL_BOOKMARKS_ID,
            title: ALL_BOOKMARKS_TITLE.to_string(),
        }
    }
}

impl From<CollectionItem> for Collection {
    fn from(item: CollectionItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
        }
    }
}

/// A single bookmark as returned by `/rest/v1/raindrops/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RaindropItem {
    pub title: Option<String>,
    pub link: Option<String>,
}

impl RaindropItem {
    /// Whether the item has a link and a non-empty (or missing) title.
    pub fn is_usable(&self) -> bool {
        self.title.as_deref() != Some("") && self.link.as_deref().is_some_and(|l| !l.is_empty())
    }

    /// Convert to an article, dropping items without a usable title or link.
    pub fn into_article(self, source: &str) -> Option<Article> {
        let title = self.title.unwrap_or_else(|| "Untitled".to_string());
        let url = self.link.unwrap_or_default();

        if title.is_empty() || url.is_empty() {
            return None;
        }

        Some(Article {
            title,
            url,
            source: source.to_string(),
        })
    }
}

/// A single collection as returned by `/rest/v1/collections`.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionItem {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default = "untitled_collection")]
    pub title: String,
}

fn untitled_collection() -> String {
    "Untitled Collection".to_string()
}

/// Envelope shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct ItemsResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raindrop_item_defaults_title() {
        let item: RaindropItem =
            serde_json::from_str(r#"{"link": "https://example.com"}"#).unwrap();
        let article = item.into_article("Raindrop.io").unwrap();
        assert_eq!(article.title, "Untitled");
        assert_eq!(article.url, "https://example.com");
        assert_eq!(article.source, "Raindrop.io");
    }

    #[test]
    fn test_raindrop_item_without_link_is_dropped() {
        let item: RaindropItem = serde_json::from_str(r#"{"title": "No link"}"#).unwrap();
        assert!(!item.is_usable());
        assert!(item.into_article("Raindrop.io").is_none());

        let item: RaindropItem =
            serde_json::from_str(r#"{"title": "", "link": "https://example.com"}"#).unwrap();
        assert!(item.into_article("Raindrop.io").is_none());
    }

    #[test]
    fn test_collections_response() {
        let json = r#"{
            "result": true,
            "items": [
                {"_id": 7, "title": "Reading"},
                {"_id": 9}
            ]
        }"#;
        let response: ItemsResponse<CollectionItem> = serde_json::from_str(json).unwrap();
        let collections: Vec<Collection> = response.items.into_iter().map(Into::into).collect();

        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].id, 7);
        assert_eq!(collections[0].title, "Reading");
        assert_eq!(collections[1].title, "Untitled Collection");
    }

    #[test]
    fn test_missing_items_is_empty() {
        let response: ItemsResponse<RaindropItem> = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
    }
}
