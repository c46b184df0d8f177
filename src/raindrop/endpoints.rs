// Raindrop.io API endpoint functions.
// Typed methods for the two list endpoints the fetcher needs.

use crate::error::Result;

use super::client::RaindropClient;
use super::types::{CollectionItem, ItemsResponse, RaindropItem};

/// Fixed page size for bookmark listings.
pub const PER_PAGE: u32 = 50;

impl RaindropClient {
    /// Get the newest bookmarks of a collection (first page only).
    pub async fn get_raindrops(&self, collection_id: i64) -> Result<Vec<RaindropItem>> {
        let params = [("sort", "-created"), ("perpage", &PER_PAGE.to_string())];
        let response = self
            .get_with_params(&format!("/rest/v1/raindrops/{}", collection_id), &params)
            .await?;
        let wrapper: ItemsResponse<RaindropItem> = Self::decode(response).await?;
        Ok(wrapper.items)
    }

    /// Get the user's root collections.
    pub async fn get_collections(&self) -> Result<Vec<CollectionItem>> {
        let response = self.get("/rest/v1/collections").await?;
        let wrapper: ItemsResponse<CollectionItem> = Self::decode(response).await?;
        Ok(wrapper.items)
    }
}
