//! TheCatAPI image source

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FetchError, Source};
use crate::cache::CAT_KEY;
use crate::policy::SourceKind;

/// Random image search endpoint
pub const CAT_API_URL: &str = "https://api.thecatapi.com/v1/images/search";

/// A cat image reduced to the four fields the dashboard uses.
///
/// Extra upstream fields (breeds, categories) are dropped on parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatImage {
    pub id: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl CatImage {
    /// Bundled image shown when the API is unreachable.
    pub fn fallback() -> Self {
        Self {
            id: "000".to_string(),
            url: "/static/cat_fallback.gif".to_string(),
            width: 478,
            height: 241,
        }
    }
}

/// Takes the first image out of a search response.
pub(crate) fn parse_search(body: &str) -> Result<CatImage, FetchError> {
    let images: Vec<CatImage> = serde_json::from_str(body)?;
    images
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Unexpected("empty image list".to_string()))
}

#[derive(Debug, Clone)]
pub struct CatSource {
    client: Client,
    url: String,
}

impl CatSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Source for CatSource {
    fn key(&self) -> &str {
        CAT_KEY
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Cat
    }

    fn fallback(&self) -> Value {
        serde_json::to_value(CatImage::fallback()).unwrap_or_default()
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::to_value(parse_search(&body)?)?)
    }
}
