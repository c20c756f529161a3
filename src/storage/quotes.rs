//! Quote Store
//!
//! Read-only JSON array of quotes. The file is read on every call, so edits
//! show up without a restart.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "Quote")]
    pub text: String,
    #[serde(rename = "Author", default)]
    pub author: String,
}

#[derive(Debug, Clone)]
pub struct QuoteStore {
    path: PathBuf,
}

impl QuoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every quote; an empty file counts as not found.
    pub async fn all(&self) -> Result<Vec<Quote>> {
        let quotes = self.load().await?;
        if quotes.is_empty() {
            return Err(DashboardError::NotFound("No quotes available".to_string()));
        }
        Ok(quotes)
    }

    /// One quote chosen uniformly at random.
    pub async fn random(&self) -> Result<Quote> {
        let quotes = self.all().await?;
        quotes
            .choose(&mut rand::rng())
            .cloned()
            .ok_or_else(|| DashboardError::NotFound("No quotes available".to_string()))
    }

    /// Quotes whose author contains `author`, ignoring case.
    pub async fn search(&self, author: &str) -> Result<Vec<Quote>> {
        let needle = author.to_lowercase();
        let matches: Vec<Quote> = self
            .load()
            .await?
            .into_iter()
            .filter(|quote| quote.author.to_lowercase().contains(&needle))
            .collect();

        if matches.is_empty() {
            return Err(DashboardError::NotFound(format!(
                "No quotes found for author '{}'",
                author
            )));
        }
        Ok(matches)
    }

    /// The quote at `index` in file order.
    pub async fn get(&self, index: usize) -> Result<Quote> {
        self.load()
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| DashboardError::NotFound(format!("Quote {} not found", index)))
    }

    async fn load(&self) -> Result<Vec<Quote>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(DashboardError::NotFound("Quotes file not found".to_string()));
            }
            Err(err) => {
                return Err(DashboardError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    err
                )));
            }
        };

        serde_json::from_str(&raw).map_err(|err| {
            DashboardError::Storage(format!("Failed to parse {}: {}", self.path.display(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const QUOTES: &str = r#"[
        {"Quote": "Simplicity is prerequisite for reliability.", "Author": "Edsger Dijkstra"},
        {"Quote": "Talk is cheap. Show me the code.", "Author": "Linus Torvalds"},
        {"Quote": "Premature optimization is the root of all evil.", "Author": "Donald Knuth"},
        {"Quote": "Anonymous wisdom."}
    ]"#;

    fn store_with(contents: &str) -> (TempDir, QuoteStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.json");
        std::fs::write(&path, contents).unwrap();
        (dir, QuoteStore::new(path))
    }

    #[tokio::test]
    async fn test_all_quotes() {
        let (_dir, store) = store_with(QUOTES);
        let quotes = store.all().await.unwrap();

        assert_eq!(quotes.len(), 4);
        assert_eq!(quotes[3].author, "");
    }

    #[tokio::test]
    async fn test_random_quote_comes_from_file() {
        let (_dir, store) = store_with(QUOTES);
        let all = store.all().await.unwrap();

        for _ in 0..10 {
            let quote = store.random().await.unwrap();
            assert!(all.contains(&quote));
        }
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (_dir, store) = store_with(QUOTES);

        let found = store.search("KNUTH").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].author, "Donald Knuth");

        assert!(matches!(
            store.search("shakespeare").await,
            Err(DashboardError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_by_index() {
        let (_dir, store) = store_with(QUOTES);

        assert_eq!(store.get(1).await.unwrap().author, "Linus Torvalds");
        assert!(matches!(store.get(4).await, Err(DashboardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = QuoteStore::new(dir.path().join("absent.json"));

        assert!(matches!(store.all().await, Err(DashboardError::NotFound(_))));
        assert!(matches!(store.random().await, Err(DashboardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_and_malformed_files() {
        let (_dir, empty) = store_with("[]");
        assert!(matches!(empty.all().await, Err(DashboardError::NotFound(_))));

        let (_dir, broken) = store_with("{not json");
        assert!(matches!(broken.all().await, Err(DashboardError::Storage(_))));
    }
}
