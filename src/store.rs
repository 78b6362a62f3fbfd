//! Persistence for filtered news items.
//!
//! [`NewsStore`] is the write interface the fetch operation talks to: one
//! `transact` per accepted item. [`JsonLinesStore`] keeps every row as one
//! JSON object per line in `<dir>/news_items.jsonl`.

use crate::error::NewsError;
use crate::models::StoredNewsItem;
use crate::utils::ensure_writable_dir;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

pub const STORE_FILE: &str = "news_items.jsonl";

/// Something that can durably keep news items.
pub trait NewsStore {
    /// Write a single item.
    async fn transact(&self, item: &StoredNewsItem) -> Result<(), NewsError>;

    /// Every item written so far, oldest first.
    async fn list(&self) -> Result<Vec<StoredNewsItem>, NewsError>;
}

/// Append-only JSON Lines file store.
#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    /// Open (creating if needed) the store directory `dir`.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory holding the `news_items.jsonl` file
    ///
    /// # Returns
    ///
    /// A store appending to `<dir>/news_items.jsonl`.
    ///
    /// # Errors
    ///
    /// [`NewsError::Storage`] when the directory cannot be created or written.
    #[instrument(level = "info", skip_all, fields(dir = %dir.as_ref().display()))]
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, NewsError> {
        let dir = dir.as_ref();
        ensure_writable_dir(dir).await?;
        let path = dir.join(STORE_FILE);
        info!(path = %path.display(), "Opened news store");
        Ok(Self { path })
    }

    /// Path of the JSON Lines file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NewsStore for JsonLinesStore {
    #[instrument(level = "debug", skip_all, fields(id = %item.id))]
    async fn transact(&self, item: &StoredNewsItem) -> Result<(), NewsError> {
        let mut line = serde_json::to_string(item).map_err(io::Error::from)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        debug!(title = %item.title, "Stored news item");
        Ok(())
    }

    #[instrument(level = "debug", skip_all)]
    async fn list(&self) -> Result<Vec<StoredNewsItem>, NewsError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut items = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StoredNewsItem>(line) {
                Ok(item) => items.push(item),
                Err(e) => warn!(line = lineno + 1, error = %e, "Skipping unreadable store row"),
            }
        }
        Ok(items)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsCandidate;

    fn item(title: &str, category: &str) -> StoredNewsItem {
        StoredNewsItem::from_candidate(NewsCandidate::new(title, category))
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("store");
        let store = JsonLinesStore::open(&dir).await.unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.path(), dir.join(STORE_FILE));
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonLinesStore::open(tmp.path()).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transact_then_list_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonLinesStore::open(tmp.path()).await.unwrap();
        let a = item("City council approves new budget plan", "politics");
        let b = item("Local theater hosts jazz festival", "culture");
        store.transact(&a).await.unwrap();
        store.transact(&b).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![a, b]);
    }

    #[tokio::test]
    async fn test_rows_survive_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let a = item("Yankees clinch division", "sports");
        JsonLinesStore::open(tmp.path()).await.unwrap().transact(&a).await.unwrap();

        let reopened = JsonLinesStore::open(tmp.path()).await.unwrap();
        assert_eq!(reopened.list().await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn test_list_skips_corrupt_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonLinesStore::open(tmp.path()).await.unwrap();
        let a = item("Museum reopens after renovation", "culture");
        store.transact(&a).await.unwrap();
        tokio::fs::write(
            store.path(),
            format!("{}\nnot json\n\n", serde_json::to_string(&a).unwrap()),
        )
        .await
        .unwrap();

        assert_eq!(store.list().await.unwrap(), vec![a]);
    }
}
