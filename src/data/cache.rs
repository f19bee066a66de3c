use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tokio::task::spawn_blocking;

use crate::types::Review;

/// The full review dataset, shared by every scene
pub type Dataset = Arc<Vec<Review>>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode dataset {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset decode task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Loads the dataset once and hands out the same copy afterwards.
///
/// Only a successful load is memoized. A failed load returns the error to
/// the caller and leaves the cache empty, so the next request reads the file again.
pub struct DatasetCache {
    source: PathBuf,
    cell: OnceCell<Dataset>,
}

impl DatasetCache {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            cell: OnceCell::new(),
        }
    }

    /// Build a cache that is already filled, skipping the file entirely
    pub fn preloaded(reviews: Vec<Review>) -> Self {
        Self {
            source: PathBuf::new(),
            cell: OnceCell::new_with(Some(Arc::new(reviews))),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Return the dataset, reading it on first use.
    ///
    /// Concurrent callers wait on the same pending load.
    pub async fn get_or_fetch(&self) -> Result<Dataset, DataError> {
        let dataset = self
            .cell
            .get_or_try_init(|| load_reviews(self.source.clone()))
            .await?;
        Ok(Arc::clone(dataset))
    }
}

async fn load_reviews(path: PathBuf) -> Result<Dataset, DataError> {
    let bytes = tokio::fs::read(&path).await.map_err(|source| DataError::Io {
        path: path.clone(),
        source,
    })?;

    // Decoding ~130k reviews is CPU bound
    let decode_path = path.clone();
    let reviews = spawn_blocking(move || {
        serde_json::from_slice::<Vec<Review>>(&bytes).map_err(|source| DataError::Decode {
            path: decode_path,
            source,
        })
    })
    .await??;

    log::info!("Loaded {} reviews from {}", reviews.len(), path.display());
    Ok(Arc::new(reviews))
}
