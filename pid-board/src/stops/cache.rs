//! Read-through cache for the stop database.
//!
//! The database is loaded from disk on first use and then held for the
//! lifetime of the process. There is no expiry and no invalidation; a
//! failed load is not cached, so the next run tries again.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::info;

use super::database::StopDatabase;
use super::error::StopDatabaseError;

/// Default database file name, relative to the working directory.
pub const DEFAULT_DATABASE_FILENAME: &str = "pid_stops_db.json";

/// Read-through cache for the stop database file.
///
/// Held in the application state and passed explicitly to each run.
#[derive(Clone)]
pub struct StopDatabaseCache {
    path: PathBuf,
    entries: MokaCache<PathBuf, Arc<StopDatabase>>,
}

impl StopDatabaseCache {
    /// Create a cache that reads the database from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: MokaCache::builder().max_capacity(1).build(),
        }
    }

    /// Get the database, loading it on first use.
    ///
    /// Concurrent callers racing on the first load share a single read.
    pub async fn get(&self) -> Result<Arc<StopDatabase>, Arc<StopDatabaseError>> {
        let path = self.path.clone();
        self.entries
            .try_get_with(self.path.clone(), async move {
                let db = StopDatabase::load(&path).await?;
                info!(path = ?path, stops = db.len(), "loaded stop database");
                Ok::<_, StopDatabaseError>(Arc::new(db))
            })
            .await
    }

    /// Seed the cache with an already-built database.
    pub async fn insert(&self, db: StopDatabase) {
        self.entries.insert(self.path.clone(), Arc::new(db)).await;
    }

    /// The file this cache reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StopDatabaseCache {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_FILENAME)
    }
}
