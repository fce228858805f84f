//! Stop database error types.

use std::path::PathBuf;

/// Errors that can occur when loading the stop database.
///
/// All of these are fatal for a board run: without stops there is nothing
/// to search.
#[derive(Debug, thiserror::Error)]
pub enum StopDatabaseError {
    /// The database file could not be read
    #[error("stop database {path:?} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database file is not a JSON array of stop records
    #[error("stop database {path:?} is corrupt: {message}")]
    Json { path: PathBuf, message: String },

    /// The database parsed but holds no stops
    #[error("stop database contains no stops")]
    Empty,
}
