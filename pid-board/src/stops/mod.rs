//! Static stop database and its process-wide cache.
//!
//! Provides the list of stops with coordinates that the nearby search
//! runs over, loaded once from a local JSON file.

mod cache;
mod database;
mod error;

pub use cache::{DEFAULT_DATABASE_FILENAME, StopDatabaseCache};
pub use database::{Stop, StopDatabase, StopRecord};
pub use error::StopDatabaseError;
