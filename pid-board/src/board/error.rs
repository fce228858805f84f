//! Board run error types.

use std::sync::Arc;

use crate::golemio::GolemioError;
use crate::stops::StopDatabaseError;

/// Errors that end a nearby-board run early.
///
/// Each maps to a notice panel; none reaches the HTTP layer as a failure.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The stop database could not be loaded
    #[error(transparent)]
    StopDatabase(#[from] Arc<StopDatabaseError>),

    /// The stop database has no stops to search.
    ///
    /// A database file without stops already fails to load; this covers
    /// an empty database seeded through `StopDatabaseCache::insert`.
    #[error("no stops in the database")]
    NoStops,

    /// The location is not a valid coordinate pair
    #[error("invalid location: {lat}, {lon}")]
    InvalidLocation { lat: f64, lon: f64 },

    /// The departure fetch failed
    #[error(transparent)]
    Fetch(#[from] GolemioError),
}
