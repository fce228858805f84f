//! Application state for the web layer.

use std::sync::Arc;

use crate::board::{BoardConfig, ConfiguredStops};
use crate::stops::StopDatabaseCache;

/// Shared application state.
///
/// Generic over the departure provider so handlers can run against a
/// stand-in in tests.
pub struct AppState<P> {
    /// Departure provider
    pub provider: Arc<P>,

    /// Stop database, loaded on first use
    pub stops: StopDatabaseCache,

    /// Board tuning
    pub config: Arc<BoardConfig>,

    /// Stops shown by the configured-stops boards
    pub configured: Arc<ConfiguredStops>,
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(
        provider: P,
        stops: StopDatabaseCache,
        config: BoardConfig,
        configured: ConfiguredStops,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            stops,
            config: Arc::new(config),
            configured: Arc::new(configured),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            stops: self.stops.clone(),
            config: Arc::clone(&self.config),
            configured: Arc::clone(&self.configured),
        }
    }
}
