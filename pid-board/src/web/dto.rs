//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Location;

/// Request for the nearby board.
#[derive(Debug, Deserialize)]
pub struct NearbyBoardRequest {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,

    /// Horizontal accuracy in metres, if the client knows it
    pub accuracy: Option<f64>,
}

impl NearbyBoardRequest {
    pub fn location(&self) -> Location {
        let location = Location::new(self.lat, self.lon);
        match self.accuracy {
            Some(metres) => location.with_accuracy(metres),
            None => location,
        }
    }
}

/// Configured-stops board layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One stop, full width
    #[default]
    Large,

    /// Two stops side by side
    Medium,
}

/// Request for the configured-stops board.
#[derive(Debug, Deserialize)]
pub struct StopsBoardRequest {
    /// Layout to render (defaults to large)
    pub layout: Option<Layout>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
