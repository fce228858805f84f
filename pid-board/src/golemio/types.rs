//! Golemio departure-board response DTOs.
//!
//! These types map directly to the `/v2/pid/departureboards` JSON response.
//! Every field is optional: the API omits fields freely, and a record with
//! holes is dropped during normalization rather than failing the whole
//! response.

use serde::{Deserialize, Serialize};

/// Response from `GET /v2/pid/departureboards`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoardResponse {
    /// Departures across every queried stop.
    #[serde(default)]
    pub departures: Option<Vec<RawDeparture>>,

    /// The stops the query matched, in the order the API reports them.
    #[serde(default)]
    pub stops: Option<Vec<RawStop>>,
}

impl BoardResponse {
    /// Raw departure records, or an empty slice when the array is absent.
    pub fn departures(&self) -> &[RawDeparture] {
        self.departures.as_deref().unwrap_or(&[])
    }

    /// Matched stops, or an empty slice when the array is absent.
    pub fn stops(&self) -> &[RawStop] {
        self.stops.as_deref().unwrap_or(&[])
    }
}

/// A single departure record as reported by the API.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDeparture {
    pub route: Option<RawRoute>,
    pub trip: Option<RawTrip>,
    pub stop: Option<RawStopRef>,
    pub departure_timestamp: Option<RawTimestamps>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRoute {
    /// Public line name (e.g. "136", "A").
    pub short_name: Option<String>,

    /// GTFS route type code.
    #[serde(rename = "type")]
    pub route_type: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTrip {
    pub id: Option<String>,
    pub headsign: Option<String>,
    pub is_air_conditioned: Option<bool>,
    pub is_wheelchair_accessible: Option<bool>,
}

/// The stop a departure record was reported for.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStopRef {
    pub id: Option<String>,
    pub platform_code: Option<String>,
}

/// RFC 3339 timestamps, with the local offset included.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTimestamps {
    pub scheduled: Option<String>,
    pub predicted: Option<String>,
}

/// A matched stop from the `stops` array.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStop {
    pub stop_id: Option<String>,
    pub stop_name: Option<String>,
    pub platform_code: Option<String>,
}
