//! Canonical departure records.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use super::StopId;

/// Delays up to this many seconds are treated as rounding noise.
const DELAY_THRESHOLD_SECS: i64 = 59;

/// Kind of vehicle serving a route.
///
/// Codes follow the GTFS `route_type` enumeration as reported by the
/// departure-board API. Everything that is neither tram nor metro is
/// handled like a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    Tram,
    Metro,
    Other(i64),
}

impl RouteType {
    /// Map a GTFS route type code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => RouteType::Tram,
            1 => RouteType::Metro,
            other => RouteType::Other(other),
        }
    }

    /// The GTFS code for this route type.
    pub fn code(&self) -> i64 {
        match self {
            RouteType::Tram => 0,
            RouteType::Metro => 1,
            RouteType::Other(code) => *code,
        }
    }

    pub fn is_metro(&self) -> bool {
        matches!(self, RouteType::Metro)
    }
}

impl Default for RouteType {
    /// Unknown routes are treated as buses.
    fn default() -> Self {
        RouteType::Other(3)
    }
}

/// A validated departure, normalized from the provider's raw record.
///
/// Both timestamps keep the offset the provider reported them in, so
/// clock times render in the stop's local time. Comparisons between
/// departures are by instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// Route short name (e.g. "136", "A", "S9").
    pub line: String,

    /// Trip headsign (destination shown on the vehicle).
    pub headsign: String,

    /// Timetabled departure.
    pub scheduled_at: DateTime<FixedOffset>,

    /// Real-time prediction; equals `scheduled_at` without live data.
    pub predicted_at: DateTime<FixedOffset>,

    /// Whether the delay exceeds the one-minute threshold.
    pub is_delayed: bool,

    /// Delay in whole seconds, never negative.
    pub delay_secs: i64,

    pub air_conditioned: bool,

    pub wheelchair_accessible: bool,

    /// Trip identifier; unique per vehicle journey.
    pub trip_id: String,

    /// The stop id this record was reported for.
    pub served_stop: StopId,

    pub route_type: RouteType,

    /// Platform code shown at the stop (e.g. "D", "2").
    pub platform_code: Option<String>,
}

impl Departure {
    /// Build a departure, deriving the delay fields from the two timestamps.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        line: impl Into<String>,
        headsign: impl Into<String>,
        scheduled_at: DateTime<FixedOffset>,
        predicted_at: DateTime<FixedOffset>,
        trip_id: impl Into<String>,
        served_stop: StopId,
        route_type: RouteType,
    ) -> Self {
        let (is_delayed, delay_secs) = delay_between(scheduled_at, predicted_at);

        Self {
            line: line.into(),
            headsign: headsign.into(),
            scheduled_at,
            predicted_at,
            is_delayed,
            delay_secs,
            air_conditioned: false,
            wheelchair_accessible: false,
            trip_id: trip_id.into(),
            served_stop,
            route_type,
            platform_code: None,
        }
    }

    /// Time remaining until the predicted departure (negative once gone).
    pub fn time_until(&self, now: DateTime<Utc>) -> Duration {
        self.predicted_at.signed_duration_since(now)
    }

    /// Whole minutes of delay, rounded to nearest.
    pub fn delay_minutes(&self) -> i64 {
        (self.delay_secs + 30) / 60
    }

    /// Canonical platform key of the serving stop.
    pub fn platform_key(&self) -> StopId {
        self.served_stop.canonical()
    }
}

/// Compute `(is_delayed, delay_secs)` for a scheduled/predicted pair.
///
/// The flag uses the raw difference against a 59 s threshold; the seconds
/// are rounded to nearest and clamped at zero for early predictions.
pub fn delay_between(
    scheduled_at: DateTime<FixedOffset>,
    predicted_at: DateTime<FixedOffset>,
) -> (bool, i64) {
    let delay = predicted_at.signed_duration_since(scheduled_at);
    let delay_ms = delay.num_milliseconds();

    let is_delayed = delay_ms > DELAY_THRESHOLD_SECS * 1000;
    let delay_secs = if delay_ms > 0 {
        (delay_ms + 500) / 1000
    } else {
        0
    };

    (is_delayed, delay_secs)
}
