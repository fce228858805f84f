//! Conversion from Golemio DTOs to domain types.
//!
//! This is the validation boundary: raw records with missing or unparseable
//! fields are dropped here, one at a time, and never fail the whole board.

use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use tracing::debug;

use crate::domain::{Departure, InvalidStopId, RouteType, StopId};

use super::types::{BoardResponse, RawDeparture};

/// Line name shown when a record has no route.
const MISSING_LINE: &str = "N/A";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Timestamp is not a valid RFC 3339 instant
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Served stop id could not be parsed
    #[error(transparent)]
    InvalidStopId(#[from] InvalidStopId),
}

/// A provider response reduced to usable departures and stop metadata.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBoard {
    /// Future departures, sorted by predicted time.
    pub departures: Vec<Departure>,

    /// Base stop id → stop name, from the response's `stops` array.
    pub stop_names: HashMap<String, String>,

    /// Base stop id → platform code, from the response's `stops` array.
    pub platform_codes: HashMap<String, String>,

    /// Name of the first stop the response lists.
    pub primary_stop_name: Option<String>,

    /// Number of raw departure records in the response.
    pub raw_count: usize,
}

impl NormalizedBoard {
    /// Stop name for an id in either form.
    pub fn stop_name(&self, id: &StopId) -> Option<&str> {
        self.stop_names.get(id.base()).map(String::as_str)
    }

    /// Platform code for an id in either form.
    pub fn platform_code(&self, id: &StopId) -> Option<&str> {
        self.platform_codes.get(id.base()).map(String::as_str)
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, ConversionError> {
    DateTime::parse_from_rfc3339(s).map_err(|_| ConversionError::InvalidTimestamp(s.to_string()))
}

/// Convert one raw record, without the time-window filter.
pub fn convert_departure(raw: &RawDeparture) -> Result<Departure, ConversionError> {
    let timestamps = raw
        .departure_timestamp
        .as_ref()
        .ok_or(ConversionError::MissingField("departure_timestamp"))?;

    let scheduled_at = timestamps
        .scheduled
        .as_deref()
        .ok_or(ConversionError::MissingField("departure_timestamp.scheduled"))
        .and_then(parse_timestamp)?;

    let predicted_at = match timestamps.predicted.as_deref() {
        Some(s) => parse_timestamp(s)?,
        None => scheduled_at,
    };

    let stop = raw.stop.as_ref();
    let served_stop = StopId::parse(
        stop.and_then(|s| s.id.as_deref())
            .ok_or(ConversionError::MissingField("stop.id"))?,
    )?;

    let route = raw.route.as_ref();
    let line = route
        .and_then(|r| r.short_name.clone())
        .unwrap_or_else(|| MISSING_LINE.to_string());
    let route_type = route
        .and_then(|r| r.route_type)
        .map(RouteType::from_code)
        .unwrap_or_default();

    let trip = raw.trip.as_ref();
    let headsign = trip.and_then(|t| t.headsign.clone()).unwrap_or_default();

    // Records without a trip id must never merge with each other
    let trip_id = trip.and_then(|t| t.id.clone()).unwrap_or_else(|| {
        format!(
            "{served_stop}@{}#{line}",
            scheduled_at.to_rfc3339()
        )
    });

    let mut departure = Departure::new(
        line,
        headsign,
        scheduled_at,
        predicted_at,
        trip_id,
        served_stop,
        route_type,
    );
    departure.air_conditioned = trip.and_then(|t| t.is_air_conditioned) == Some(true);
    departure.wheelchair_accessible = trip.and_then(|t| t.is_wheelchair_accessible) == Some(true);
    departure.platform_code = stop.and_then(|s| s.platform_code.clone());

    Ok(departure)
}

/// Whether a departure is still worth showing at `now`.
///
/// Departures up to `tolerance` in the past are kept.
pub fn is_current(departure: &Departure, now: DateTime<Utc>, tolerance: Duration) -> bool {
    departure.time_until(now) > -tolerance
}

/// Normalize one raw record.
///
/// Returns `None` for records that are malformed or already gone.
pub fn normalize(raw: &RawDeparture, now: DateTime<Utc>, tolerance: Duration) -> Option<Departure> {
    match convert_departure(raw) {
        Ok(departure) if is_current(&departure, now, tolerance) => Some(departure),
        Ok(departure) => {
            debug!(trip = %departure.trip_id, "dropping past departure");
            None
        }
        Err(e) => {
            debug!(error = %e, "dropping malformed departure record");
            None
        }
    }
}

/// Normalize a whole response.
pub fn normalize_board(
    response: &BoardResponse,
    now: DateTime<Utc>,
    tolerance: Duration,
) -> NormalizedBoard {
    let mut stop_names = HashMap::new();
    let mut platform_codes = HashMap::new();
    let mut primary_stop_name = None;

    for stop in response.stops() {
        if primary_stop_name.is_none() {
            primary_stop_name = stop.stop_name.clone();
        }

        let Some(id) = stop.stop_id.as_deref().and_then(|s| StopId::parse(s).ok()) else {
            continue;
        };
        if let Some(name) = &stop.stop_name {
            stop_names
                .entry(id.base_form())
                .or_insert_with(|| name.clone());
        }
        if let Some(code) = &stop.platform_code {
            platform_codes
                .entry(id.base_form())
                .or_insert_with(|| code.clone());
        }
    }

    let raw = response.departures();
    let mut departures: Vec<Departure> = raw
        .iter()
        .filter_map(|r| normalize(r, now, tolerance))
        .collect();

    for departure in &mut departures {
        if departure.platform_code.is_none() {
            departure.platform_code = platform_codes.get(departure.served_stop.base()).cloned();
        }
    }

    departures.sort_by_key(|d| d.predicted_at);

    NormalizedBoard {
        departures,
        stop_names,
        platform_codes,
        primary_stop_name,
        raw_count: raw.len(),
    }
}
