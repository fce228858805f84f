//! Golemio departure-board client.
//!
//! This module provides an HTTP client for the Golemio open-data API,
//! which serves real-time departures for Prague Integrated Transport.
//!
//! Key characteristics of the departure-board endpoint:
//! - Stops can be queried by ASW id (`ids[]`) or CIS id (`cisIds[]`)
//! - ASW ids come in a base form and a platform form (base + `P`); a query
//!   should carry both to see every departure
//! - Timestamps are RFC 3339 with the Prague offset
//! - Records are sparse: any field may be missing

mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod mock;
mod provider;
mod types;

pub use client::{GolemioClient, GolemioConfig};
pub use convert::{
    ConversionError, NormalizedBoard, convert_departure, is_current, normalize, normalize_board,
};
pub use error::GolemioError;
pub use provider::{BoardQuery, DepartureProvider, IdScheme};
pub use types::{BoardResponse, RawDeparture, RawRoute, RawStop, RawStopRef, RawTimestamps, RawTrip};
