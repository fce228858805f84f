//! Departure boards.
//!
//! This module turns provider answers into display panels:
//! - The nearby board searches the stop database around a location,
//!   queries every stop found in both id forms, merges duplicate trips,
//!   drops what the rider cannot walk to in time, and groups the rest by
//!   platform
//! - The configured-stops boards query fixed stops by ASW id with a CIS
//!   fallback, in a large (one stop) or medium (two stops) layout

mod catchable;
mod config;
mod dedupe;
mod error;
mod fallback;
mod order;
mod resolve;
mod run;
mod timetable;

pub use catchable::{WalkLabel, is_catchable, required_seconds, walk_label};
pub use config::{BoardConfig, ConfiguredStops, StopGroup, WalkingModel};
pub use dedupe::dedupe_by_trip;
pub use error::BoardError;
pub use fallback::{FetchOutcome, classify, fetch_once, fetch_with_fallback, select};
pub use order::{BoardPlan, PlatformBucket, plan_platforms, rows_for_platforms, sort_departures};
pub use resolve::resolve_query_ids;
pub use run::{run_large, run_medium, run_nearby};
pub use timetable::Timetable;
