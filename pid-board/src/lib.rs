//! PID departure board server.
//!
//! Shows real-time departures of Prague Integrated Transport: either for
//! every stop within walking distance of a location, keeping only what the
//! rider can still catch, or for a fixed set of configured stops.

pub mod board;
pub mod config;
pub mod domain;
pub mod golemio;
pub mod nearby;
pub mod panel;
pub mod stops;
pub mod web;
