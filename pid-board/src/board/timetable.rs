//! Per-line, per-platform timetable for the "next departure" teaser.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::domain::{Departure, StopId};

/// Predicted times of every departure, grouped by line and canonical
/// platform.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    times: HashMap<(String, StopId), Vec<DateTime<FixedOffset>>>,
}

impl Timetable {
    /// Build from the deduplicated departures, before the catchability
    /// filter, so a teaser can point at a departure too close to catch
    /// the one after it.
    pub fn build(departures: &[Departure]) -> Self {
        let mut times: HashMap<(String, StopId), Vec<DateTime<FixedOffset>>> = HashMap::new();

        for d in departures {
            times
                .entry((d.line.clone(), d.platform_key()))
                .or_default()
                .push(d.predicted_at);
        }
        for list in times.values_mut() {
            list.sort();
        }

        Self { times }
    }

    /// The first departure of the same line from the same platform
    /// strictly later than `departure`, if there is one.
    pub fn next_after(&self, departure: &Departure) -> Option<DateTime<FixedOffset>> {
        self.times
            .get(&(departure.line.clone(), departure.platform_key()))?
            .iter()
            .find(|t| **t > departure.predicted_at)
            .copied()
    }
}
