//! Per-trip deduplication.
//!
//! Querying both id forms of every nearby stop means one vehicle journey
//! can come back several times, once per stop it serves. Only the record
//! at the closest stop is kept.

use std::collections::HashMap;

use crate::domain::{Departure, StopId};

/// Keep one departure per trip: the one served at the nearest stop.
///
/// `distance_of` returns the walking distance to a stop, `None` when
/// unknown (treated as infinitely far). On a tie the first record seen
/// wins. The output lists trips in the order they were first seen.
pub fn dedupe_by_trip<F>(departures: Vec<Departure>, distance_of: F) -> Vec<Departure>
where
    F: Fn(&StopId) -> Option<f64>,
{
    let distance = |id: &StopId| distance_of(id).unwrap_or(f64::INFINITY);

    let mut slot_of: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<Departure> = Vec::new();

    for departure in departures {
        match slot_of.get(&departure.trip_id) {
            Some(&slot) => {
                if distance(&departure.served_stop) < distance(&kept[slot].served_stop) {
                    kept[slot] = departure;
                }
            }
            None => {
                slot_of.insert(departure.trip_id.clone(), kept.len());
                kept.push(departure);
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteType;
    use chrono::DateTime;

    fn dep(trip: &str, stop: &str) -> Departure {
        let t = DateTime::parse_from_rfc3339("2026-01-14T10:05:00+01:00").unwrap();
        Departure::new(
            "136",
            "Jižní Město",
            t,
            t,
            trip,
            StopId::parse(stop).unwrap(),
            RouteType::default(),
        )
    }

    fn distances(id: &StopId) -> Option<f64> {
        match id.base() {
            "NEAR" => Some(40.0),
            "FAR" => Some(200.0),
            "SAME" => Some(200.0),
            _ => None,
        }
    }

    #[test]
    fn keeps_smaller_distance() {
        let out = dedupe_by_trip(vec![dep("T1", "FAR"), dep("T1", "NEARP")], distances);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].served_stop.to_string(), "NEARP");
    }

    #[test]
    fn tie_keeps_first_seen() {
        let out = dedupe_by_trip(vec![dep("T1", "FAR"), dep("T1", "SAME")], distances);
        assert_eq!(out[0].served_stop.base(), "FAR");

        // Both unknown: also a tie
        let out = dedupe_by_trip(vec![dep("T1", "A"), dep("T1", "B")], distances);
        assert_eq!(out[0].served_stop.base(), "A");
    }

    #[test]
    fn known_beats_unknown() {
        let out = dedupe_by_trip(vec![dep("T1", "UNKNOWN"), dep("T1", "FAR")], distances);
        assert_eq!(out[0].served_stop.base(), "FAR");
    }

    #[test]
    fn distinct_trips_keep_first_seen_order() {
        let out = dedupe_by_trip(
            vec![dep("T2", "FAR"), dep("T1", "FAR"), dep("T2", "NEAR"), dep("T3", "FAR")],
            distances,
        );
        let trips: Vec<_> = out.iter().map(|d| d.trip_id.as_str()).collect();
        assert_eq!(trips, vec!["T2", "T1", "T3"]);
        assert_eq!(out[0].served_stop.base(), "NEAR");
    }

    #[test]
    fn empty_input() {
        assert!(dedupe_by_trip(Vec::new(), distances).is_empty());
    }
}
