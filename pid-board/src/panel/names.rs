//! User-facing stop names and messages for the configured-stops boards.
//!
//! When a fetch does not produce a stop name, the header shows a short
//! status instead.

use crate::board::FetchOutcome;

/// Header name for the large layout.
pub fn large_stop_name(outcome: &FetchOutcome) -> String {
    if let FetchOutcome::Failed(_) = outcome {
        return "API Error".to_string();
    }

    match (outcome.stop_name(), outcome) {
        (Some(name), _) => name.to_string(),
        (None, FetchOutcome::NoFutureDepartures(_)) => "No Data".to_string(),
        (None, FetchOutcome::Departures(_)) => "Departures".to_string(),
        (None, _) => "No Stops Defined".to_string(),
    }
}

/// Message shown by the large layout when it has no rows.
pub fn large_empty_message(outcome: &FetchOutcome) -> &'static str {
    match outcome {
        FetchOutcome::NoFutureDepartures(_) => "No future departures.",
        FetchOutcome::Departures(_) => "No departures available.",
        FetchOutcome::Failed(_) => "API Error",
        FetchOutcome::NoDepartures(_) | FetchOutcome::NotQueried => "Could not load departures.",
    }
}

/// Header name for column `index` (0-based) of the medium layout.
pub fn medium_stop_name(outcome: &FetchOutcome, index: usize) -> String {
    let n = index + 1;

    match (outcome.stop_name(), outcome) {
        (_, FetchOutcome::Failed(_)) => format!("Stop {n} API Error"),
        (_, FetchOutcome::NotQueried) => format!("No ID Stop {n}"),
        (Some(name), _) => name.to_string(),
        (None, _) => format!("Stop {n} No Data"),
    }
}

/// Message shown by a medium column when it has no rows.
pub fn medium_column_message(outcome: &FetchOutcome, stop_name: &str) -> String {
    let short = short_stop_name(stop_name);

    match outcome {
        FetchOutcome::NoFutureDepartures(_) => format!("No future deps for {short}."),
        FetchOutcome::Failed(_) | FetchOutcome::NotQueried => stop_name.to_string(),
        FetchOutcome::NoDepartures(_) | FetchOutcome::Departures(_) => {
            format!("No departures for {short}.")
        }
    }
}

/// Stop name without a trailing parenthesised qualifier.
pub fn short_stop_name(name: &str) -> &str {
    name.split(" (").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Departure, RouteType, StopId};
    use crate::golemio::{GolemioError, NormalizedBoard};
    use chrono::DateTime;

    fn board(name: Option<&str>, departures: usize, raw_count: usize) -> NormalizedBoard {
        let t = DateTime::parse_from_rfc3339("2026-01-14T10:05:00+01:00").unwrap();
        NormalizedBoard {
            departures: (0..departures)
                .map(|i| {
                    Departure::new(
                        "136",
                        "Jižní Město",
                        t,
                        t,
                        format!("T{i}"),
                        StopId::parse("U1Z1").unwrap(),
                        RouteType::default(),
                    )
                })
                .collect(),
            primary_stop_name: name.map(String::from),
            raw_count,
            ..Default::default()
        }
    }

    #[test]
    fn large_names() {
        let failed = FetchOutcome::Failed(GolemioError::RateLimited);
        assert_eq!(large_stop_name(&failed), "API Error");
        assert_eq!(large_empty_message(&failed), "API Error");

        assert_eq!(large_stop_name(&FetchOutcome::NotQueried), "No Stops Defined");
        assert_eq!(
            large_stop_name(&FetchOutcome::NoDepartures(board(None, 0, 0))),
            "No Stops Defined"
        );
        assert_eq!(
            large_stop_name(&FetchOutcome::NoFutureDepartures(board(None, 0, 3))),
            "No Data"
        );
        assert_eq!(
            large_stop_name(&FetchOutcome::NoFutureDepartures(board(Some("Florenc"), 0, 3))),
            "Florenc"
        );
        assert_eq!(
            large_empty_message(&FetchOutcome::NoFutureDepartures(board(None, 0, 3))),
            "No future departures."
        );
    }

    #[test]
    fn medium_names() {
        let failed = FetchOutcome::Failed(GolemioError::Unauthorized);
        assert_eq!(medium_stop_name(&failed, 0), "Stop 1 API Error");
        assert_eq!(medium_stop_name(&FetchOutcome::NotQueried, 1), "No ID Stop 2");
        assert_eq!(
            medium_stop_name(&FetchOutcome::NoDepartures(board(None, 0, 0)), 1),
            "Stop 2 No Data"
        );
        assert_eq!(
            medium_stop_name(&FetchOutcome::Departures(board(Some("Anděl"), 1, 1)), 0),
            "Anděl"
        );
    }

    #[test]
    fn medium_messages() {
        let outcome = FetchOutcome::NoFutureDepartures(board(Some("Anděl (metro)"), 0, 2));
        assert_eq!(
            medium_column_message(&outcome, "Anděl (metro)"),
            "No future deps for Anděl."
        );

        let outcome = FetchOutcome::Failed(GolemioError::RateLimited);
        assert_eq!(
            medium_column_message(&outcome, "Stop 1 API Error"),
            "Stop 1 API Error"
        );

        let outcome = FetchOutcome::NoDepartures(board(Some("Florenc"), 0, 0));
        assert_eq!(
            medium_column_message(&outcome, "Florenc"),
            "No departures for Florenc."
        );
    }

    #[test]
    fn short_names() {
        assert_eq!(short_stop_name("Anděl (metro)"), "Anděl");
        assert_eq!(short_stop_name("Florenc"), "Florenc");
    }
}
