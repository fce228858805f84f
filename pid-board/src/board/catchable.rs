//! Walking catchability.
//!
//! A departure is shown on the nearby board only if the rider can walk to
//! its stop before it leaves.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::Departure;

use super::config::WalkingModel;

/// Seconds needed to walk `distance_m` and board a vehicle.
///
/// Short walks (under the rounding floor) use the exact walking time;
/// longer ones are rounded up to whole minutes. Metro departures add the
/// metro buffer.
pub fn required_seconds(distance_m: f64, is_metro: bool, model: &WalkingModel) -> f64 {
    let walking = distance_m / model.speed_mps;

    let required = if distance_m < model.rounding_floor_m {
        walking
    } else {
        (walking / 60.0).ceil() * 60.0
    };

    let buffer = if is_metro {
        model.metro_buffer_secs
    } else {
        model.default_buffer_secs
    };

    required + buffer
}

/// Whether a departure can still be caught.
///
/// A departure at a stop of unknown distance is always catchable.
pub fn is_catchable(
    departure: &Departure,
    distance_m: Option<f64>,
    model: &WalkingModel,
    now: DateTime<Utc>,
) -> bool {
    let Some(distance_m) = distance_m else {
        return true;
    };

    let seconds_until = departure.time_until(now).num_milliseconds() as f64 / 1000.0;
    seconds_until >= required_seconds(distance_m, departure.route_type.is_metro(), model)
}

/// Walk indicator shown next to a platform header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkLabel {
    /// The stop is practically where the rider stands.
    Nearby,
    /// Walking time in whole minutes.
    Minutes(u32),
}

impl fmt::Display for WalkLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkLabel::Nearby => f.write_str("nearby"),
            WalkLabel::Minutes(m) => write!(f, "{m} min walk"),
        }
    }
}

/// Walk label for a stop at `distance_m` (unknown counts as zero).
pub fn walk_label(distance_m: Option<f64>, model: &WalkingModel) -> WalkLabel {
    if let Some(d) = distance_m {
        if d < model.nearby_label_under_m {
            return WalkLabel::Nearby;
        }
    }

    let walking_mins = distance_m.unwrap_or(0.0) / model.speed_mps / 60.0;
    let minutes = match distance_m {
        Some(d) if d >= model.rounding_floor_m => walking_mins.ceil(),
        _ => walking_mins.round().max(1.0),
    };

    WalkLabel::Minutes(minutes as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteType, StopId};
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-14T10:00:00+01:00")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn leaving_in(secs: i64, route_type: RouteType) -> Departure {
        let at = (now() + Duration::seconds(secs)).with_timezone(&FixedOffset::east_opt(3600).unwrap());
        Departure::new(
            "A",
            "Depo Hostivař",
            at,
            at,
            "T1",
            StopId::parse("U1Z1").unwrap(),
            route_type,
        )
    }

    #[test]
    fn required_time_rounds_above_floor() {
        let model = WalkingModel::default();

        // 100 m at 1.3 m/s is ~76.9 s, rounded up to 120 s
        assert_eq!(required_seconds(100.0, false, &model), 120.0);
        // Under the floor the exact time is used
        let exact = required_seconds(40.0, false, &model);
        assert!((exact - 40.0 / 1.3).abs() < 1e-9);
        // Metro adds 30 s
        assert_eq!(required_seconds(100.0, true, &model), 150.0);
    }

    #[test]
    fn catchability_boundary() {
        let model = WalkingModel::default();
        let bus = RouteType::default();

        assert!(!is_catchable(&leaving_in(119, bus), Some(100.0), &model, now()));
        assert!(is_catchable(&leaving_in(120, bus), Some(100.0), &model, now()));
    }

    #[test]
    fn metro_boundary() {
        let model = WalkingModel::default();

        assert!(!is_catchable(&leaving_in(149, RouteType::Metro), Some(100.0), &model, now()));
        assert!(is_catchable(&leaving_in(150, RouteType::Metro), Some(100.0), &model, now()));
    }

    #[test]
    fn unknown_distance_is_catchable() {
        let model = WalkingModel::default();
        assert!(is_catchable(&leaving_in(-20, RouteType::Tram), None, &model, now()));
    }

    #[test]
    fn short_walk_uses_exact_time() {
        let model = WalkingModel::default();
        let bus = RouteType::default();

        // 40 m is ~30.8 s
        assert!(!is_catchable(&leaving_in(30, bus), Some(40.0), &model, now()));
        assert!(is_catchable(&leaving_in(31, bus), Some(40.0), &model, now()));
    }

    #[test]
    fn walk_labels() {
        let model = WalkingModel::default();

        assert_eq!(walk_label(Some(12.0), &model), WalkLabel::Nearby);
        // 40 m → 0.51 min, rounds to 1
        assert_eq!(walk_label(Some(40.0), &model), WalkLabel::Minutes(1));
        // 100 m → 1.28 min, ceil to 2
        assert_eq!(walk_label(Some(100.0), &model), WalkLabel::Minutes(2));
        // 230 m → 2.95 min, ceil to 3
        assert_eq!(walk_label(Some(230.0), &model), WalkLabel::Minutes(3));
        assert_eq!(walk_label(None, &model), WalkLabel::Minutes(1));

        assert_eq!(WalkLabel::Nearby.to_string(), "nearby");
        assert_eq!(WalkLabel::Minutes(4).to_string(), "4 min walk");
    }
}
