//! Departure rows.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::domain::{Departure, RouteType};

/// Time-until label for a departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Countdown {
    /// Leaving within ten seconds.
    Now,
    /// Leaving within a minute.
    UnderMinute,
    /// Whole minutes until departure, rounded down.
    Minutes(i64),
    /// Local clock time ("HH:MM") for departures further out.
    Clock(String),
}

impl Countdown {
    /// Countdown from `now` to `at`.
    ///
    /// With `clock_after`, departures more than that many minutes away
    /// show their clock time instead.
    pub fn until(at: DateTime<FixedOffset>, now: DateTime<Utc>, clock_after: Option<i64>) -> Self {
        let millis = at.signed_duration_since(now).num_milliseconds();

        if millis <= 10_000 {
            return Countdown::Now;
        }
        if millis < 60_000 {
            return Countdown::UnderMinute;
        }

        let minutes = millis.div_euclid(60_000);
        match clock_after {
            Some(limit) if minutes > limit => Countdown::Clock(at.format("%H:%M").to_string()),
            _ => Countdown::Minutes(minutes),
        }
    }

    /// Teaser for the following departure: whole minutes, or the clock
    /// time when further than `clock_after` minutes away.
    pub fn teaser(at: DateTime<FixedOffset>, now: DateTime<Utc>, clock_after: i64) -> Self {
        let minutes = at
            .signed_duration_since(now)
            .num_milliseconds()
            .div_euclid(60_000);

        if minutes > clock_after {
            Countdown::Clock(at.format("%H:%M").to_string())
        } else {
            Countdown::Minutes(minutes)
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Now => f.write_str("Now"),
            Countdown::UnderMinute => f.write_str("< 1 min"),
            Countdown::Minutes(m) => write!(f, "{m} min"),
            Countdown::Clock(clock) => f.write_str(clock),
        }
    }
}

/// Line badge style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    MetroA,
    MetroB,
    MetroC,
    Tram,
    Bus,
}

impl Badge {
    pub fn for_line(route_type: RouteType, line: &str) -> Self {
        match (route_type, line) {
            (RouteType::Metro, "A") => Badge::MetroA,
            (RouteType::Metro, "B") => Badge::MetroB,
            (RouteType::Metro, "C") => Badge::MetroC,
            (RouteType::Tram, _) => Badge::Tram,
            _ => Badge::Bus,
        }
    }

    /// CSS class name.
    pub fn class(&self) -> &'static str {
        match self {
            Badge::MetroA => "metro-a",
            Badge::MetroB => "metro-b",
            Badge::MetroC => "metro-c",
            Badge::Tram => "tram",
            Badge::Bus => "bus",
        }
    }
}

/// One departure as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub line: String,
    pub badge: Badge,
    pub headsign: String,
    pub countdown: Countdown,
    pub is_delayed: bool,

    /// Delay in whole minutes, only when delayed.
    pub delay_minutes: Option<i64>,

    pub air_conditioned: bool,
    pub wheelchair_accessible: bool,

    /// Next departure of the same line from the same platform.
    pub next: Option<Countdown>,
}

impl Row {
    pub fn new(departure: &Departure, now: DateTime<Utc>, clock_after: Option<i64>) -> Self {
        let delay_minutes = departure.delay_minutes();

        Self {
            line: departure.line.clone(),
            badge: Badge::for_line(departure.route_type, &departure.line),
            headsign: departure.headsign.clone(),
            countdown: Countdown::until(departure.predicted_at, now, clock_after),
            is_delayed: departure.is_delayed,
            delay_minutes: (departure.is_delayed && delay_minutes > 0).then_some(delay_minutes),
            air_conditioned: departure.air_conditioned,
            wheelchair_accessible: departure.wheelchair_accessible,
            next: None,
        }
    }

    pub fn with_next(mut self, next: Option<Countdown>) -> Self {
        self.next = next;
        self
    }
}
