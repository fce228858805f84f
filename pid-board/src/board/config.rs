//! Board configuration.

use chrono::Duration;

/// Walking assumptions used to decide whether a departure can be caught.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkingModel {
    /// Walking speed in metres per second.
    pub speed_mps: f64,

    /// Below this distance the walking time is used as-is; at or above it,
    /// it is rounded up to whole minutes.
    pub rounding_floor_m: f64,

    /// Extra time required for non-metro departures (seconds).
    pub default_buffer_secs: f64,

    /// Extra time required for metro departures (seconds).
    /// Covers escalators and platform access.
    pub metro_buffer_secs: f64,

    /// Stops closer than this are labelled "nearby" instead of a walk time.
    pub nearby_label_under_m: f64,
}

impl Default for WalkingModel {
    fn default() -> Self {
        Self {
            speed_mps: 1.3,
            rounding_floor_m: 50.0,
            default_buffer_secs: 0.0,
            metro_buffer_secs: 30.0,
            nearby_label_under_m: 30.0,
        }
    }
}

/// Configuration for building boards.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Nearby-stop search radius (metres).
    pub search_radius_m: f64,

    /// Added to the closest stop's distance when the radius finds nothing.
    pub fallback_margin_m: f64,

    /// Query only the single closest stop instead of every nearby stop.
    pub closest_stop_only: bool,

    pub walking: WalkingModel,

    /// How far in the past a departure may be and still be shown (seconds).
    pub past_tolerance_secs: i64,

    /// Ordered rows inspected to count platforms for the row budget.
    pub preview_rows: usize,

    /// Maximum platform sections on the nearby board.
    pub max_platforms: usize,

    /// Rows on the large configured-stops board.
    pub large_rows: usize,

    /// Rows per stop on the medium configured-stops board.
    pub medium_rows_per_stop: usize,

    /// Record limit for large-board queries.
    pub large_limit: u32,

    /// Record limit for medium-board queries.
    pub medium_limit: u32,

    /// Look-ahead window for configured-stops queries (minutes).
    pub configured_minutes_after: u32,

    /// Rows further away than this show a clock time on the nearby board
    /// (minutes).
    pub clock_after_mins: i64,
}

impl BoardConfig {
    /// Returns the past tolerance as a Duration.
    pub fn past_tolerance(&self) -> Duration {
        Duration::seconds(self.past_tolerance_secs)
    }

    pub fn with_search_radius(mut self, metres: f64) -> Self {
        self.search_radius_m = metres;
        self
    }

    pub fn with_closest_stop_only(mut self, closest_only: bool) -> Self {
        self.closest_stop_only = closest_only;
        self
    }

    pub fn with_walking(mut self, walking: WalkingModel) -> Self {
        self.walking = walking;
        self
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            search_radius_m: 250.0,
            fallback_margin_m: 50.0,
            closest_stop_only: false,
            walking: WalkingModel::default(),
            past_tolerance_secs: 30,
            preview_rows: 12,
            max_platforms: 5,
            large_rows: 10,
            medium_rows_per_stop: 6,
            large_limit: 20,
            medium_limit: 10,
            configured_minutes_after: 120,
            clock_after_mins: 10,
        }
    }
}

/// Primary and fallback ids for one logical stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopGroup {
    /// ASW ids, tried first.
    pub asw_ids: Vec<String>,

    /// CIS ids, tried when the ASW ids fail or yield nothing.
    pub cis_ids: Vec<String>,
}

impl StopGroup {
    pub fn new<A, C>(asw_ids: A, cis_ids: C) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            asw_ids: asw_ids.into_iter().map(Into::into).collect(),
            cis_ids: cis_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Stops shown by the configured-stops boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredStops {
    /// The single logical stop of the large layout.
    pub large: StopGroup,

    /// The two stops of the medium layout, side by side.
    pub medium: [StopGroup; 2],
}

impl Default for ConfiguredStops {
    fn default() -> Self {
        Self {
            large: StopGroup::new(Vec::<String>::new(), ["56793"]),
            medium: [
                StopGroup::new(["U337Z3P"], ["28003"]),
                StopGroup::new(Vec::<String>::new(), ["27883"]),
            ],
        }
    }
}
