//! Ordering and platform grouping for the nearby board.
//!
//! Departures are ordered into one global stream, a row budget is chosen
//! from how many platforms the head of the stream touches, and the
//! selected rows are grouped under one header per canonical platform.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::{Departure, StopId};

/// Sort departures by predicted time, then by distance to the serving
/// platform (unknown last), then by line name.
pub fn sort_departures<F>(departures: &mut [Departure], distance_of: F)
where
    F: Fn(&StopId) -> Option<f64>,
{
    let distance = |d: &Departure| distance_of(&d.platform_key()).unwrap_or(f64::INFINITY);

    departures.sort_by(|a, b| {
        a.predicted_at
            .cmp(&b.predicted_at)
            .then_with(|| distance(a).total_cmp(&distance(b)))
            .then_with(|| a.line.cmp(&b.line))
    });
}

/// Row budget for a board showing `platforms` platform sections.
///
/// Each extra header takes the space of a row.
pub fn rows_for_platforms(platforms: usize) -> usize {
    match platforms {
        0 | 1 => 11,
        2 => 10,
        3 => 9,
        4 => 8,
        _ => 7,
    }
}

/// Departures grouped under one canonical platform.
#[derive(Debug, Clone)]
pub struct PlatformBucket {
    /// Canonical (platform-form) stop id.
    pub platform: StopId,

    /// Departures at this platform, in stream order.
    pub departures: Vec<Departure>,
}

impl PlatformBucket {
    fn earliest(&self) -> Option<&Departure> {
        self.departures.first()
    }
}

/// The selected rows, grouped for display.
#[derive(Debug, Clone, Default)]
pub struct BoardPlan {
    /// Row budget chosen for this board.
    pub rows: usize,

    /// Platform sections, earliest first.
    pub platforms: Vec<PlatformBucket>,
}

impl BoardPlan {
    /// Total rows across all sections.
    pub fn row_count(&self) -> usize {
        self.platforms.iter().map(|p| p.departures.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

/// Group departures by canonical platform, keeping first-seen order.
fn bucket_by_platform(departures: Vec<Departure>) -> Vec<PlatformBucket> {
    let mut index: HashMap<StopId, usize> = HashMap::new();
    let mut buckets: Vec<PlatformBucket> = Vec::new();

    for departure in departures {
        let key = departure.platform_key();
        match index.get(&key) {
            Some(&i) => buckets[i].departures.push(departure),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(PlatformBucket {
                    platform: key,
                    departures: vec![departure],
                });
            }
        }
    }

    buckets
}

/// Select and group rows from an ordered stream.
///
/// The number of distinct platforms in the first `preview_rows` picks the
/// row budget; the first `rows` departures are then bucketed, buckets are
/// ordered by their earliest departure, and at most `max_platforms` are
/// kept.
pub fn plan_platforms(ordered: Vec<Departure>, preview_rows: usize, max_platforms: usize) -> BoardPlan {
    let preview_platforms = bucket_by_platform(
        ordered.iter().take(preview_rows).cloned().collect(),
    )
    .len();
    let rows = rows_for_platforms(preview_platforms);

    let mut platforms = bucket_by_platform(ordered.into_iter().take(rows).collect());

    platforms.sort_by(|a, b| match (a.earliest(), b.earliest()) {
        (Some(a), Some(b)) => a.predicted_at.cmp(&b.predicted_at),
        _ => Ordering::Equal,
    });
    platforms.truncate(max_platforms);

    BoardPlan { rows, platforms }
}
