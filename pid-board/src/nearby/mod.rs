//! Nearby-stop search.
//!
//! Finds the stops within walking range of a location. The search runs in
//! two stages: a cheap lat/lon bounding box discards most of the database,
//! then the exact haversine distance drops the box corners that lie
//! outside the true radius. The box is computed on the sphere, so it holds
//! for any radius, near the poles, and across the antimeridian.
//!
//! Distances are indexed by base stop id, so the base and platform forms of
//! one physical stop always report the same distance.

use std::collections::HashMap;

use crate::domain::{Coordinates, StopId};
use crate::stops::StopDatabase;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Slack added to the bounding box, in degrees, to absorb rounding.
const BOX_SLACK_DEG: f64 = 1e-5;

/// Default margin added to the closest stop's distance when the radius
/// search comes back empty.
pub const DEFAULT_FALLBACK_MARGIN_M: f64 = 50.0;

/// Great-circle distance between two points, in metres.
pub fn haversine_distance(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// A stop found near the search location.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStop {
    pub id: StopId,
    pub name: String,
    pub distance_m: f64,
}

/// Distance from the search location, keyed by base stop id.
#[derive(Debug, Clone, Default)]
pub struct DistanceIndex {
    distances: HashMap<String, f64>,
}

impl DistanceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a distance for a stop.
    ///
    /// When several records share a base id, the nearest one wins.
    pub fn insert(&mut self, id: &StopId, distance_m: f64) {
        self.distances
            .entry(id.base_form())
            .and_modify(|d| *d = d.min(distance_m))
            .or_insert(distance_m);
    }

    /// Distance to a stop, in either id form.
    pub fn get(&self, id: &StopId) -> Option<f64> {
        self.distances.get(id.base()).copied()
    }

    /// Distance to a stop given as a raw id string.
    pub fn get_raw(&self, id: &str) -> Option<f64> {
        StopId::parse(id).ok().and_then(|id| self.get(&id))
    }

    /// Distance used for ordering: unknown stops sort last.
    pub fn sort_key(&self, id: &StopId) -> f64 {
        self.get(id).unwrap_or(f64::INFINITY)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Result of a radius search.
#[derive(Debug, Clone, Default)]
pub struct NearbyStops {
    /// Stops within the radius, nearest first.
    pub stops: Vec<NearbyStop>,

    /// Base id → distance for every stop in `stops`.
    pub distances: DistanceIndex,
}

impl NearbyStops {
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The nearest stop, if any.
    pub fn closest(&self) -> Option<&NearbyStop> {
        self.stops.first()
    }
}

/// Latitude/longitude window that contains every point within `radius_m`.
///
/// `lon_delta` is `None` when the circle reaches a pole, in which case
/// every longitude is inside.
#[derive(Debug, Clone, Copy)]
struct BoundingBox {
    center_lon: f64,
    min_lat: f64,
    max_lat: f64,
    lon_delta: Option<f64>,
}

impl BoundingBox {
    /// `None` when the radius spans a hemisphere or more, where a box
    /// would not discard anything.
    fn around(center: Coordinates, radius_m: f64) -> Option<Self> {
        let angular = radius_m / EARTH_RADIUS_M;
        if !angular.is_finite() || angular >= std::f64::consts::FRAC_PI_2 {
            return None;
        }

        let lat_delta = angular.to_degrees() + BOX_SLACK_DEG;
        let min_lat = center.lat - lat_delta;
        let max_lat = center.lat + lat_delta;

        let lon_delta = if min_lat <= -90.0 || max_lat >= 90.0 {
            None
        } else {
            let ratio = angular.sin() / center.lat.to_radians().cos();
            (ratio < 1.0).then(|| ratio.asin().to_degrees() + BOX_SLACK_DEG)
        };

        Some(Self {
            center_lon: center.lon,
            min_lat,
            max_lat,
            lon_delta,
        })
    }

    fn contains(&self, p: Coordinates) -> bool {
        if p.lat < self.min_lat || p.lat > self.max_lat {
            return false;
        }

        match self.lon_delta {
            None => true,
            Some(delta) => {
                // Shortest way round, in [0, 180]
                let d = (p.lon - self.center_lon).rem_euclid(360.0);
                d.min(360.0 - d) <= delta
            }
        }
    }
}

/// Find every stop within `radius_m` of `location`, nearest first.
pub fn find_nearby(location: Coordinates, db: &StopDatabase, radius_m: f64) -> NearbyStops {
    let bbox = BoundingBox::around(location, radius_m);

    let mut stops = Vec::new();
    let mut distances = DistanceIndex::new();

    let candidates = db
        .iter()
        .filter(|s| bbox.is_none_or(|b| b.contains(s.coordinates)));

    for stop in candidates {
        let distance_m = haversine_distance(location, stop.coordinates);
        if distance_m <= radius_m {
            distances.insert(&stop.id, distance_m);
            stops.push(NearbyStop {
                id: stop.id.clone(),
                name: stop.name.clone(),
                distance_m,
            });
        }
    }

    stops.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

    NearbyStops { stops, distances }
}

/// Find the single closest stop by linear scan.
///
/// Returns `None` only if the database is empty.
pub fn find_closest(location: Coordinates, db: &StopDatabase) -> Option<NearbyStop> {
    db.iter()
        .map(|stop| NearbyStop {
            id: stop.id.clone(),
            name: stop.name.clone(),
            distance_m: haversine_distance(location, stop.coordinates),
        })
        .min_by(|a, b| a.distance_m.total_cmp(&b.distance_m))
}

/// Radius search that falls back to the closest stop.
///
/// If nothing lies within `radius_m`, the search is repeated with the
/// closest stop's distance plus `margin_m`, which always yields at least
/// that stop. Returns `None` only if the database is empty.
pub fn find_with_fallback(
    location: Coordinates,
    db: &StopDatabase,
    radius_m: f64,
    margin_m: f64,
) -> Option<NearbyStops> {
    let nearby = find_nearby(location, db, radius_m);
    if !nearby.is_empty() {
        return Some(nearby);
    }

    let closest = find_closest(location, db)?;
    tracing::debug!(
        radius_m,
        closest = %closest.id,
        closest_m = closest.distance_m,
        "no stops within radius, widening search"
    );

    let widened = find_nearby(location, db, closest.distance_m + margin_m);
    if !widened.is_empty() {
        return Some(widened);
    }

    tracing::debug!(closest = %closest.id, "widened search came back empty, using closest stop");
    let mut distances = DistanceIndex::new();
    distances.insert(&closest.id, closest.distance_m);

    Some(NearbyStops {
        stops: vec![closest],
        distances,
    })
}
