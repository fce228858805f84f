//! Query id resolution for the nearby board.

use std::collections::HashSet;

use crate::nearby::NearbyStop;

/// Expand nearby stops into the ids to query.
///
/// Each stop contributes its base form and its platform form, so a query
/// sees departures filed under either. With `closest_only`, only the first
/// (closest) stop is used. Ids are unique, in first-seen order.
pub fn resolve_query_ids(stops: &[NearbyStop], closest_only: bool) -> Vec<String> {
    let candidates = if closest_only {
        &stops[..stops.len().min(1)]
    } else {
        stops
    };

    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(candidates.len() * 2);

    for stop in candidates {
        for id in [stop.id.base_form(), stop.id.platform_form()] {
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;
    use proptest::prelude::*;

    fn stop(id: &str, distance_m: f64) -> NearbyStop {
        NearbyStop {
            id: StopId::parse(id).unwrap(),
            name: id.to_string(),
            distance_m,
        }
    }

    #[test]
    fn emits_both_forms() {
        let ids = resolve_query_ids(&[stop("X", 40.0)], false);
        assert_eq!(ids, vec!["X", "XP"]);

        let ids = resolve_query_ids(&[stop("XP", 40.0)], false);
        assert_eq!(ids, vec!["X", "XP"]);
    }

    #[test]
    fn merges_shared_base() {
        let ids = resolve_query_ids(&[stop("U1Z1", 10.0), stop("U1Z1P", 12.0), stop("U2Z1", 30.0)], false);
        assert_eq!(ids, vec!["U1Z1", "U1Z1P", "U2Z1", "U2Z1P"]);
    }

    #[test]
    fn closest_only() {
        let ids = resolve_query_ids(&[stop("U1Z1", 10.0), stop("U2Z1", 30.0)], true);
        assert_eq!(ids, vec!["U1Z1", "U1Z1P"]);

        assert!(resolve_query_ids(&[], true).is_empty());
    }

    proptest! {
        #[test]
        fn both_forms_and_no_duplicates(
            raw in prop::collection::vec("[A-Z0-9]{0,5}[A-OQ-Z0-9]P?", 0..20),
            closest_only in any::<bool>(),
        ) {
            let stops: Vec<NearbyStop> = raw.iter().map(|id| stop(id, 1.0)).collect();
            let ids = resolve_query_ids(&stops, closest_only);

            let unique: HashSet<&String> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());

            let used = if closest_only { stops.len().min(1) } else { stops.len() };
            for s in &stops[..used] {
                prop_assert!(ids.contains(&s.id.base_form()));
                prop_assert!(ids.contains(&s.id.platform_form()));
            }
            prop_assert_eq!(ids.len(), 2 * stops[..used].iter().map(|s| s.id.base()).collect::<HashSet<_>>().len());
        }
    }
}
