//! Two-tier fetch: primary (ASW) ids with a secondary (CIS) fallback.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::golemio::{BoardQuery, DepartureProvider, GolemioError, NormalizedBoard, normalize_board};

/// Result of querying one id scheme.
#[derive(Debug)]
pub enum FetchOutcome {
    /// At least one current departure.
    Departures(NormalizedBoard),

    /// The provider returned departures, but all of them are gone or
    /// malformed.
    NoFutureDepartures(NormalizedBoard),

    /// The provider returned no departure records at all.
    NoDepartures(NormalizedBoard),

    /// The request itself failed.
    Failed(GolemioError),

    /// There were no ids to query.
    NotQueried,
}

impl FetchOutcome {
    pub fn has_departures(&self) -> bool {
        matches!(self, FetchOutcome::Departures(_))
    }

    /// Whether this tier produced nothing usable at all, not even a stop
    /// name.
    pub fn is_hard_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_) | FetchOutcome::NotQueried)
    }

    /// The normalized board, when the provider answered.
    pub fn board(&self) -> Option<&NormalizedBoard> {
        match self {
            FetchOutcome::Departures(b)
            | FetchOutcome::NoFutureDepartures(b)
            | FetchOutcome::NoDepartures(b) => Some(b),
            FetchOutcome::Failed(_) | FetchOutcome::NotQueried => None,
        }
    }

    /// Stop name reported by the provider, if any.
    pub fn stop_name(&self) -> Option<&str> {
        self.board().and_then(|b| b.primary_stop_name.as_deref())
    }

    fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Departures(_) => "departures",
            FetchOutcome::NoFutureDepartures(_) => "no future departures",
            FetchOutcome::NoDepartures(_) => "no departures",
            FetchOutcome::Failed(_) => "failed",
            FetchOutcome::NotQueried => "not queried",
        }
    }
}

/// Classify a normalized board.
pub fn classify(board: NormalizedBoard) -> FetchOutcome {
    if !board.departures.is_empty() {
        FetchOutcome::Departures(board)
    } else if board.raw_count > 0 {
        FetchOutcome::NoFutureDepartures(board)
    } else {
        FetchOutcome::NoDepartures(board)
    }
}

/// Query one tier and classify the answer.
pub async fn fetch_once<P: DepartureProvider>(
    provider: &P,
    query: &BoardQuery,
    now: DateTime<Utc>,
    tolerance: Duration,
) -> FetchOutcome {
    if query.is_empty() {
        return FetchOutcome::NotQueried;
    }

    match provider.fetch_board(query).await {
        Ok(response) => {
            let outcome = classify(normalize_board(&response, now, tolerance));
            debug!(scheme = %query.scheme, outcome = outcome.label(), "fetched board");
            outcome
        }
        Err(e) => {
            warn!(scheme = %query.scheme, ids = ?query.ids, error = %e, "departure fetch failed");
            FetchOutcome::Failed(e)
        }
    }
}

/// Pick between a primary outcome and the secondary tried after it.
///
/// The secondary wins if it has departures, or if the primary produced
/// nothing at all. Otherwise the primary is kept, so its stop name
/// survives an empty secondary.
pub fn select(primary: FetchOutcome, secondary: FetchOutcome) -> FetchOutcome {
    if secondary.has_departures() || primary.is_hard_failure() {
        secondary
    } else {
        primary
    }
}

/// Fetch with the primary query, falling back to the secondary.
///
/// The secondary is only queried when the primary has no departures and
/// the secondary has ids.
pub async fn fetch_with_fallback<P: DepartureProvider>(
    provider: &P,
    primary: &BoardQuery,
    secondary: &BoardQuery,
    now: DateTime<Utc>,
    tolerance: Duration,
) -> FetchOutcome {
    let first = fetch_once(provider, primary, now, tolerance).await;
    if first.has_departures() || secondary.is_empty() {
        return first;
    }

    info!(
        primary = %primary.scheme,
        secondary = %secondary.scheme,
        outcome = first.label(),
        "primary ids yielded nothing, trying fallback ids"
    );
    let second = fetch_once(provider, secondary, now, tolerance).await;

    select(first, second)
}
