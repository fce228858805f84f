//! Board runs.
//!
//! Each run takes the injected provider, stop cache and configuration,
//! performs the fetches for one refresh, and always ends in a [`Panel`].

use chrono::{DateTime, Utc};
use futures::future::join;
use tracing::{info, warn};

use crate::domain::{Departure, Location};
use crate::golemio::{BoardQuery, DepartureProvider, NormalizedBoard};
use crate::nearby::{DistanceIndex, find_with_fallback};
use crate::panel::{
    Countdown, Footer, Panel, Row, Section, SectionHeader, large_empty_message, large_stop_name,
    medium_column_message, medium_stop_name,
};
use crate::stops::{StopDatabase, StopDatabaseCache};

use super::catchable::{is_catchable, walk_label};
use super::config::{BoardConfig, StopGroup};
use super::dedupe::dedupe_by_trip;
use super::error::BoardError;
use super::fallback::{FetchOutcome, fetch_once, fetch_with_fallback};
use super::order::{PlatformBucket, plan_platforms, sort_departures};
use super::resolve::resolve_query_ids;
use super::timetable::Timetable;

/// Build the nearby board for a location.
pub async fn run_nearby<P: DepartureProvider>(
    provider: &P,
    stops: &StopDatabaseCache,
    config: &BoardConfig,
    location: Location,
    now: DateTime<Utc>,
) -> Panel {
    let footer = Footer::new(now).with_accuracy(location.horizontal_accuracy);

    match build_nearby(provider, stops, config, location, now, footer.clone()).await {
        Ok(panel) => panel,
        Err(e) => {
            warn!(error = %e, "nearby board run failed");
            nearby_error_panel(e, footer)
        }
    }
}

fn nearby_error_panel(err: BoardError, footer: Footer) -> Panel {
    match err {
        BoardError::NoStops => Panel::error(
            "No Stops Found",
            "Could not find any stops in the database.",
            footer,
        ),
        BoardError::Fetch(e) => Panel::error("API Error", e.to_string(), footer),
        e @ (BoardError::StopDatabase(_) | BoardError::InvalidLocation { .. }) => {
            Panel::error("Error", e.to_string(), footer)
        }
    }
}

async fn build_nearby<P: DepartureProvider>(
    provider: &P,
    stops: &StopDatabaseCache,
    config: &BoardConfig,
    location: Location,
    now: DateTime<Utc>,
    footer: Footer,
) -> Result<Panel, BoardError> {
    if !location.coordinates.is_valid() {
        return Err(BoardError::InvalidLocation {
            lat: location.latitude(),
            lon: location.longitude(),
        });
    }

    let db = stops.get().await?;
    let found = find_with_fallback(
        location.coordinates,
        &db,
        config.search_radius_m,
        config.fallback_margin_m,
    )
    .ok_or(BoardError::NoStops)?;

    let query = BoardQuery::asw(resolve_query_ids(&found.stops, config.closest_stop_only));

    let mut board = match fetch_once(provider, &query, now, config.past_tolerance()).await {
        FetchOutcome::Failed(e) => return Err(e.into()),
        FetchOutcome::NoDepartures(_) | FetchOutcome::NotQueried => {
            info!(stops = found.stops.len(), "nearby stops have no departures");
            return Ok(Panel::empty(
                Some("No Departures Found".to_string()),
                "Stops found, but they have no upcoming departures.",
                footer,
            ));
        }
        FetchOutcome::Departures(board) | FetchOutcome::NoFutureDepartures(board) => board,
    };

    let distances = &found.distances;
    let departures = dedupe_by_trip(std::mem::take(&mut board.departures), |id| {
        distances.get(id)
    });
    let timetable = Timetable::build(&departures);

    let mut catchable: Vec<Departure> = departures
        .into_iter()
        .filter(|d| is_catchable(d, distances.get(&d.served_stop), &config.walking, now))
        .collect();
    sort_departures(&mut catchable, |id| distances.get(id));

    let plan = plan_platforms(catchable, config.preview_rows, config.max_platforms);

    info!(
        stops = found.stops.len(),
        queried = query.ids.len(),
        platforms = plan.platforms.len(),
        rows = plan.row_count(),
        "built nearby board"
    );

    if plan.is_empty() {
        return Ok(Panel::empty(None, "No catchable departures found.", footer));
    }

    let sections = plan
        .platforms
        .iter()
        .map(|bucket| {
            platform_section(bucket, &board, &db, distances, &timetable, config, now)
        })
        .collect();

    Ok(Panel::Board {
        title: None,
        sections,
        footer,
    })
}

fn platform_section(
    bucket: &PlatformBucket,
    board: &NormalizedBoard,
    db: &StopDatabase,
    distances: &DistanceIndex,
    timetable: &Timetable,
    config: &BoardConfig,
    now: DateTime<Utc>,
) -> Section {
    let stop_name = board
        .stop_name(&bucket.platform)
        .or_else(|| db.name_of(&bucket.platform))
        .unwrap_or_default()
        .to_string();

    let platform_code = bucket
        .departures
        .first()
        .and_then(|d| d.platform_code.clone())
        .filter(|code| !code.is_empty());

    let header = SectionHeader {
        stop_name,
        platform_code,
        walk: Some(walk_label(distances.get(&bucket.platform), &config.walking).to_string()),
    };

    let rows = bucket
        .departures
        .iter()
        .map(|d| {
            Row::new(d, now, Some(config.clock_after_mins)).with_next(
                timetable
                    .next_after(d)
                    .map(|at| Countdown::teaser(at, now, config.clock_after_mins)),
            )
        })
        .collect();

    Section::with_rows(Some(header), rows)
}

/// Fetch one configured stop with the ASW→CIS fallback.
async fn fetch_group<P: DepartureProvider>(
    provider: &P,
    group: &StopGroup,
    limit: u32,
    config: &BoardConfig,
    now: DateTime<Utc>,
) -> FetchOutcome {
    let primary = BoardQuery::asw(&group.asw_ids)
        .with_limit(limit)
        .with_minutes_after(config.configured_minutes_after);
    let secondary = BoardQuery::cis(&group.cis_ids)
        .with_limit(limit)
        .with_minutes_after(config.configured_minutes_after);

    fetch_with_fallback(provider, &primary, &secondary, now, config.past_tolerance()).await
}

/// Build the large configured-stops board: one logical stop.
pub async fn run_large<P: DepartureProvider>(
    provider: &P,
    group: &StopGroup,
    config: &BoardConfig,
    now: DateTime<Utc>,
) -> Panel {
    let footer = Footer::new(now);
    let outcome = fetch_group(provider, group, config.large_limit, config, now).await;

    let stop_name = large_stop_name(&outcome);
    let message = large_empty_message(&outcome);

    match outcome {
        FetchOutcome::Failed(e) => Panel::error(stop_name, e.to_string(), footer),
        FetchOutcome::Departures(board) => {
            let rows: Vec<Row> = board
                .departures
                .iter()
                .take(config.large_rows)
                .map(|d| Row::new(d, now, None))
                .collect();
            info!(stop = %stop_name, rows = rows.len(), "built large board");

            Panel::Board {
                title: Some(stop_name),
                sections: vec![Section::with_rows(None, rows)],
                footer,
            }
        }
        _ => Panel::empty(Some(stop_name), message, footer),
    }
}

/// Build the medium configured-stops board: two stops side by side,
/// fetched concurrently.
pub async fn run_medium<P: DepartureProvider>(
    provider: &P,
    groups: &[StopGroup; 2],
    config: &BoardConfig,
    now: DateTime<Utc>,
) -> Panel {
    let (first, second) = join(
        fetch_group(provider, &groups[0], config.medium_limit, config, now),
        fetch_group(provider, &groups[1], config.medium_limit, config, now),
    )
    .await;

    let sections: Vec<Section> = [first, second]
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| medium_section(index, &outcome, config, now))
        .collect();

    info!(
        rows = sections.iter().map(|s| s.rows.len()).sum::<usize>(),
        "built medium board"
    );

    Panel::Board {
        title: None,
        sections,
        footer: Footer::new(now),
    }
}

fn medium_section(
    index: usize,
    outcome: &FetchOutcome,
    config: &BoardConfig,
    now: DateTime<Utc>,
) -> Section {
    let stop_name = medium_stop_name(outcome, index);
    let header = Some(SectionHeader {
        stop_name: stop_name.clone(),
        platform_code: None,
        walk: None,
    });

    match outcome {
        FetchOutcome::Departures(board) => Section::with_rows(
            header,
            board
                .departures
                .iter()
                .take(config.medium_rows_per_stop)
                .map(|d| Row::new(d, now, None))
                .collect(),
        ),
        _ => Section::with_message(header, medium_column_message(outcome, &stop_name)),
    }
}
