//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tracing::warn;

use crate::board::{run_large, run_medium, run_nearby};
use crate::golemio::DepartureProvider;
use crate::panel::Panel;

use super::dto::*;
use super::state::AppState;
use super::templates::PanelTemplate;

/// Create the application router.
pub fn create_router<P: DepartureProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/board/nearby", get(nearby_board::<P>))
        .route("/board/stops", get(stops_board::<P>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Render a panel as HTML or JSON, depending on the Accept header.
fn panel_response(headers: &HeaderMap, panel: Panel) -> Response {
    if accepts_html(headers) {
        Html(
            PanelTemplate::from(&panel)
                .render()
                .unwrap_or_else(|e| format!("Template error: {}", e)),
        )
        .into_response()
    } else {
        Json(panel).into_response()
    }
}

/// Departures around a location.
async fn nearby_board<P: DepartureProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Query(req): Query<NearbyBoardRequest>,
) -> Result<Response, AppError> {
    let location = req.location();
    if !location.coordinates.is_valid() {
        return Err(AppError::BadRequest {
            message: format!("Invalid location: {}, {}", req.lat, req.lon),
        });
    }

    let panel = run_nearby(
        state.provider.as_ref(),
        &state.stops,
        &state.config,
        location,
        Utc::now(),
    )
    .await;

    Ok(panel_response(&headers, panel))
}

/// Departures from the configured stops.
async fn stops_board<P: DepartureProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Query(req): Query<StopsBoardRequest>,
) -> Response {
    let now = Utc::now();
    let provider = state.provider.as_ref();

    let panel = match req.layout.unwrap_or_default() {
        Layout::Large => run_large(provider, &state.configured.large, &state.config, now).await,
        Layout::Medium => run_medium(provider, &state.configured.medium, &state.config, now).await,
    };

    panel_response(&headers, panel)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardConfig, ConfiguredStops};
    use crate::golemio::mock::MockProvider;
    use crate::golemio::{BoardResponse, IdScheme, RawStop};
    use crate::stops::StopDatabaseCache;
    use axum::body::to_bytes;
    use axum::http::HeaderValue;

    fn state(provider: MockProvider) -> AppState<MockProvider> {
        AppState::new(
            provider,
            StopDatabaseCache::new("/nonexistent/pid_stops_db.json"),
            BoardConfig::default(),
            ConfiguredStops::default(),
        )
    }

    fn html_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        headers
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn html_detection() {
        assert!(accepts_html(&html_headers()));
        assert!(!accepts_html(&HeaderMap::new()));
    }

    #[tokio::test]
    async fn nearby_rejects_bad_coordinates() {
        let result = nearby_board(
            State(state(MockProvider::new())),
            HeaderMap::new(),
            Query(NearbyBoardRequest {
                lat: 123.0,
                lon: 14.4,
                accuracy: None,
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn nearby_without_database_is_an_error_panel() {
        let response = nearby_board(
            State(state(MockProvider::new())),
            HeaderMap::new(),
            Query(NearbyBoardRequest {
                lat: 50.0706,
                lon: 14.4036,
                accuracy: Some(5.0),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["title"], "Error");
        assert_eq!(json["footer"]["gps_accuracy_m"], 5);
    }

    #[tokio::test]
    async fn stops_board_layouts() {
        let provider = MockProvider::new().with_board(
            IdScheme::Cis,
            "56793",
            BoardResponse {
                departures: Some(vec![]),
                stops: Some(vec![RawStop {
                    stop_id: Some("U1072Z1P".into()),
                    stop_name: Some("Palmovka".into()),
                    platform_code: None,
                }]),
            },
        );
        let state = state(provider);

        let response = stops_board(
            State(state.clone()),
            HeaderMap::new(),
            Query(StopsBoardRequest { layout: None }),
        )
        .await;
        let json = body_json(response).await;
        assert_eq!(json["status"], "empty");
        assert_eq!(json["title"], "Palmovka");
        assert_eq!(json["message"], "Could not load departures.");

        // Every medium id is unknown to the mock
        let response = stops_board(
            State(state),
            html_headers(),
            Query(StopsBoardRequest {
                layout: Some(Layout::Medium),
            }),
        )
        .await;
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Stop 1 API Error"));
        assert!(html.contains("Stop 2 API Error"));
    }
}
