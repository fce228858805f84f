//! In-memory departure provider for tests.
//!
//! Serves canned responses keyed by id scheme and stop id, and records
//! every query it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::error::GolemioError;
use super::provider::{BoardQuery, DepartureProvider, IdScheme};
use super::types::BoardResponse;

#[derive(Debug, Clone)]
enum Reply {
    Board(BoardResponse),
    Failure(u16),
}

/// Mock provider answering from pre-registered responses.
///
/// A query is answered by the first of its ids that has a registered
/// reply for the query's scheme. Unknown ids fail with a 404.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    replies: HashMap<(IdScheme, String), Reply>,
    calls: Arc<Mutex<Vec<BoardQuery>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries for `id` with `response`.
    pub fn with_board(mut self, scheme: IdScheme, id: &str, response: BoardResponse) -> Self {
        self.replies
            .insert((scheme, id.to_string()), Reply::Board(response));
        self
    }

    /// Fail queries for `id` with an API error.
    pub fn with_failure(mut self, scheme: IdScheme, id: &str, status: u16) -> Self {
        self.replies
            .insert((scheme, id.to_string()), Reply::Failure(status));
        self
    }

    /// Every query received so far.
    pub fn calls(&self) -> Vec<BoardQuery> {
        self.calls.lock().unwrap().clone()
    }
}

impl DepartureProvider for MockProvider {
    async fn fetch_board(&self, query: &BoardQuery) -> Result<BoardResponse, GolemioError> {
        self.calls.lock().unwrap().push(query.clone());

        let reply = query
            .ids
            .iter()
            .find_map(|id| self.replies.get(&(query.scheme, id.clone())));

        match reply {
            Some(Reply::Board(board)) => Ok(board.clone()),
            Some(Reply::Failure(status)) => Err(GolemioError::Api {
                status: *status,
                message: "mock failure".to_string(),
            }),
            None => Err(GolemioError::Api {
                status: 404,
                message: format!("no mock data for {} ids {:?}", query.scheme, query.ids),
            }),
        }
    }
}
