//! Departure provider abstraction.

use std::fmt;
use std::future::Future;

use super::error::GolemioError;
use super::types::BoardResponse;

/// Which id scheme a query uses.
///
/// Golemio accepts the same stops under two numbering schemes; ASW ids are
/// preferred and CIS ids are the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdScheme {
    Asw,
    Cis,
}

impl IdScheme {
    /// Query parameter name, repeated once per id.
    pub fn param(&self) -> &'static str {
        match self {
            IdScheme::Asw => "ids[]",
            IdScheme::Cis => "cisIds[]",
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdScheme::Asw => f.write_str("ASW"),
            IdScheme::Cis => f.write_str("CIS"),
        }
    }
}

/// One departure-board request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardQuery {
    pub scheme: IdScheme,
    pub ids: Vec<String>,

    /// Overrides the configured record limit.
    pub limit: Option<u32>,

    /// Overrides the configured look-ahead window.
    pub minutes_after: Option<u32>,
}

impl BoardQuery {
    /// Build a query, dropping blank ids.
    pub fn new<I, S>(scheme: IdScheme, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = ids
            .into_iter()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        Self {
            scheme,
            ids,
            limit: None,
            minutes_after: None,
        }
    }

    pub fn asw<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(IdScheme::Asw, ids)
    }

    pub fn cis<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(IdScheme::Cis, ids)
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_minutes_after(mut self, minutes: u32) -> Self {
        self.minutes_after = Some(minutes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Source of raw departure boards.
///
/// Implemented by [`GolemioClient`](super::GolemioClient) and by an
/// in-memory mock in tests.
pub trait DepartureProvider: Send + Sync {
    /// Fetch the departure board for the queried stop ids.
    fn fetch_board(
        &self,
        query: &BoardQuery,
    ) -> impl Future<Output = Result<BoardResponse, GolemioError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_drops_blank_ids() {
        let query = BoardQuery::asw(["U1040Z12P", "  ", "", " U1040Z4P "]);
        assert_eq!(query.ids, vec!["U1040Z12P", "U1040Z4P"]);
        assert_eq!(query.scheme, IdScheme::Asw);

        assert!(BoardQuery::cis(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn scheme_params() {
        assert_eq!(IdScheme::Asw.param(), "ids[]");
        assert_eq!(IdScheme::Cis.param(), "cisIds[]");
        assert_eq!(IdScheme::Cis.to_string(), "CIS");
    }
}
