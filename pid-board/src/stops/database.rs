//! Static stop database.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Coordinates, StopId};

use super::error::StopDatabaseError;

/// One entry of the stop database file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StopRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// A stop record with its id parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coordinates: Coordinates,
}

/// The in-memory stop database.
///
/// Loaded once from a JSON array of `{id, name, lat, lon}` records.
/// Records with an unusable id or coordinates are skipped.
#[derive(Debug, Clone, Default)]
pub struct StopDatabase {
    stops: Vec<Stop>,

    /// Base id → stop name, for labelling platform headers.
    names: HashMap<String, String>,
}

impl StopDatabase {
    /// Build a database from raw records.
    pub fn from_records(records: Vec<StopRecord>) -> Self {
        let mut stops = Vec::with_capacity(records.len());
        let mut names = HashMap::new();

        for record in records {
            let id = match StopId::parse(&record.id) {
                Ok(id) => id,
                Err(e) => {
                    debug!(id = %record.id, error = %e, "skipping stop record");
                    continue;
                }
            };

            let coordinates = Coordinates::new(record.lat, record.lon);
            if !coordinates.is_valid() {
                debug!(%id, lat = record.lat, lon = record.lon, "skipping stop with invalid coordinates");
                continue;
            }

            names
                .entry(id.base_form())
                .or_insert_with(|| record.name.clone());

            stops.push(Stop {
                id,
                name: record.name,
                coordinates,
            });
        }

        Self { stops, names }
    }

    /// Parse a database from its JSON text.
    ///
    /// `path` is only used to label errors.
    pub fn from_json(json: &str, path: &Path) -> Result<Self, StopDatabaseError> {
        let records: Vec<StopRecord> =
            serde_json::from_str(json).map_err(|e| StopDatabaseError::Json {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let total = records.len();
        let db = Self::from_records(records);

        if db.is_empty() {
            return Err(StopDatabaseError::Empty);
        }

        if db.len() < total {
            warn!(
                skipped = total - db.len(),
                kept = db.len(),
                "some stop records were unusable"
            );
        }

        Ok(db)
    }

    /// Read and parse a database file.
    pub async fn load(path: &Path) -> Result<Self, StopDatabaseError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StopDatabaseError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_json(&json, path)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    /// Look up a stop name by id, in either form.
    pub fn name_of(&self, id: &StopId) -> Option<&str> {
        self.names.get(id.base()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
