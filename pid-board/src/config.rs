//! Server configuration from environment variables.
//!
//! | Variable                | Meaning                                   |
//! |-------------------------|-------------------------------------------|
//! | `GOLEMIO_API_KEY`       | API token (empty if unset)                |
//! | `PID_STOPS_DB`          | stop database file                        |
//! | `PID_BIND_ADDR`         | listen address                            |
//! | `PID_LARGE_ASW_IDS`     | large layout ASW ids, comma separated     |
//! | `PID_LARGE_CIS_IDS`     | large layout CIS ids, comma separated     |
//! | `PID_MEDIUM_ASW_IDS`    | medium layout ASW ids, `;` between stops  |
//! | `PID_MEDIUM_CIS_IDS`    | medium layout CIS ids, `;` between stops  |
//! | `PID_CLOSEST_STOP_ONLY` | query only the closest stop (`true`/`1`)  |
//! | `PID_SEARCH_RADIUS_M`   | nearby search radius in metres            |

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::board::{BoardConfig, ConfiguredStops};
use crate::stops::DEFAULT_DATABASE_FILENAME;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub stops_db: PathBuf,
    pub bind_addr: SocketAddr,
    pub board: BoardConfig,
    pub configured: ConfiguredStops,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`. Unset and blank variables
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = get("GOLEMIO_API_KEY").unwrap_or_else(|| {
            warn!("GOLEMIO_API_KEY not set, departure fetches will fail");
            String::new()
        });

        let stops_db = get("PID_STOPS_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILENAME));

        let bind_addr = parse_var(
            "PID_BIND_ADDR",
            get("PID_BIND_ADDR").as_deref().unwrap_or(DEFAULT_BIND_ADDR),
        )?;

        let mut board = BoardConfig::default();
        if let Some(value) = get("PID_CLOSEST_STOP_ONLY") {
            board = board.with_closest_stop_only(parse_bool("PID_CLOSEST_STOP_ONLY", &value)?);
        }
        if let Some(value) = get("PID_SEARCH_RADIUS_M") {
            let radius: f64 = parse_var("PID_SEARCH_RADIUS_M", &value)?;
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ConfigError::Invalid {
                    var: "PID_SEARCH_RADIUS_M",
                    value,
                });
            }
            board = board.with_search_radius(radius);
        }

        let mut configured = ConfiguredStops::default();
        if let Some(value) = get("PID_LARGE_ASW_IDS") {
            configured.large.asw_ids = parse_id_list(&value);
        }
        if let Some(value) = get("PID_LARGE_CIS_IDS") {
            configured.large.cis_ids = parse_id_list(&value);
        }
        if let Some(value) = get("PID_MEDIUM_ASW_IDS") {
            let [first, second] = parse_stop_lists(&value);
            configured.medium[0].asw_ids = first;
            configured.medium[1].asw_ids = second;
        }
        if let Some(value) = get("PID_MEDIUM_CIS_IDS") {
            let [first, second] = parse_stop_lists(&value);
            configured.medium[0].cis_ids = first;
            configured.medium[1].cis_ids = second;
        }

        Ok(Self {
            api_key,
            stops_db,
            bind_addr,
            board,
            configured,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
        }),
    }
}

/// Comma-separated ids, trimmed, blanks dropped.
pub fn parse_id_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// Two `;`-separated id lists for the two medium stops. A missing
/// second list leaves that stop without ids of this scheme.
pub fn parse_stop_lists(value: &str) -> [Vec<String>; 2] {
    let mut parts = value.splitn(2, ';');
    let first = parts.next().map(parse_id_list).unwrap_or_default();
    let second = parts.next().map(parse_id_list).unwrap_or_default();
    [first, second]
}
