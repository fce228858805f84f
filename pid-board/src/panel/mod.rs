//! Display model for departure boards.
//!
//! A run always ends in a [`Panel`]: a board of departures, an empty-state
//! notice, or an error notice. The web layer serializes panels as JSON or
//! renders them to HTML; nothing here knows about either.

mod names;
mod row;

use serde::Serialize;

pub use names::{
    large_empty_message, large_stop_name, medium_column_message, medium_stop_name, short_stop_name,
};
pub use row::{Badge, Countdown, Row};

/// The outcome of one board run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Panel {
    /// Departures to show.
    Board {
        title: Option<String>,
        sections: Vec<Section>,
        footer: Footer,
    },

    /// Nothing to show, but nothing went wrong either.
    Empty {
        title: Option<String>,
        message: String,
        footer: Footer,
    },

    /// The run failed.
    Error {
        title: String,
        message: String,
        footer: Footer,
    },
}

impl Panel {
    pub fn error(title: impl Into<String>, message: impl Into<String>, footer: Footer) -> Self {
        Panel::Error {
            title: title.into(),
            message: message.into(),
            footer,
        }
    }

    pub fn empty(title: Option<String>, message: impl Into<String>, footer: Footer) -> Self {
        Panel::Empty {
            title,
            message: message.into(),
            footer,
        }
    }

    pub fn footer(&self) -> &Footer {
        match self {
            Panel::Board { footer, .. } | Panel::Empty { footer, .. } | Panel::Error { footer, .. } => {
                footer
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Panel::Error { .. })
    }
}

/// A group of rows, optionally under a header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub header: Option<SectionHeader>,
    pub rows: Vec<Row>,

    /// Shown instead of rows when there are none.
    pub message: Option<String>,
}

impl Section {
    pub fn with_rows(header: Option<SectionHeader>, rows: Vec<Row>) -> Self {
        Self {
            header,
            rows,
            message: None,
        }
    }

    pub fn with_message(header: Option<SectionHeader>, message: impl Into<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// Header of a platform or stop section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionHeader {
    pub stop_name: String,
    pub platform_code: Option<String>,

    /// Walking indicator, e.g. "nearby" or "3 min walk".
    pub walk: Option<String>,
}

impl SectionHeader {
    /// Header title: stop name, with the platform code when known.
    pub fn title(&self) -> String {
        match &self.platform_code {
            Some(code) if !code.is_empty() => format!("{} — {}", self.stop_name, code),
            _ => self.stop_name.clone(),
        }
    }
}

/// Metadata shown under every panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footer {
    /// When the panel was generated (RFC 3339, UTC).
    pub generated_at: String,

    /// Reported location accuracy in whole metres.
    pub gps_accuracy_m: Option<u32>,
}

impl Footer {
    pub fn new(now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            generated_at: now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            gps_accuracy_m: None,
        }
    }

    pub fn with_accuracy(mut self, metres: Option<f64>) -> Self {
        self.gps_accuracy_m = metres.map(|m| m.round() as u32);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-14T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn footer_fields() {
        let footer = Footer::new(now()).with_accuracy(Some(12.6));
        assert_eq!(footer.generated_at, "2026-01-14T09:00:00Z");
        assert_eq!(footer.gps_accuracy_m, Some(13));

        assert_eq!(Footer::new(now()).with_accuracy(None).gps_accuracy_m, None);
    }

    #[test]
    fn header_title() {
        let mut header = SectionHeader {
            stop_name: "Anděl".into(),
            platform_code: Some("D".into()),
            walk: None,
        };
        assert_eq!(header.title(), "Anděl — D");

        header.platform_code = None;
        assert_eq!(header.title(), "Anděl");
    }

    #[test]
    fn panel_serializes_with_status_tag() {
        let panel = Panel::error("API Error", "HTTP error", Footer::new(now()));
        let json = serde_json::to_value(&panel).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["title"], "API Error");
        assert_eq!(json["footer"]["generated_at"], "2026-01-14T09:00:00Z");
        assert!(panel.is_error());
    }
}
