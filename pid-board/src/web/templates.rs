//! Askama templates for the HTML board.

use askama::Template;

use crate::panel::{Panel, Row, Section};

/// A whole board panel.
#[derive(Template)]
#[template(path = "panel.html")]
pub struct PanelTemplate {
    /// "board", "empty" or "error"
    pub status: &'static str,
    pub title: Option<String>,
    pub message: Option<String>,
    pub sections: Vec<SectionView>,
    pub generated_at: String,
    pub gps_accuracy_m: Option<u32>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One platform or stop column.
#[derive(Debug, Clone)]
pub struct SectionView {
    pub title: Option<String>,
    pub walk: Option<String>,
    pub rows: Vec<RowView>,
    pub message: Option<String>,
}

/// One departure line.
#[derive(Debug, Clone)]
pub struct RowView {
    pub line: String,
    pub badge_class: &'static str,
    pub headsign: String,
    pub countdown: String,
    pub delay: Option<String>,
    pub air_conditioned: bool,
    pub wheelchair_accessible: bool,
    pub next: Option<String>,
}

impl From<&Row> for RowView {
    fn from(row: &Row) -> Self {
        Self {
            line: row.line.clone(),
            badge_class: row.badge.class(),
            headsign: row.headsign.clone(),
            countdown: row.countdown.to_string(),
            delay: row.delay_minutes.map(|m| format!("+{m} min")),
            air_conditioned: row.air_conditioned,
            wheelchair_accessible: row.wheelchair_accessible,
            next: row.next.as_ref().map(|n| n.to_string()),
        }
    }
}

impl From<&Section> for SectionView {
    fn from(section: &Section) -> Self {
        Self {
            title: section.header.as_ref().map(|h| h.title()),
            walk: section.header.as_ref().and_then(|h| h.walk.clone()),
            rows: section.rows.iter().map(RowView::from).collect(),
            message: section.message.clone(),
        }
    }
}

impl From<&Panel> for PanelTemplate {
    fn from(panel: &Panel) -> Self {
        let footer = panel.footer();
        let (status, title, message, sections) = match panel {
            Panel::Board { title, sections, .. } => (
                "board",
                title.clone(),
                None,
                sections.iter().map(SectionView::from).collect(),
            ),
            Panel::Empty { title, message, .. } => {
                ("empty", title.clone(), Some(message.clone()), Vec::new())
            }
            Panel::Error { title, message, .. } => (
                "error",
                Some(title.clone()),
                Some(message.clone()),
                Vec::new(),
            ),
        };

        Self {
            status,
            title,
            message,
            sections,
            generated_at: footer.generated_at.clone(),
            gps_accuracy_m: footer.gps_accuracy_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{Badge, Countdown, Footer, SectionHeader};
    use chrono::{DateTime, Utc};

    fn footer() -> Footer {
        let now: DateTime<Utc> = DateTime::parse_from_rfc3339("2026-01-14T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Footer::new(now).with_accuracy(Some(9.0))
    }

    fn row() -> Row {
        Row {
            line: "B".into(),
            badge: Badge::MetroB,
            headsign: "Zličín".into(),
            countdown: Countdown::Minutes(3),
            is_delayed: true,
            delay_minutes: Some(2),
            air_conditioned: true,
            wheelchair_accessible: false,
            next: Some(Countdown::Clock("10:15".into())),
        }
    }

    #[test]
    fn renders_board() {
        let panel = Panel::Board {
            title: None,
            sections: vec![Section::with_rows(
                Some(SectionHeader {
                    stop_name: "Anděl".into(),
                    platform_code: Some("2".into()),
                    walk: Some("nearby".into()),
                }),
                vec![row()],
            )],
            footer: footer(),
        };

        let html = PanelTemplate::from(&panel).render().unwrap();
        assert!(html.contains("Anděl — 2"));
        assert!(html.contains("metro-b"));
        assert!(html.contains("Zličín"));
        assert!(html.contains("3 min"));
        assert!(html.contains("+2 min"));
        assert!(html.contains("10:15"));
        assert!(html.contains("±9 m"));
    }

    #[test]
    fn renders_notices() {
        let panel = Panel::error("API Error", "rate limited by Golemio API", footer());
        let html = PanelTemplate::from(&panel).render().unwrap();
        assert!(html.contains("API Error"));
        assert!(html.contains("rate limited by Golemio API"));

        let panel = Panel::empty(None, "No catchable departures found.", footer());
        let template = PanelTemplate::from(&panel);
        assert_eq!(template.status, "empty");
        assert!(template.render().unwrap().contains("No catchable departures found."));
    }
}
