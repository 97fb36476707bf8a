//! User-facing strings in German (default) and English. Journal event labels
//! deliberately live elsewhere ([crate::journal::event]) and are identical in
//! every language, so old journals always parse.

use std::{convert::Infallible, fmt::Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    De,
    En,
}

impl Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lang::De => write!(f, "de"),
            Lang::En => write!(f, "en"),
        }
    }
}

impl Lang {
    /// Unsupported codes fall back to German, like the original tool did.
    pub fn from_code(code: &str) -> Lang {
        match code {
            "en" => Lang::En,
            _ => Lang::De,
        }
    }
}

/// Value parser for `--lang`. Never rejects, so an unsupported code means
/// German rather than a usage error.
pub fn parse_lang(code: &str) -> Result<Lang, Infallible> {
    Ok(Lang::from_code(code))
}

pub struct Texts {
    pub arrival_label: &'static str,
    pub daily_summary_header: &'static str,
    pub weekly_summary_header: &'static str,
    pub entries_label: &'static str,
    pub hours: &'static str,
    pub week: &'static str,
    pub worked_today: &'static str,
    pub status_tracking: &'static str,
    pub status_stopped: &'static str,
    pub log_file_label: &'static str,
    pub error_file_not_found: &'static str,
}

static DE: Texts = Texts {
    arrival_label: "Ankunft",
    daily_summary_header: "=== TAEGLICHE ZUSAMMENFASSUNG ===",
    weekly_summary_header: "=== WOECHENTLICHE ZUSAMMENFASSUNG ===",
    entries_label: "Anzahl der Einträge",
    hours: "Stunden",
    week: "Woche",
    worked_today: "Heute gearbeitet",
    status_tracking: "Zeiterfassung läuft...",
    status_stopped: "Zeiterfassung gestoppt",
    log_file_label: "Log-Datei",
    error_file_not_found: "Datei nicht gefunden",
};

static EN: Texts = Texts {
    arrival_label: "Arrival",
    daily_summary_header: "=== DAILY SUMMARY ===",
    weekly_summary_header: "=== WEEKLY SUMMARY ===",
    entries_label: "Number of entries",
    hours: "hours",
    week: "Week",
    worked_today: "Worked today",
    status_tracking: "Time tracking active...",
    status_stopped: "Time tracking stopped",
    log_file_label: "Log file",
    error_file_not_found: "File not found",
};

pub fn texts(lang: Lang) -> &'static Texts {
    match lang {
        Lang::De => &DE,
        Lang::En => &EN,
    }
}
