//! String format heuristics

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ISO 8601 datetimes such as 2024-01-15T10:30:00Z or 2024-01-15 10:30:00
static DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}").expect("valid datetime regex")
});

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid uuid regex")
});

/// Which string formats to attach during inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FormatDetection {
    pub date_time: bool,
    pub date: bool,
    pub uri: bool,
    pub email: bool,
    pub uuid: bool,
}

impl Default for FormatDetection {
    fn default() -> Self {
        Self::all()
    }
}

impl FormatDetection {
    /// Detect every known format
    pub fn all() -> Self {
        Self {
            date_time: true,
            date: true,
            uri: true,
            email: true,
            uuid: true,
        }
    }

    /// Detect nothing
    pub fn none() -> Self {
        Self {
            date_time: false,
            date: false,
            uri: false,
            email: false,
            uuid: false,
        }
    }

    /// Guess the format of a string value
    pub fn detect(&self, s: &str) -> Option<&'static str> {
        if self.date_time && DATETIME.is_match(s) {
            Some("date-time")
        } else if self.date && DATE.is_match(s) {
            Some("date")
        } else if self.uri && is_uri(s) {
            Some("uri")
        } else if self.email && is_email(s) {
            Some("email")
        } else if self.uuid && UUID.is_match(s) {
            Some("uuid")
        } else {
            None
        }
    }
}

fn is_uri(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn is_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
