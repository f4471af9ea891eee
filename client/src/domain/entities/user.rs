//! User summary entity
//!
//! Read-only account summaries from `GET /api/users`, shown to admins.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Role;

/// Timestamp format used by the backend for registration dates
pub const REGISTRATION_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    pub registration_date: String,
}

impl UserSummary {
    /// Parsed registration date, if the backend used its usual format
    pub fn registered_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.registration_date.trim(), REGISTRATION_DATE_FORMAT).ok()
    }

    /// First letter of the name, used as the avatar glyph
    pub fn initial(&self) -> String {
        self.full_name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}
