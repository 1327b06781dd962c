use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::{non_blank, EntityId, ScreenId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawScreen")]
pub struct Screen {
    pub id: ScreenId,
    pub name: Option<String>,
    pub screen_number: Option<u32>,
    #[serde(rename = "type")]
    pub screen_type: Option<String>,
    pub suggestions: Vec<BestSeatSuggestion>,
    /// Seat stored on the screen row itself; older than any suggestion.
    pub best_seat: Option<String>,
}

impl Screen {
    pub fn display_name(&self) -> String {
        match (&self.name, self.screen_number) {
            (Some(name), _) => name.clone(),
            (None, Some(number)) => format!("Screen {}", number),
            (None, None) => "Screen".to_string(),
        }
    }

    /// Most recent embedded suggestion; the backend orders them newest first.
    pub fn latest_suggestion(&self) -> Option<&BestSeatSuggestion> {
        self.suggestions.first()
    }
}

#[derive(Deserialize)]
struct RawScreen {
    id: ScreenId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    screen_number: Option<u32>,
    #[serde(default, rename = "type")]
    screen_type: Option<String>,
    #[serde(default)]
    is_imax: Option<bool>,
    #[serde(default)]
    suggestions: Option<Vec<BestSeatSuggestion>>,
    #[serde(default)]
    best_seat: Option<String>,
}

impl From<RawScreen> for Screen {
    fn from(raw: RawScreen) -> Self {
        let screen_type = non_blank(raw.screen_type)
            .or_else(|| raw.is_imax.filter(|imax| *imax).map(|_| "IMAX".to_string()));

        Screen {
            id: raw.id,
            name: non_blank(raw.name),
            screen_number: raw.screen_number,
            screen_type,
            suggestions: raw.suggestions.unwrap_or_default(),
            best_seat: non_blank(raw.best_seat),
        }
    }
}

/// A community recommendation for one screen. Append-only on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSeatSuggestion {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub suggested_seat: String,
    #[serde(default)]
    pub user_notes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<NaiveDateTime>,
}

// Бэкенд отдаёт naive ISO-8601, но на всякий случай принимаем и RFC 3339
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.naive_utc()));
    }
    raw.parse::<NaiveDateTime>()
        .map(Some)
        .map_err(serde::de::Error::custom)
}
