pub mod screen;
pub mod theater;

pub use screen::{BestSeatSuggestion, Screen};
pub use theater::{Address, Theater};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque backend identifier. The API sends numbers, older payloads strings;
/// both are kept in their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

pub type TheaterId = EntityId;
pub type ScreenId = EntityId;

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(id) => Self(id.to_string()),
            RawId::Float(id) => Self(id.to_string()),
            RawId::Text(id) => Self(id),
        })
    }
}

/// Blank strings from the wire are treated as missing.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
