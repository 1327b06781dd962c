use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{non_blank, Screen, TheaterId};

/// Canonical postal address. Every part is optional because the catalog
/// comes from crowd-sourced map data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// "street, city, state, postcode, country" with the missing parts skipped.
    pub fn formatted(&self) -> String {
        [
            &self.street,
            &self.city,
            &self.state,
            &self.postcode,
            &self.country,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }

    fn or(self, fallback: Address) -> Address {
        Address {
            street: self.street.or(fallback.street),
            city: self.city.or(fallback.city),
            state: self.state.or(fallback.state),
            postcode: self.postcode.or(fallback.postcode),
            country: self.country.or(fallback.country),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTheater")]
pub struct Theater {
    pub id: TheaterId,
    pub name: String,
    pub address: Address,
    pub brand: Option<String>,
    pub screens_count: u32,
    pub screens: Vec<Screen>,
}

impl Theater {
    pub fn city(&self) -> Option<&str> {
        self.address.city.as_deref()
    }

    /// Chain name, or "Unknown" for independents and missing data.
    pub fn brand_label(&self) -> &str {
        self.brand.as_deref().unwrap_or("Unknown")
    }

    pub fn has_screens(&self) -> bool {
        self.screens_count > 0
    }

    pub fn find_screen(&self, screen_id: &str) -> Option<&Screen> {
        self.screens.iter().find(|s| s.id.as_str() == screen_id)
    }

    /// `screens_count` must match the nested list whenever the list is populated.
    pub fn screens_consistent(&self) -> bool {
        self.screens.is_empty() || self.screens.len() == self.screens_count as usize
    }
}

// Wire shape: `address` is either an object or a flat string, and the
// city listing endpoint sends street/city/... at the top level instead.
#[derive(Deserialize)]
struct RawTheater {
    id: TheaterId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<RawAddress>,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    postcode: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    chain: Option<String>,
    #[serde(default)]
    screens_count: Option<u32>,
    #[serde(default)]
    screens: Option<Vec<Screen>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAddress {
    Line(String),
    Parts {
        #[serde(default)]
        street: Option<String>,
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        state: Option<String>,
        #[serde(default)]
        postcode: Option<String>,
        #[serde(default)]
        country: Option<String>,
    },
}

impl From<RawAddress> for Address {
    fn from(raw: RawAddress) -> Self {
        match raw {
            RawAddress::Line(line) => Address {
                street: non_blank(Some(line)),
                ..Address::default()
            },
            RawAddress::Parts {
                street,
                city,
                state,
                postcode,
                country,
            } => Address {
                street: non_blank(street),
                city: non_blank(city),
                state: non_blank(state),
                postcode: non_blank(postcode),
                country: non_blank(country),
            },
        }
    }
}

fn usable_brand(value: Option<String>) -> Option<String> {
    non_blank(value).filter(|v| {
        let lower = v.to_lowercase();
        lower != "null" && lower != "undefined"
    })
}

impl From<RawTheater> for Theater {
    fn from(raw: RawTheater) -> Self {
        let flat = Address {
            street: non_blank(raw.street),
            city: non_blank(raw.city),
            state: non_blank(raw.state),
            postcode: non_blank(raw.postcode),
            country: non_blank(raw.country),
        };
        let address = match raw.address {
            Some(address) => Address::from(address).or(flat),
            None => flat,
        };

        let theater = Theater {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            address,
            brand: usable_brand(raw.brand).or_else(|| usable_brand(raw.chain)),
            screens_count: raw.screens_count.unwrap_or(0),
            screens: raw.screens.unwrap_or_default(),
        };

        if !theater.screens_consistent() {
            warn!(
                "Theater {} reports {} screens but lists {}",
                theater.id,
                theater.screens_count,
                theater.screens.len()
            );
        }

        theater
    }
}
