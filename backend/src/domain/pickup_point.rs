//! Pickup points (PVZ) and the supported city allow-list.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cities where pickup points may be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    /// Москва
    #[serde(rename = "Москва")]
    Moscow,
    /// Казань
    #[serde(rename = "Казань")]
    Kazan,
    /// Санкт-Петербург
    #[serde(rename = "Санкт-Петербург")]
    SaintPetersburg,
}

impl City {
    /// Every supported city, in wire order.
    pub const ALL: [Self; 3] = [Self::Moscow, Self::Kazan, Self::SaintPetersburg];

    /// Wire (and storage) name of the city.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moscow => "Москва",
            Self::Kazan => "Казань",
            Self::SaintPetersburg => "Санкт-Петербург",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a city falls outside the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported city: {0}")]
pub struct UnsupportedCity(pub String);

impl FromStr for City {
    type Err = UnsupportedCity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|city| city.as_str() == value)
            .ok_or_else(|| UnsupportedCity(value.to_owned()))
    }
}

/// A registered pickup point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupPoint {
    /// Stable identifier.
    pub id: Uuid,
    /// City from the allow-list.
    pub city: City,
    /// Registration instant; listing order key.
    pub registration_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Москва", City::Moscow)]
    #[case("Казань", City::Kazan)]
    #[case("Санкт-Петербург", City::SaintPetersburg)]
    fn parses_supported_cities(#[case] raw: &str, #[case] expected: City) {
        assert_eq!(raw.parse::<City>(), Ok(expected));
    }

    #[rstest]
    #[case("Новосибирск")]
    #[case("Moscow")]
    #[case("москва")]
    #[case("")]
    fn rejects_other_cities(#[case] raw: &str) {
        assert_eq!(raw.parse::<City>(), Err(UnsupportedCity(raw.to_owned())));
    }

    #[rstest]
    fn serde_uses_cyrillic_names() {
        let json = serde_json::to_string(&City::SaintPetersburg).expect("city serialises");
        assert_eq!(json, "\"Санкт-Петербург\"");
        let parsed: City = serde_json::from_str("\"Казань\"").expect("city parses");
        assert_eq!(parsed, City::Kazan);
    }
}
