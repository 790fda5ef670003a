//! Products recorded against an open reception.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed product category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// электроника
    #[serde(rename = "электроника")]
    Electronics,
    /// одежда
    #[serde(rename = "одежда")]
    Clothes,
    /// обувь
    #[serde(rename = "обувь")]
    Shoes,
}

impl ProductType {
    /// Every category, in wire order.
    pub const ALL: [Self; 3] = [Self::Electronics, Self::Clothes, Self::Shoes];

    /// Wire (and storage) name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "электроника",
            Self::Clothes => "одежда",
            Self::Shoes => "обувь",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a category string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported product type: {0}")]
pub struct UnsupportedProductType(pub String);

impl FromStr for ProductType {
    type Err = UnsupportedProductType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnsupportedProductType(value.to_owned()))
    }
}

/// A product row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Stable identifier.
    pub id: Uuid,
    /// Instant the product was recorded; removal order key.
    pub date_time: DateTime<Utc>,
    /// Category.
    pub product_type: ProductType,
    /// Reception the product belongs to.
    pub reception_id: Uuid,
}

/// Product about to be recorded; the reception is resolved by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductDraft {
    /// Identifier assigned to the new product.
    pub id: Uuid,
    /// Recording instant.
    pub date_time: DateTime<Utc>,
    /// Category.
    pub product_type: ProductType,
}

impl ProductDraft {
    /// Attach the draft to the resolved reception.
    #[must_use]
    pub fn into_product(self, reception_id: Uuid) -> Product {
        Product {
            id: self.id,
            date_time: self.date_time,
            product_type: self.product_type,
            reception_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("электроника", ProductType::Electronics)]
    #[case("одежда", ProductType::Clothes)]
    #[case("обувь", ProductType::Shoes)]
    fn parses_known_types(#[case] raw: &str, #[case] expected: ProductType) {
        assert_eq!(raw.parse::<ProductType>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_type() {
        assert!("мебель".parse::<ProductType>().is_err());
    }

    #[rstest]
    fn draft_keeps_identity_when_attached() {
        let draft = ProductDraft {
            id: Uuid::new_v4(),
            date_time: Utc::now(),
            product_type: ProductType::Shoes,
        };
        let reception_id = Uuid::new_v4();
        let product = draft.into_product(reception_id);
        assert_eq!(product.id, draft.id);
        assert_eq!(product.reception_id, reception_id);
        assert_eq!(product.product_type, ProductType::Shoes);
    }
}
