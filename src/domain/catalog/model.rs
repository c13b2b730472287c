//! Service item domain entity

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::errors::DomainError;

/// Kind of work a service item describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    Wash,
    DryClean,
    Iron,
    WashAndIron,
    SpecialCare,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 5] = [
        Self::Wash,
        Self::DryClean,
        Self::Iron,
        Self::WashAndIron,
        Self::SpecialCare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wash => "WASH",
            Self::DryClean => "DRY_CLEAN",
            Self::Iron => "IRON",
            Self::WashAndIron => "WASH_AND_IRON",
            Self::SpecialCare => "SPECIAL_CARE",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("Unknown service category: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceItem {
    pub id: i32,
    pub name: String,
    pub category: ServiceCategory,
    /// Price of one unit, two fractional digits at most
    pub price_per_unit: Decimal,
    /// Free-form unit label ("KG", "PIECE", "LOAD")
    pub unit_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceItemDraft {
    pub name: String,
    pub category: ServiceCategory,
    pub price_per_unit: Decimal,
    pub unit_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_tokens_round_trip() {
        for category in ServiceCategory::ALL {
            assert_eq!(category.as_str().parse::<ServiceCategory>().unwrap(), category);
        }
    }

    #[test]
    fn category_serializes_as_wire_token() {
        let json = serde_json::to_string(&ServiceCategory::WashAndIron).unwrap();
        assert_eq!(json, "\"WASH_AND_IRON\"");
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(matches!(
            "STEAM".parse::<ServiceCategory>(),
            Err(DomainError::Validation(_))
        ));
    }
}
