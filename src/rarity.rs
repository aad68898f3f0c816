//! Wearable rarity tiers and their display gradients
//!
//! The tier set is closed. Every tier maps to exactly one light/dark color
//! pair and one maximum supply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::color::Gradient;

/// Error when a rarity name is not one of the known tiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rarity '{0}', expected one of: common, uncommon, rare, epic, legendary, mythic, unique")]
pub struct RarityError(pub String);

/// Rarity tier of a wearable, ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Unique,
}

impl Rarity {
    /// All tiers in ascending order
    pub const ALL: [Rarity; 7] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
        Rarity::Unique,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
            Rarity::Unique => "unique",
        }
    }

    /// Hex stops `(light, dark)` of the tier's background gradient.
    pub fn gradient_stops(self) -> (&'static str, &'static str) {
        match self {
            Rarity::Common => ("#D4E0E3", "#ABC1C1"),
            Rarity::Uncommon => ("#FFA25A", "#ED6D4F"),
            Rarity::Rare => ("#3AD682", "#34CE76"),
            Rarity::Epic => ("#6397F2", "#3D85E6"),
            Rarity::Legendary => ("#A657ED", "#842DDA"),
            Rarity::Mythic => ("#FB7DE3", "#FF4BED"),
            Rarity::Unique => ("#FFE617", "#FFB626"),
        }
    }

    /// Background gradient of the tier.
    pub fn gradient(self) -> Gradient {
        let (light, dark) = self.gradient_stops();
        Gradient::new(light, dark)
    }

    /// Maximum number of items that can be minted at this tier
    pub fn max_supply(self) -> u32 {
        match self {
            Rarity::Common => 100_000,
            Rarity::Uncommon => 10_000,
            Rarity::Rare => 5_000,
            Rarity::Epic => 1_000,
            Rarity::Legendary => 100,
            Rarity::Mythic => 10,
            Rarity::Unique => 1,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = RarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Rarity::ALL
            .into_iter()
            .find(|tier| tier.as_str() == lower)
            .ok_or_else(|| RarityError(s.to_string()))
    }
}

impl TryFrom<String> for Rarity {
    type Error = RarityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
