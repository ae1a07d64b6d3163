use std::fmt;

use serde::Deserialize;

/// The only queue surfaced on the leaderboard.
pub const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

/// Ranked ladder tiers, ordered lowest to highest so that `Ord` follows the
/// ladder rather than the wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Iron => "IRON",
            Self::Bronze => "BRONZE",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
            Self::Emerald => "EMERALD",
            Self::Diamond => "DIAMOND",
            Self::Master => "MASTER",
            Self::Grandmaster => "GRANDMASTER",
            Self::Challenger => "CHALLENGER",
        };
        f.write_str(name)
    }
}

/// Divisions within a tier. IV is the floor of a tier, I the ceiling; apex
/// tiers report division I for every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum Division {
    IV,
    III,
    II,
    I,
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IV => "IV",
            Self::III => "III",
            Self::II => "II",
            Self::I => "I",
        };
        f.write_str(name)
    }
}
