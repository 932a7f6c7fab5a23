use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};
use crate::id::Id;

/// The closed color palette for labels.
///
/// Colors are a fixed set so the rendering layer can map them to theme
/// swatches without parsing arbitrary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelColor {
    BerryRed,
    PumpkinOrange,
    LagoonBlue,
    PinkTulip,
    LightMud,
    OrangePeel,
    BrightMoss,
    AntiqueBlue,
    DarkGranite,
    TurquoiseSea,
}

impl LabelColor {
    const fn as_str(self) -> &'static str {
        match self {
            Self::BerryRed => "berry-red",
            Self::PumpkinOrange => "pumpkin-orange",
            Self::LagoonBlue => "lagoon-blue",
            Self::PinkTulip => "pink-tulip",
            Self::LightMud => "light-mud",
            Self::OrangePeel => "orange-peel",
            Self::BrightMoss => "bright-moss",
            Self::AntiqueBlue => "antique-blue",
            Self::DarkGranite => "dark-granite",
            Self::TurquoiseSea => "turquoise-sea",
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelColor {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "berry-red" => Ok(Self::BerryRed),
            "pumpkin-orange" => Ok(Self::PumpkinOrange),
            "lagoon-blue" => Ok(Self::LagoonBlue),
            "pink-tulip" => Ok(Self::PinkTulip),
            "light-mud" => Ok(Self::LightMud),
            "orange-peel" => Ok(Self::OrangePeel),
            "bright-moss" => Ok(Self::BrightMoss),
            "antique-blue" => Ok(Self::AntiqueBlue),
            "dark-granite" => Ok(Self::DarkGranite),
            "turquoise-sea" => Ok(Self::TurquoiseSea),
            _ => Err(ParseEnumError {
                expected: "label color",
                got: s.to_string(),
            }),
        }
    }
}

/// A board-scoped label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: Id,
    pub board_id: Id,
    pub name: String,
    pub color: LabelColor,
    /// Board-scoped display order.
    pub position: i64,
    pub created_at: Option<DateTime<Utc>>,
}
