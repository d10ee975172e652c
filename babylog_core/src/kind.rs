//! Event kind enum as the single source of truth for kind labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a care event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Sleep,
    Feed,
    Diaper,
    Bath,
    Meds,
    Solids,
    TummyTime,
    SkinToSkin,
    BrushTeeth,
    IndoorPlay,
    OutdoorPlay,
    Pump,
    Birth,
}

impl EventKind {
    /// Every kind, in declaration order
    pub const ALL: [EventKind; 13] = [
        Self::Sleep,
        Self::Feed,
        Self::Diaper,
        Self::Bath,
        Self::Meds,
        Self::Solids,
        Self::TummyTime,
        Self::SkinToSkin,
        Self::BrushTeeth,
        Self::IndoorPlay,
        Self::OutdoorPlay,
        Self::Pump,
        Self::Birth,
    ];

    /// Lowercase label as it appears in the log
    pub fn label(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Feed => "feed",
            Self::Diaper => "diaper",
            Self::Bath => "bath",
            Self::Meds => "meds",
            Self::Solids => "solids",
            Self::TummyTime => "tummy time",
            Self::SkinToSkin => "skin to skin",
            Self::BrushTeeth => "brush teeth",
            Self::IndoorPlay => "indoor play",
            Self::OutdoorPlay => "outdoor play",
            Self::Pump => "pump",
            Self::Birth => "birth",
        }
    }

    /// Colour used for this kind's bars on the timeline chart
    pub fn color(self) -> &'static str {
        match self {
            Self::Sleep => "black",
            Self::Feed => "limegreen",
            Self::Solids => "forestgreen",
            Self::Diaper => "saddlebrown",
            Self::Meds => "red",
            Self::Bath => "blue",
            Self::BrushTeeth => "pink",
            Self::TummyTime => "yellow",
            Self::SkinToSkin => "orange",
            Self::IndoorPlay => "purple",
            Self::OutdoorPlay => "magenta",
            Self::Pump => "gray",
            Self::Birth => "gold",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    /// Parses a label case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == folded)
            .ok_or(UnknownEventKind(folded))
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown kind labels.
#[derive(Debug, Clone)]
pub struct UnknownEventKind(pub String);

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event kind: {}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}
