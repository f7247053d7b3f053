//! Job status catalog: a fixed table of titles and colors.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Status of the job being reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Unknown,
    InProgress,
    Success,
    Failure,
    Cancelled,
    Skipped,
}

impl Status {
    /// Every status, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Unknown,
        Self::InProgress,
        Self::Success,
        Self::Failure,
        Self::Cancelled,
        Self::Skipped,
    ];

    /// Look up a status code, falling back to `Unknown` for empty or unrecognized codes.
    pub fn lookup(code: &str) -> Self {
        Self::parse(code).unwrap_or_default()
    }

    /// Strict parse of a status code. `None` for anything outside the catalog.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code.trim())
    }

    /// The code used in action inputs.
    pub fn code(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::InProgress => "in-progress",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
            Self::Skipped => "skipped",
        }
    }

    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::InProgress => "In Progress",
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::Cancelled => "Cancelled",
            Self::Skipped => "Skipped",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::InProgress => "#dcad04",
            Self::Success => "#24a943",
            Self::Failure => "#cc1f2d",
            Self::Unknown | Self::Cancelled | Self::Skipped => "#1f242b",
        }
    }

    /// The catalog entry for this status.
    pub fn entry(self) -> StatusEntry {
        StatusEntry {
            status: self,
            title: self.title(),
            color: HexColor(self.color().to_string()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A catalog entry: the status with its display title and attachment color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub status: Status,
    pub title: &'static str,
    pub color: HexColor,
}

impl StatusEntry {
    /// Replace the catalog color, keeping the title.
    pub fn with_color(self, color: HexColor) -> Self {
        Self { color, ..self }
    }
}

impl Default for StatusEntry {
    fn default() -> Self {
        Status::Unknown.entry()
    }
}

/// A `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error for strings that are not `#` followed by six hex digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a HEX color: {0}")]
pub struct InvalidHexColor(pub String);

impl FromStr for HexColor {
    type Err = InvalidHexColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s
            .strip_prefix('#')
            .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidHexColor(s.to_string()))
        }
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
