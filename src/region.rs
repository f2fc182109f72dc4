//! The fixed set of supported regions.
//!
//! | Code    | Display name  |
//! |---------|---------------|
//! | US-CT   | Connecticut   |
//! | US-ME   | Maine         |
//! | US-MA   | Massachusetts |
//! | US-NH   | New Hampshire |
//! | US-RI   | Rhode Island  |
//! | US-VT   | Vermont       |

use crate::error::ParamError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Region {
    Connecticut,
    Maine,
    Massachusetts,
    #[serde(rename = "New Hampshire")]
    NewHampshire,
    #[serde(rename = "Rhode Island")]
    RhodeIsland,
    Vermont,
}

impl Region {
    /// Selector order.
    pub const ALL: [Region; 6] = [
        Region::Connecticut,
        Region::Maine,
        Region::Massachusetts,
        Region::NewHampshire,
        Region::RhodeIsland,
        Region::Vermont,
    ];

    /// Maps a raw `iso_region` code to its region. Unsupported codes yield `None`.
    pub fn from_code(code: &str) -> Option<Region> {
        match code.trim() {
            "US-CT" => Some(Region::Connecticut),
            "US-ME" => Some(Region::Maine),
            "US-MA" => Some(Region::Massachusetts),
            "US-NH" => Some(Region::NewHampshire),
            "US-RI" => Some(Region::RhodeIsland),
            "US-VT" => Some(Region::Vermont),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Region::Connecticut => "US-CT",
            Region::Maine => "US-ME",
            Region::Massachusetts => "US-MA",
            Region::NewHampshire => "US-NH",
            Region::RhodeIsland => "US-RI",
            Region::Vermont => "US-VT",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Region::Connecticut => "Connecticut",
            Region::Maine => "Maine",
            Region::Massachusetts => "Massachusetts",
            Region::NewHampshire => "New Hampshire",
            Region::RhodeIsland => "Rhode Island",
            Region::Vermont => "Vermont",
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::ALL[0]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts a display name (case-insensitive) or an ISO code.
impl FromStr for Region {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.display_name().eq_ignore_ascii_case(wanted))
            .or_else(|| Region::from_code(&wanted.to_ascii_uppercase()))
            .ok_or_else(|| ParamError::UnknownRegion(wanted.to_string()))
    }
}
