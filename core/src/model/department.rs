use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Production departments of the mill, in floor order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Department {
    #[serde(rename = "MIXING")]
    Mixing,
    #[serde(rename = "BR_CDG")]
    BrCdg,
    #[serde(rename = "PREDRG")]
    Predrg,
    #[serde(rename = "LH15")]
    Lh15,
    #[serde(rename = "COMBER")]
    Comber,
    #[serde(rename = "DRG")]
    Drg,
    #[serde(rename = "SMX")]
    Smx,
    #[serde(rename = "SPG")]
    Spg,
    #[serde(rename = "ACWDG")]
    Acwdg,
    #[serde(rename = "PACKBAGS")]
    Packbags,
}

impl Department {
    pub const ALL: [Department; 10] = [
        Department::Mixing,
        Department::BrCdg,
        Department::Predrg,
        Department::Lh15,
        Department::Comber,
        Department::Drg,
        Department::Smx,
        Department::Spg,
        Department::Acwdg,
        Department::Packbags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Mixing => "MIXING",
            Department::BrCdg => "BR_CDG",
            Department::Predrg => "PREDRG",
            Department::Lh15 => "LH15",
            Department::Comber => "COMBER",
            Department::Drg => "DRG",
            Department::Smx => "SMX",
            Department::Spg => "SPG",
            Department::Acwdg => "ACWDG",
            Department::Packbags => "PACKBAGS",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|d| d.as_str()).collect()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| Error::shape("department", format!("unknown department '{}'", s)))
    }
}
