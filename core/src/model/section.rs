use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Apron sections tracked by electrical maintenance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    #[serde(rename = "TOP_APRON")]
    TopApron,
    #[serde(rename = "MIDDLE_APRON")]
    MiddleApron,
    #[serde(rename = "BOTTOM_APRON")]
    BottomApron,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::TopApron, Section::MiddleApron, Section::BottomApron];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::TopApron => "TOP_APRON",
            Section::MiddleApron => "MIDDLE_APRON",
            Section::BottomApron => "BOTTOM_APRON",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }

    /// Machine makes offered for this section on the entry form.
    /// Informational only; stored machine types are free text.
    pub fn machine_types(&self) -> &'static [&'static str] {
        match self {
            Section::TopApron => &["LR", "JEETS", "TOYODA", "Rieter", "Trützschler", "Savio"],
            Section::MiddleApron => &["SUESSEN", "TOYODA", "Rieter", "LR", "Schlafhorst"],
            Section::BottomApron => &["JEETS", "TOYODA", "Rieter", "Trützschler", "Savio", "Other"],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|sec| sec.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| Error::shape("section", format!("unknown section '{}'", s)))
    }
}
