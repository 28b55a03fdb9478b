use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::department::Department;
use super::production::Counters;
use super::section::Section;

/// Summed counters for every department, zero-filled.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ProductionSummary {
    pub departments: BTreeMap<Department, Counters>,
}

impl ProductionSummary {
    pub fn new() -> Self {
        Self {
            departments: Department::ALL.iter().map(|d| (*d, Counters::default())).collect(),
        }
    }

    pub fn add(&mut self, department: Department, counters: Counters) {
        self.departments.entry(department).or_default().add(counters);
    }

    pub fn get(&self, department: Department) -> Counters {
        self.departments.get(&department).copied().unwrap_or_default()
    }

    pub fn totals(&self) -> Counters {
        let mut total = Counters::default();
        for counters in self.departments.values() {
            total.add(*counters);
        }
        total
    }
}

impl Default for ProductionSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SectionTotals {
    pub machine_type: String,
    pub life_in_days: i64,
    pub life_in_months: f64,
    pub next_schedule: String,
}

/// Accumulated lifecycle figures for every section, placeholder-filled.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ElectricalSummary {
    pub sections: BTreeMap<Section, SectionTotals>,
}

impl ElectricalSummary {
    pub fn new() -> Self {
        Self {
            sections: Section::ALL.iter().map(|s| (*s, SectionTotals::default())).collect(),
        }
    }

    /// Placeholder totals for a section missing from a deserialized summary.
    pub fn get(&self, section: Section) -> SectionTotals {
        self.sections.get(&section).cloned().unwrap_or_default()
    }

    pub fn get_mut(&mut self, section: Section) -> &mut SectionTotals {
        self.sections.entry(section).or_default()
    }
}

impl Default for ElectricalSummary {
    fn default() -> Self {
        Self::new()
    }
}
