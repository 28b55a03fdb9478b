use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::department::Department;

/// Per-department deltas or values submitted for one date.
pub type DepartmentCounters = BTreeMap<Department, Counters>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    #[serde(default, alias = "ondate_prod", deserialize_with = "count::deserialize")]
    pub on_date_production: u64,
    #[serde(default, alias = "ondate_hands", deserialize_with = "count::deserialize")]
    pub on_date_hands: u64,
}

impl Counters {
    pub fn new(on_date_production: u64, on_date_hands: u64) -> Self {
        Self {
            on_date_production,
            on_date_hands,
        }
    }

    pub fn add(&mut self, other: Counters) {
        self.on_date_production = self.on_date_production.saturating_add(other.on_date_production);
        self.on_date_hands = self.on_date_hands.saturating_add(other.on_date_hands);
    }
}

/// One date's production document. Departments never written are absent
/// and read as zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductionRecord {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub departments: DepartmentCounters,
}

impl ProductionRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            departments: BTreeMap::new(),
        }
    }

    pub fn counters(&self, department: Department) -> Counters {
        self.departments.get(&department).copied().unwrap_or_default()
    }

    pub fn increment(&mut self, deltas: &DepartmentCounters) {
        for (department, delta) in deltas {
            self.departments.entry(*department).or_default().add(*delta);
        }
    }

    pub fn overwrite(&mut self, values: &DepartmentCounters) {
        for (department, value) in values {
            self.departments.insert(*department, *value);
        }
    }
}

// Entry forms post counters as either numbers or digit strings.
mod count {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Raw::deserialize(deserializer) {
            Ok(Raw::Number(n)) => Ok(n),
            Ok(Raw::Text(s)) if s.trim().is_empty() => Ok(0),
            Ok(Raw::Text(s)) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| serde::de::Error::custom(format!("expected a non-negative integer, got '{}'", s))),
            Err(_) => Err(serde::de::Error::custom("expected a non-negative integer")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[test]
    fn missing_department_reads_as_zero() {
        let record = ProductionRecord::new(day());
        assert_eq!(record.counters(Department::Comber), Counters::default());
    }

    #[test]
    fn increment_then_overwrite() {
        let mut record = ProductionRecord::new(day());
        let deltas = DepartmentCounters::from([(Department::Mixing, Counters::new(100, 5))]);
        record.increment(&deltas);
        record.increment(&deltas);
        assert_eq!(record.counters(Department::Mixing), Counters::new(200, 10));

        let values = DepartmentCounters::from([(Department::Mixing, Counters::new(7, 1))]);
        record.overwrite(&values);
        assert_eq!(record.counters(Department::Mixing), Counters::new(7, 1));
    }

    #[test]
    fn document_layout_is_flat() {
        let mut record = ProductionRecord::new(day());
        record.increment(&DepartmentCounters::from([(Department::Spg, Counters::new(3, 2))]));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2025-04-01");
        assert_eq!(json["SPG"]["onDateProduction"], 3);
        assert_eq!(json["SPG"]["onDateHands"], 2);

        let legacy = serde_json::json!({
            "date": "2025-04-01",
            "SPG": { "ondate_prod": 3, "ondate_hands": 2 }
        });
        let parsed: ProductionRecord = serde_json::from_value(legacy).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn counters_accept_digit_strings_and_reject_negatives() {
        let parsed: Counters = serde_json::from_value(serde_json::json!({
            "ondate_prod": "120",
            "ondate_hands": 6
        }))
        .unwrap();
        assert_eq!(parsed, Counters::new(120, 6));

        let negative = serde_json::from_value::<Counters>(serde_json::json!({ "onDateProduction": -1 }));
        assert!(negative.is_err());
        let fractional = serde_json::from_value::<Counters>(serde_json::json!({ "onDateHands": "2.5" }));
        assert!(fractional.is_err());
    }
}
