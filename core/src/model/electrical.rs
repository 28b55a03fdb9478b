use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::section::Section;
use crate::time::Lifecycle;

pub type SectionRecords = BTreeMap<Section, SectionRecord>;

/// Installed part for one section, with lifecycle fields computed by the
/// submitting client at entry time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    #[serde(default, alias = "type")]
    pub machine_type: String,
    #[serde(default, alias = "date", with = "optional_date")]
    pub install_date: Option<NaiveDate>,
    #[serde(default)]
    pub life_in_days: i64,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub life_in_months: f64,
    #[serde(default)]
    pub next_schedule: String,
}

impl SectionRecord {
    pub fn new(machine_type: impl Into<String>, install_date: Option<NaiveDate>, life: Lifecycle) -> Self {
        Self {
            machine_type: machine_type.into(),
            install_date,
            life_in_days: life.life_in_days,
            life_in_months: life.life_in_months,
            next_schedule: life.next_schedule,
        }
    }

    /// Fills the lifecycle fields as of now.
    pub fn installed(machine_type: impl Into<String>, install_date: Option<NaiveDate>) -> Self {
        Self::new(machine_type, install_date, Lifecycle::now(install_date))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElectricalRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub sections: SectionRecords,
    /// Bumped on every stored write.
    #[serde(default)]
    pub revision: u64,
}

impl ElectricalRecord {
    pub fn new(date: NaiveDate, sections: SectionRecords) -> Self {
        Self {
            date,
            sections,
            revision: 1,
        }
    }

    /// Replaces each named section wholesale; other sections are kept.
    ///
    /// A named section the record does not hold yet is inserted rather than
    /// skipped, so a merge can complete a partially filled date.
    pub fn merge(&mut self, incoming: SectionRecords) {
        for (section, record) in incoming {
            self.sections.insert(section, record);
        }
        self.revision += 1;
    }
}

mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::time::{format_date, parse_date};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&format_date(*date)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_date(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

// Entry forms send months as a fixed-point string ("24.01").
mod decimal {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => n,
            Raw::Text(s) if s.trim().is_empty() => 0.0,
            Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom)?,
        };
        // JSON has no NaN or infinity; they would be written back as null.
        if !value.is_finite() {
            return Err(serde::de::Error::custom(format!("expected a finite number, got {}", value)));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn part(machine: &str, days: i64) -> SectionRecord {
        SectionRecord {
            machine_type: machine.to_string(),
            install_date: Some(date("2024-01-01")),
            life_in_days: days,
            life_in_months: 0.0,
            next_schedule: "2026-01-01".to_string(),
        }
    }

    #[test]
    fn merge_replaces_only_named_sections() {
        let mut record = ElectricalRecord::new(
            date("2025-01-01"),
            SectionRecords::from([
                (Section::TopApron, part("LR", 10)),
                (Section::MiddleApron, part("SUESSEN", 20)),
            ]),
        );
        record.merge(SectionRecords::from([(Section::TopApron, part("JEETS", 1))]));

        assert_eq!(record.sections[&Section::TopApron].machine_type, "JEETS");
        assert_eq!(record.sections[&Section::MiddleApron], part("SUESSEN", 20));
        assert_eq!(record.revision, 2);
    }

    #[test]
    fn accepts_entry_form_payload() {
        let json = serde_json::json!({
            "type": "TOYODA",
            "date": "",
            "lifeInDays": 0,
            "lifeInMonths": "0.00",
            "nextSchedule": "-"
        });
        let parsed: SectionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.machine_type, "TOYODA");
        assert_eq!(parsed.install_date, None);
        assert_eq!(parsed.life_in_months, 0.0);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(part("LR", 3)).unwrap();
        assert_eq!(json["machineType"], "LR");
        assert_eq!(json["installDate"], "2024-01-01");
        assert_eq!(json["lifeInDays"], 3);
    }

    #[test]
    fn merge_inserts_sections_the_record_lacks() {
        let mut record = ElectricalRecord::new(
            date("2025-01-01"),
            SectionRecords::from([(Section::TopApron, part("LR", 10))]),
        );
        record.merge(SectionRecords::from([(Section::BottomApron, part("Savio", 2))]));

        assert_eq!(record.sections.len(), 2);
        assert_eq!(record.sections[&Section::BottomApron], part("Savio", 2));
        assert_eq!(record.sections[&Section::TopApron], part("LR", 10));
    }

    #[test]
    fn rejects_non_finite_months() {
        for raw in ["NaN", "inf", "-Infinity"] {
            let json = serde_json::json!({ "type": "LR", "lifeInMonths": raw });
            assert!(serde_json::from_value::<SectionRecord>(json).is_err());
        }
    }
}
