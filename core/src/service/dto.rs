use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::department::Department;
use crate::model::electrical::{ElectricalRecord, SectionRecord, SectionRecords};
use crate::model::production::{Counters, DepartmentCounters};
use crate::model::section::Section;
use crate::time::parse_date;

/// Body of an add/update production request:
/// `{ "date": "YYYY-MM-DD", "<DEPT>": { "onDateProduction": n, "onDateHands": n }, ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionPayload {
    pub date: NaiveDate,
    pub departments: DepartmentCounters,
}

impl ProductionPayload {
    pub fn new(date: NaiveDate, departments: DepartmentCounters) -> Self {
        Self { date, departments }
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Self::from_json(&parse_body(input)?)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let body = as_object(value, "body")?;
        let date = required_date(body)?;

        let mut departments = DepartmentCounters::new();
        for (key, entry) in body.iter().filter(|(key, _)| key.as_str() != "date") {
            let department: Department = key.parse()?;
            if !entry.is_object() {
                return Err(Error::shape(key.as_str(), "expected an object of counters"));
            }
            let counters: Counters = serde_json::from_value(entry.clone())
                .map_err(|e| Error::shape(key.as_str(), e.to_string()))?;
            departments.insert(department, counters);
        }

        Ok(Self { date, departments })
    }
}

/// Body of an electrical merge request:
/// `{ "date": "YYYY-MM-DD", "sections": { "<SECTION>": { ... }, ... } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectricalPayload {
    pub date: NaiveDate,
    pub sections: SectionRecords,
}

impl ElectricalPayload {
    pub fn new(date: NaiveDate, sections: SectionRecords) -> Self {
        Self { date, sections }
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Self::from_json(&parse_body(input)?)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let body = as_object(value, "body")?;
        let date = required_date(body)?;

        let raw_sections = body
            .get("sections")
            .ok_or_else(|| Error::shape("sections", "missing"))?;
        let raw_sections = as_object(raw_sections, "sections")?;

        let mut sections = SectionRecords::new();
        for (key, entry) in raw_sections {
            let section: Section = key.parse()?;
            if !entry.is_object() {
                return Err(Error::shape(key.as_str(), "expected a section object"));
            }
            let record: SectionRecord = serde_json::from_value(entry.clone())
                .map_err(|e| Error::shape(key.as_str(), e.to_string()))?;
            sections.insert(section, record);
        }

        Ok(Self { date, sections })
    }
}

/// One section of one record, flattened for history listings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionHistoryRow {
    pub date: NaiveDate,
    pub section: Section,
    pub machine_type: String,
    pub install_date: Option<NaiveDate>,
    pub life_in_days: i64,
    pub life_in_months: f64,
    pub next_schedule: String,
}

impl SectionHistoryRow {
    pub fn from_record(record: &ElectricalRecord, section: Section) -> Option<Self> {
        let part = record.sections.get(&section)?;
        Some(Self {
            date: record.date,
            section,
            machine_type: part.machine_type.clone(),
            install_date: part.install_date,
            life_in_days: part.life_in_days,
            life_in_months: part.life_in_months,
            next_schedule: part.next_schedule.clone(),
        })
    }
}

fn parse_body(input: &str) -> Result<Value> {
    serde_json::from_str(input).map_err(|e| Error::shape("body", e.to_string()))
}

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::shape(field, "expected a JSON object"))
}

fn required_date(body: &Map<String, Value>) -> Result<NaiveDate> {
    match body.get("date") {
        Some(Value::String(s)) if !s.trim().is_empty() => parse_date(s),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(Error::shape("date", "missing")),
        Some(_) => Err(Error::shape("date", "expected a YYYY-MM-DD string")),
    }
}
