use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::electrical::{ElectricalRecord, SectionRecords};
use crate::model::production::{DepartmentCounters, ProductionRecord};

pub trait ProductionRepository {
    fn get(&self, date: NaiveDate) -> Result<Option<ProductionRecord>>;
    /// Create-or-increment, applied to the whole document in one write.
    fn increment(&self, date: NaiveDate, deltas: &DepartmentCounters) -> Result<ProductionRecord>;
    /// Replaces the named counters. `None` when no document exists for `date`;
    /// nothing is written in that case.
    fn overwrite(&self, date: NaiveDate, values: &DepartmentCounters) -> Result<Option<ProductionRecord>>;
    fn list(&self) -> Result<Vec<ProductionRecord>>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Updated,
}

pub trait ElectricalRepository {
    fn get(&self, date: NaiveDate) -> Result<Option<ElectricalRecord>>;
    /// Creates the document with exactly `sections`, or replaces just those
    /// sections in the stored one. Lookup and write happen atomically.
    fn merge_sections(&self, date: NaiveDate, sections: SectionRecords) -> Result<(MergeOutcome, ElectricalRecord)>;
    /// In store order.
    fn list(&self) -> Result<Vec<ElectricalRecord>>;
}
