use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::json_file::{JsonCollection, Write};
use super::traits::{ElectricalRepository, MergeOutcome};
use crate::error::Result;
use crate::model::electrical::{ElectricalRecord, SectionRecords};

const ELECTRICAL_FILE_NAME: &str = "electrical.json";

pub struct FileElectricalRepository {
    collection: JsonCollection<ElectricalRecord>,
}

impl FileElectricalRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            collection: JsonCollection::open(base_dir, ELECTRICAL_FILE_NAME)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.collection.path()
    }
}

impl ElectricalRepository for FileElectricalRepository {
    fn get(&self, date: NaiveDate) -> Result<Option<ElectricalRecord>> {
        let records = self.collection.read()?;
        Ok(records.into_iter().find(|r| r.date == date))
    }

    fn merge_sections(&self, date: NaiveDate, sections: SectionRecords) -> Result<(MergeOutcome, ElectricalRecord)> {
        self.collection.mutate(|records| {
            if let Some(record) = records.iter_mut().find(|r| r.date == date) {
                record.merge(sections);
                return Ok(Write::Commit((MergeOutcome::Updated, record.clone())));
            }
            let record = ElectricalRecord::new(date, sections);
            records.push(record.clone());
            Ok(Write::Commit((MergeOutcome::Created, record)))
        })
    }

    fn list(&self) -> Result<Vec<ElectricalRecord>> {
        self.collection.read()
    }
}
