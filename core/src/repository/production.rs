use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use super::json_file::{JsonCollection, Write};
use super::traits::ProductionRepository;
use crate::error::Result;
use crate::model::production::{DepartmentCounters, ProductionRecord};

const PRODUCTION_FILE_NAME: &str = "production.json";

pub struct FileProductionRepository {
    collection: JsonCollection<ProductionRecord>,
}

impl FileProductionRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            collection: JsonCollection::open(base_dir, PRODUCTION_FILE_NAME)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.collection.path()
    }
}

impl ProductionRepository for FileProductionRepository {
    fn get(&self, date: NaiveDate) -> Result<Option<ProductionRecord>> {
        let records = self.collection.read()?;
        Ok(records.into_iter().find(|r| r.date == date))
    }

    fn increment(&self, date: NaiveDate, deltas: &DepartmentCounters) -> Result<ProductionRecord> {
        self.collection.mutate(|records| {
            let pos = match records.iter().position(|r| r.date == date) {
                Some(pos) => pos,
                None => {
                    debug!(%date, "creating production record");
                    records.push(ProductionRecord::new(date));
                    records.len() - 1
                }
            };
            records[pos].increment(deltas);
            Ok(Write::Commit(records[pos].clone()))
        })
    }

    fn overwrite(&self, date: NaiveDate, values: &DepartmentCounters) -> Result<Option<ProductionRecord>> {
        self.collection.mutate(|records| {
            match records.iter_mut().find(|r| r.date == date) {
                Some(record) => {
                    record.overwrite(values);
                    Ok(Write::Commit(Some(record.clone())))
                }
                None => Ok(Write::Skip(None)),
            }
        })
    }

    fn list(&self) -> Result<Vec<ProductionRecord>> {
        self.collection.read()
    }
}
