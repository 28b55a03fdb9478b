use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};
use crate::model::production::{DepartmentCounters, ProductionRecord};
use crate::model::summary::ProductionSummary;
use crate::repository::ProductionRepository;
use crate::service::dto::ProductionPayload;
use crate::time::{format_date, MonthToken};
use crate::usecase::cumulative_production::CumulativeProductionUseCase;

/// Daily production counters.
///
/// `add` is create-or-increment; `update` is overwrite-only-if-exists and
/// never creates a document.
pub struct ProductionService<R: ProductionRepository> {
    repo: R,
}

impl<R: ProductionRepository> ProductionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    #[instrument(skip(self, deltas), fields(departments = deltas.len()))]
    pub fn add(&self, date: NaiveDate, deltas: &DepartmentCounters) -> Result<ProductionRecord> {
        let record = self.repo.increment(date, deltas)?;
        info!(date = %format_date(date), "production incremented");
        Ok(record)
    }

    #[instrument(skip(self, values), fields(departments = values.len()))]
    pub fn update(&self, date: NaiveDate, values: &DepartmentCounters) -> Result<ProductionRecord> {
        match self.repo.overwrite(date, values)? {
            Some(record) => {
                info!(date = %format_date(date), "production overwritten");
                Ok(record)
            }
            None => {
                warn!(date = %format_date(date), "update rejected, no production record");
                Err(Error::NotFound(format!(
                    "no production data found for {}",
                    format_date(date)
                )))
            }
        }
    }

    pub fn add_payload(&self, payload: &ProductionPayload) -> Result<ProductionRecord> {
        self.add(payload.date, &payload.departments)
    }

    pub fn update_payload(&self, payload: &ProductionPayload) -> Result<ProductionRecord> {
        self.update(payload.date, &payload.departments)
    }

    pub fn get(&self, date: NaiveDate) -> Result<Option<ProductionRecord>> {
        self.repo.get(date)
    }

    #[instrument(skip(self))]
    pub fn cumulative(&self, month: MonthToken) -> Result<ProductionSummary> {
        CumulativeProductionUseCase::new(&self.repo).summarize(month)
    }
}
