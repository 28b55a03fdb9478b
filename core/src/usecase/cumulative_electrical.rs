use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::model::electrical::ElectricalRecord;
use crate::model::section::Section;
use crate::model::summary::ElectricalSummary;
use crate::repository::ElectricalRepository;
use crate::time::round2;

pub struct CumulativeElectricalUseCase<'a, R: ElectricalRepository> {
    repo: &'a R,
}

impl<'a, R: ElectricalRepository> CumulativeElectricalUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn summarize(&self, until: NaiveDate) -> Result<ElectricalSummary> {
        let records = self.repo.list()?;
        Ok(accumulate_until(&records, until))
    }
}

/// Folds every record dated on or before `until`, in store order.
///
/// `lifeInDays` and `lifeInMonths` are summed across all contributing records,
/// which is a running total over history rather than the installed part's
/// age. Machine type and next schedule take the last non-empty value seen;
/// records are not sorted first, so "last" means store order.
pub fn accumulate_until(records: &[ElectricalRecord], until: NaiveDate) -> ElectricalSummary {
    let mut summary = ElectricalSummary::new();
    let mut matched = 0usize;

    for record in records.iter().filter(|r| r.date <= until) {
        matched += 1;
        for section in Section::ALL {
            let Some(part) = record.sections.get(&section) else {
                continue;
            };
            let totals = summary.get_mut(section);
            totals.life_in_days = totals.life_in_days.saturating_add(part.life_in_days);
            totals.life_in_months += part.life_in_months;
            if !part.next_schedule.is_empty() {
                totals.next_schedule = part.next_schedule.clone();
            }
            if !part.machine_type.is_empty() {
                totals.machine_type = part.machine_type.clone();
            }
        }
    }

    for totals in summary.sections.values_mut() {
        totals.life_in_months = round2(totals.life_in_months);
    }

    debug!(%until, records = matched, "electrical history accumulated");
    summary
}
