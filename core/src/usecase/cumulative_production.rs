use tracing::debug;

use crate::error::Result;
use crate::model::department::Department;
use crate::model::production::ProductionRecord;
use crate::model::summary::ProductionSummary;
use crate::repository::ProductionRepository;
use crate::time::MonthToken;

pub struct CumulativeProductionUseCase<'a, R: ProductionRepository> {
    repo: &'a R,
}

impl<'a, R: ProductionRepository> CumulativeProductionUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn summarize(&self, month: MonthToken) -> Result<ProductionSummary> {
        let records = self.repo.list()?;
        Ok(sum_month(&records, month))
    }
}

/// Sums every department over the records dated within `month`.
pub fn sum_month(records: &[ProductionRecord], month: MonthToken) -> ProductionSummary {
    let mut summary = ProductionSummary::new();
    let mut matched = 0usize;

    for record in records.iter().filter(|r| month.contains(r.date)) {
        matched += 1;
        for department in Department::ALL {
            summary.add(department, record.counters(department));
        }
    }

    debug!(%month, records = matched, "production month summed");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::production::{Counters, DepartmentCounters};
    use chrono::NaiveDate;

    fn record(date: &str, entries: &[(Department, u64, u64)]) -> ProductionRecord {
        let mut record = ProductionRecord::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap());
        let deltas: DepartmentCounters = entries
            .iter()
            .map(|(d, p, h)| (*d, Counters::new(*p, *h)))
            .collect();
        record.increment(&deltas);
        record
    }

    #[test]
    fn test_sums_only_matching_month() {
        let records = vec![
            record("2025-04-01", &[(Department::Mixing, 100, 5), (Department::Drg, 10, 1)]),
            record("2025-04-30", &[(Department::Mixing, 20, 1)]),
            record("2025-05-01", &[(Department::Mixing, 999, 99)]),
            record("2024-04-15", &[(Department::Mixing, 999, 99)]),
        ];

        let summary = sum_month(&records, MonthToken::parse("2025-04").unwrap());

        assert_eq!(summary.get(Department::Mixing), Counters::new(120, 6));
        assert_eq!(summary.get(Department::Drg), Counters::new(10, 1));
        assert_eq!(summary.get(Department::Packbags), Counters::default());
    }

    #[test]
    fn test_no_records_still_lists_every_department() {
        let summary = sum_month(&[], MonthToken::parse("2025-04").unwrap());
        assert_eq!(summary.departments.len(), Department::ALL.len());
        assert_eq!(summary.totals(), Counters::default());
    }

    #[test]
    fn test_matches_recomputation_from_scratch() {
        let records = vec![
            record("2025-06-01", &[(Department::Spg, 3, 1), (Department::Smx, 4, 2)]),
            record("2025-06-02", &[(Department::Spg, 5, 1)]),
            record("2025-06-03", &[(Department::Acwdg, 7, 3)]),
        ];
        let summary = sum_month(&records, MonthToken::parse("2025-06").unwrap());

        for department in Department::ALL {
            let prod: u64 = records.iter().map(|r| r.counters(department).on_date_production).sum();
            let hands: u64 = records.iter().map(|r| r.counters(department).on_date_hands).sum();
            assert_eq!(summary.get(department), Counters::new(prod, hands));
        }
    }
}
