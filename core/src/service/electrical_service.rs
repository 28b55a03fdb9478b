use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::model::electrical::{ElectricalRecord, SectionRecords};
use crate::model::section::Section;
use crate::model::summary::ElectricalSummary;
use crate::repository::{ElectricalRepository, MergeOutcome};
use crate::service::dto::{ElectricalPayload, SectionHistoryRow};
use crate::time::format_date;
use crate::usecase::cumulative_electrical::CumulativeElectricalUseCase;

pub struct ElectricalService<R: ElectricalRepository> {
    repo: R,
}

impl<R: ElectricalRepository> ElectricalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates the date's record, or replaces only the named sections of the
    /// existing one. Sections not named are left as stored.
    #[instrument(skip(self, sections), fields(sections = sections.len()))]
    pub fn merge(&self, date: NaiveDate, sections: SectionRecords) -> Result<(MergeOutcome, ElectricalRecord)> {
        let (outcome, record) = self.repo.merge_sections(date, sections)?;
        info!(date = %format_date(date), ?outcome, revision = record.revision, "electrical record merged");
        Ok((outcome, record))
    }

    pub fn merge_payload(&self, payload: ElectricalPayload) -> Result<(MergeOutcome, ElectricalRecord)> {
        self.merge(payload.date, payload.sections)
    }

    pub fn get(&self, date: NaiveDate) -> Result<Option<ElectricalRecord>> {
        self.repo.get(date)
    }

    /// All records, newest date first.
    pub fn list_all(&self) -> Result<Vec<ElectricalRecord>> {
        let mut records = self.repo.list()?;
        if records.is_empty() {
            return Err(Error::NotFound("no electrical records found".to_string()));
        }
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    #[instrument(skip(self))]
    pub fn cumulative(&self, until: NaiveDate) -> Result<ElectricalSummary> {
        CumulativeElectricalUseCase::new(&self.repo).summarize(until)
    }

    /// Every stored entry for one section, newest date first.
    pub fn section_history(&self, section: Section) -> Result<Vec<SectionHistoryRow>> {
        let mut records = self.repo.list()?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records
            .iter()
            .filter_map(|record| SectionHistoryRow::from_record(record, section))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::electrical::SectionRecord;
    use crate::repository::FileElectricalRepository;
    use crate::time::Lifecycle;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> ElectricalService<FileElectricalRepository> {
        ElectricalService::new(FileElectricalRepository::new(Some(dir.path().to_path_buf())).unwrap())
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn part(machine: &str, days: i64) -> SectionRecord {
        SectionRecord {
            machine_type: machine.to_string(),
            life_in_days: days,
            ..SectionRecord::default()
        }
    }

    #[test]
    fn test_merge_creates_then_replaces_named_sections() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let day = date("2025-01-01");

        let (outcome, _) = service
            .merge(
                day,
                SectionRecords::from([
                    (Section::TopApron, part("LR", 10)),
                    (Section::MiddleApron, part("SUESSEN", 20)),
                ]),
            )
            .unwrap();
        assert_eq!(outcome, MergeOutcome::Created);

        let (outcome, record) = service
            .merge(day, SectionRecords::from([(Section::TopApron, part("TOYODA", 1))]))
            .unwrap();
        assert_eq!(outcome, MergeOutcome::Updated);
        assert_eq!(record.sections[&Section::TopApron], part("TOYODA", 1));
        assert_eq!(record.sections[&Section::MiddleApron], part("SUESSEN", 20));
        assert!(!record.sections.contains_key(&Section::BottomApron));
    }

    #[test]
    fn test_list_all_sorts_newest_first() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        for d in ["2025-02-01", "2025-03-01", "2025-01-01"] {
            service
                .merge(date(d), SectionRecords::from([(Section::TopApron, part("LR", 1))]))
                .unwrap();
        }

        let dates: Vec<_> = service.list_all().unwrap().iter().map(|r| format_date(r.date)).collect();
        assert_eq!(dates, vec!["2025-03-01", "2025-02-01", "2025-01-01"]);
    }

    #[test]
    fn test_list_all_empty_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(service(&dir).list_all().unwrap_err().is_not_found());
    }

    #[test]
    fn test_cumulative_sums_history() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        service
            .merge(date("2025-01-01"), SectionRecords::from([(Section::TopApron, part("LR", 10))]))
            .unwrap();
        service
            .merge(date("2025-02-01"), SectionRecords::from([(Section::TopApron, part("LR", 5))]))
            .unwrap();
        service
            .merge(date("2025-03-01"), SectionRecords::from([(Section::TopApron, part("LR", 100))]))
            .unwrap();

        let summary = service.cumulative(date("2025-02-15")).unwrap();
        assert_eq!(summary.get(Section::TopApron).life_in_days, 15);
        assert_eq!(summary.get(Section::MiddleApron).life_in_days, 0);
    }

    #[test]
    fn test_merge_payload_with_computed_lifecycle() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        let install = Some(date("2024-10-17"));
        let top = SectionRecord::new("Rieter", install, Lifecycle::calculate(install, now));

        let payload = ElectricalPayload::new(date("2026-10-17"), SectionRecords::from([(Section::TopApron, top)]));
        let (_, record) = service.merge_payload(payload).unwrap();

        let stored = &record.sections[&Section::TopApron];
        assert_eq!(stored.next_schedule, "2026-10-17");
        assert_eq!(stored.life_in_days, 731);
        assert_eq!(service.get(date("2026-10-17")).unwrap(), Some(record));
    }

    #[test]
    fn test_section_history() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        service
            .merge(date("2025-01-01"), SectionRecords::from([(Section::BottomApron, part("Savio", 3))]))
            .unwrap();
        service
            .merge(date("2025-02-01"), SectionRecords::from([(Section::TopApron, part("LR", 4))]))
            .unwrap();
        service
            .merge(date("2025-03-01"), SectionRecords::from([(Section::BottomApron, part("Other", 9))]))
            .unwrap();

        let rows = service.section_history(Section::BottomApron).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].machine_type, "Other");
        assert_eq!(rows[1].date, date("2025-01-01"));
        assert!(service.section_history(Section::MiddleApron).unwrap().is_empty());
    }
}
