pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::Config;
pub use error::{Error, Result};
pub use model::department::Department;
pub use model::electrical::{ElectricalRecord, SectionRecord, SectionRecords};
pub use model::production::{Counters, DepartmentCounters, ProductionRecord};
pub use model::section::Section;
pub use model::summary::{ElectricalSummary, ProductionSummary, SectionTotals};
pub use repository::{
    ElectricalRepository, FileElectricalRepository, FileProductionRepository, MergeOutcome,
    ProductionRepository,
};
pub use service::dto::{ElectricalPayload, ProductionPayload, SectionHistoryRow};
pub use service::electrical_service::ElectricalService;
pub use service::production_service::ProductionService;
pub use time::{parse_date, Lifecycle, MonthToken};
