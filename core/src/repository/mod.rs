mod json_file;
pub mod electrical;
pub mod production;
pub mod traits;

// Re-export
pub use electrical::FileElectricalRepository;
pub use production::FileProductionRepository;
pub use traits::{ElectricalRepository, MergeOutcome, ProductionRepository};
