mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use millboard_core::input::{parse_production_entries, parse_section_entries};
use millboard_core::{
    parse_date, Config, ElectricalPayload, ElectricalService, FileElectricalRepository,
    FileProductionRepository, MergeOutcome, MonthToken, ProductionPayload, ProductionService,
    Section,
};

const LOG_ENV: &str = "MILLBOARD_LOG";

#[derive(Parser)]
#[command(name = "millboard")]
#[command(about = "Mill production counters and electrical maintenance rollups", long_about = None)]
struct Cli {
    /// Data directory (defaults to $MILLBOARD_DATA_DIR or ~/.millboard)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily per-department production counters
    Production {
        #[command(subcommand)]
        action: ProductionAction,
    },
    /// Per-section electrical component install dates
    Electrical {
        #[command(subcommand)]
        action: ElectricalAction,
    },
}

#[derive(Subcommand)]
enum ProductionAction {
    /// Add to a date's counters, creating the date if needed (usage: add 2025-04-01 mix:100/5 comber:20/1)
    Add(ProductionWrite),
    /// Overwrite counters of an existing date
    Update(ProductionWrite),
    /// Show the stored counters for a date
    Show { date: String },
    /// Sum every department over a month (YYYY-MM)
    Cumulative { month: String },
}

#[derive(clap::Args)]
struct ProductionWrite {
    /// JSON request body ({"date": ..., "<DEPT>": {...}}) instead of arguments
    #[arg(long, conflicts_with_all = ["date", "entries"])]
    payload: Option<PathBuf>,

    #[arg(required_unless_present = "payload")]
    date: Option<String>,

    /// DEPT:PROD/HANDS entries; department names accept unique prefixes
    #[arg(required_unless_present = "payload")]
    entries: Vec<String>,
}

#[derive(Subcommand)]
enum ElectricalAction {
    /// Record install dates for a date, replacing only the named sections
    /// (usage: merge 2025-04-01 top:LR@2024-01-01 bottom:Savio@2023-06-15)
    Merge {
        /// JSON request body ({"date": ..., "sections": {...}}) instead of arguments
        #[arg(long, conflicts_with_all = ["date", "entries"])]
        payload: Option<PathBuf>,

        #[arg(required_unless_present = "payload")]
        date: Option<String>,

        /// SECTION:MACHINE@INSTALL_DATE entries
        #[arg(required_unless_present = "payload")]
        entries: Vec<String>,
    },
    /// List every record, newest first
    List,
    /// Accumulate lifecycle figures for records on or before a date
    Cumulative { date: String },
    /// Show every stored entry for one section
    History { section: String },
    /// Show the machine types offered per section
    Catalog,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn read_payload(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read payload {}", path.display()))
}

fn production_payload(write: &ProductionWrite) -> Result<ProductionPayload> {
    if let Some(path) = &write.payload {
        return Ok(ProductionPayload::from_json_str(&read_payload(path)?)?);
    }
    let date = parse_date(write.date.as_deref().unwrap_or_default())?;
    let departments = parse_production_entries(&write.entries)?;
    Ok(ProductionPayload::new(date, departments))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_production(action: ProductionAction, config: &Config, as_json: bool) -> Result<()> {
    let service = ProductionService::new(FileProductionRepository::new(Some(config.data_dir.clone()))?);

    match action {
        ProductionAction::Add(write) => {
            let payload = production_payload(&write)?;
            let record = service.add_payload(&payload)?;
            if as_json {
                print_json(&json!({ "message": "Production data added or updated successfully", "record": record }))?;
            } else {
                println!("Production data added for {}.", payload.date);
                report::print_production_record(&record);
            }
        }
        ProductionAction::Update(write) => {
            let payload = production_payload(&write)?;
            let record = service.update_payload(&payload)?;
            if as_json {
                print_json(&json!({ "message": "Production data updated successfully.", "record": record }))?;
            } else {
                println!("Production data updated for {}.", payload.date);
                report::print_production_record(&record);
            }
        }
        ProductionAction::Show { date } => {
            let date = parse_date(&date)?;
            match service.get(date)? {
                Some(record) if as_json => print_json(&record)?,
                Some(record) => report::print_production_record(&record),
                None if as_json => print_json(&json!({}))?,
                None => println!("No production data for {}.", date),
            }
        }
        ProductionAction::Cumulative { month } => {
            let month = MonthToken::parse(&month)?;
            let summary = service.cumulative(month)?;
            if as_json {
                print_json(&summary)?;
            } else {
                report::print_production_summary(&month.to_string(), &summary);
            }
        }
    }
    Ok(())
}

fn run_electrical(action: ElectricalAction, config: &Config, as_json: bool) -> Result<()> {
    let service = ElectricalService::new(FileElectricalRepository::new(Some(config.data_dir.clone()))?);

    match action {
        ElectricalAction::Merge { payload, date, entries } => {
            let payload = match payload {
                Some(path) => ElectricalPayload::from_json_str(&read_payload(&path)?)?,
                None => ElectricalPayload::new(
                    parse_date(date.as_deref().unwrap_or_default())?,
                    parse_section_entries(&entries, Utc::now())?,
                ),
            };
            let (outcome, record) = service.merge_payload(payload)?;
            let message = match outcome {
                MergeOutcome::Created => "Data added successfully!",
                MergeOutcome::Updated => "Data updated successfully!",
            };
            if as_json {
                print_json(&json!({ "message": message, "outcome": outcome, "record": record }))?;
            } else {
                println!("{} ({}, revision {})", message, record.date, record.revision);
            }
        }
        ElectricalAction::List => {
            let records = service.list_all()?;
            if as_json {
                print_json(&json!({ "success": true, "count": records.len(), "data": records }))?;
            } else {
                report::print_electrical_records(&records);
            }
        }
        ElectricalAction::Cumulative { date } => {
            let date = parse_date(&date)?;
            let summary = service.cumulative(date)?;
            if as_json {
                print_json(&summary)?;
            } else {
                report::print_electrical_summary(&date.to_string(), &summary);
            }
        }
        ElectricalAction::History { section } => {
            let section: Section = section.parse()?;
            let rows = service.section_history(section)?;
            if as_json {
                print_json(&rows)?;
            } else if rows.is_empty() {
                println!("No entries for {}.", section);
            } else {
                report::print_section_history(&rows);
            }
        }
        ElectricalAction::Catalog => {
            if as_json {
                let catalog: serde_json::Map<String, serde_json::Value> = Section::ALL
                    .iter()
                    .map(|s| (s.to_string(), json!(s.machine_types())))
                    .collect();
                print_json(&catalog)?;
            } else {
                report::print_catalog();
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::from_env()?.with_override(cli.data_dir);
    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");

    match cli.command {
        Commands::Production { action } => run_production(action, &config, cli.json),
        Commands::Electrical { action } => run_electrical(action, &config, cli.json),
    }
}
