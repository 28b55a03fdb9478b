use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use millboard_core::{
    Department, ElectricalRecord, ElectricalSummary, ProductionRecord, ProductionSummary, Section,
    SectionHistoryRow,
};

#[derive(Tabled)]
struct CounterRow {
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Production")]
    production: u64,
    #[tabled(rename = "Hands")]
    hands: u64,
}

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Section")]
    section: String,
    #[tabled(rename = "Machine")]
    machine: String,
    #[tabled(rename = "Installed")]
    installed: String,
    #[tabled(rename = "Life (d)")]
    days: i64,
    #[tabled(rename = "Life (m)")]
    months: String,
    #[tabled(rename = "Next Schedule")]
    next: String,
}

#[derive(Tabled)]
struct TotalsRow {
    #[tabled(rename = "Section")]
    section: String,
    #[tabled(rename = "Machine")]
    machine: String,
    #[tabled(rename = "Life (d)")]
    days: i64,
    #[tabled(rename = "Life (m)")]
    months: String,
    #[tabled(rename = "Next Schedule")]
    next: String,
}

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Section")]
    section: String,
    #[tabled(rename = "Machine Types")]
    machines: String,
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    println!("{}", table);
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Every department of one date, zeros included.
pub fn print_production_record(record: &ProductionRecord) {
    println!("\x1b[1;36m{}\x1b[0m", record.date);
    let rows = Department::ALL
        .iter()
        .map(|dept| {
            let counters = record.counters(*dept);
            CounterRow {
                department: dept.to_string(),
                production: counters.on_date_production,
                hands: counters.on_date_hands,
            }
        })
        .collect();
    print_table::<CounterRow>(rows);
}

pub fn print_production_summary(month: &str, summary: &ProductionSummary) {
    let totals = summary.totals();
    println!(
        "\x1b[1;36mMonth {}\x1b[0m (Production: {}, Hands: {})",
        month, totals.on_date_production, totals.on_date_hands
    );
    let rows = summary
        .departments
        .iter()
        .map(|(dept, counters)| CounterRow {
            department: dept.to_string(),
            production: counters.on_date_production,
            hands: counters.on_date_hands,
        })
        .collect();
    print_table::<CounterRow>(rows);
}

pub fn print_electrical_records(records: &[ElectricalRecord]) {
    let mut rows = Vec::new();
    for record in records {
        for (i, (section, part)) in record.sections.iter().enumerate() {
            // Date column: only on the first row of each record
            let date = if i == 0 { record.date.to_string() } else { String::new() };
            rows.push(SectionRow {
                date,
                section: section.to_string(),
                machine: or_dash(&part.machine_type),
                installed: part.install_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                days: part.life_in_days,
                months: format!("{:.2}", part.life_in_months),
                next: or_dash(&part.next_schedule),
            });
        }
    }
    print_table(rows);
}

pub fn print_electrical_summary(until: &str, summary: &ElectricalSummary) {
    println!("\x1b[1;36mOn or before {}\x1b[0m", until);
    let rows = summary
        .sections
        .iter()
        .map(|(section, totals)| TotalsRow {
            section: section.to_string(),
            machine: or_dash(&totals.machine_type),
            days: totals.life_in_days,
            months: format!("{:.2}", totals.life_in_months),
            next: or_dash(&totals.next_schedule),
        })
        .collect();
    print_table::<TotalsRow>(rows);
}

pub fn print_section_history(rows: &[SectionHistoryRow]) {
    let rows = rows
        .iter()
        .map(|row| SectionRow {
            date: row.date.to_string(),
            section: row.section.to_string(),
            machine: or_dash(&row.machine_type),
            installed: row.install_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            days: row.life_in_days,
            months: format!("{:.2}", row.life_in_months),
            next: or_dash(&row.next_schedule),
        })
        .collect();
    print_table::<SectionRow>(rows);
}

pub fn print_catalog() {
    let rows = Section::ALL
        .iter()
        .map(|section| CatalogRow {
            section: section.to_string(),
            machines: section.machine_types().join(", "),
        })
        .collect();
    print_table::<CatalogRow>(rows);
}
