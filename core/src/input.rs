use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::model::department::Department;
use crate::model::electrical::{SectionRecord, SectionRecords};
use crate::model::production::{Counters, DepartmentCounters};
use crate::model::section::Section;
use crate::time::{parse_date, Lifecycle};

/// Splits `KEY:VALUE` arguments.
pub fn parse_args(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| match arg.split_once(':') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(Error::shape("argument", format!("expected KEY:VALUE, got '{}'", arg))),
        })
        .collect()
}

/// Resolves `key` to one candidate by exact match, then unique prefix.
/// Matching ignores ASCII case.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    let key = key.to_ascii_uppercase();

    // 1. Exact match
    if let Some(exact) = candidates.iter().find(|c| c.eq_ignore_ascii_case(&key)) {
        return Ok(exact.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|c| c.to_ascii_uppercase().starts_with(&key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(Error::shape("key", format!("unknown key '{}'", key))),
        _ => Err(Error::shape("key", format!("ambiguous key '{}' matches {:?}", key, matches))),
    }
}

/// `DEPT:PROD/HANDS` entries; `DEPT:PROD` leaves hands at zero.
pub fn parse_production_entries(args: &[String]) -> Result<DepartmentCounters> {
    let names = Department::names();
    let mut departments = DepartmentCounters::new();

    for (key, value) in parse_args(args)? {
        let department: Department = expand_key(&key, &names)?.parse()?;
        let (prod, hands) = value.split_once('/').unwrap_or((value.as_str(), "0"));
        let counters = Counters::new(parse_count(department, prod)?, parse_count(department, hands)?);

        if departments.insert(department, counters).is_some() {
            return Err(Error::shape(department.as_str(), "department given more than once"));
        }
    }

    Ok(departments)
}

/// `SECTION:MACHINE@INSTALL_DATE` entries. Either side of `@` may be empty;
/// lifecycle fields are computed against `now`.
pub fn parse_section_entries(args: &[String], now: DateTime<Utc>) -> Result<SectionRecords> {
    let names = Section::names();
    let mut sections = SectionRecords::new();

    for (key, value) in parse_args(args)? {
        let section: Section = expand_key(&key, &names)?.parse()?;
        let (machine_type, install) = value.split_once('@').unwrap_or((value.as_str(), ""));
        let install_date = match install.trim() {
            "" => None,
            s => Some(parse_date(s)?),
        };

        let record = SectionRecord::new(machine_type.trim(), install_date, Lifecycle::calculate(install_date, now));
        if sections.insert(section, record).is_some() {
            return Err(Error::shape(section.as_str(), "section given more than once"));
        }
    }

    Ok(sections)
}

fn parse_count(department: Department, raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        Error::shape(
            department.as_str(),
            format!("expected a non-negative integer, got '{}'", raw),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&strings(&["MIXING:100/5", "top:LR@2024-01-01"])).unwrap();
        assert_eq!(parsed[0], ("MIXING".to_string(), "100/5".to_string()));
        assert_eq!(parsed[1], ("top".to_string(), "LR@2024-01-01".to_string()));

        assert!(parse_args(&strings(&["MIXING"])).is_err());
        assert!(parse_args(&strings(&[":5"])).is_err());
    }

    #[test]
    fn test_expand_key() {
        let candidates = Department::names();

        assert_eq!(expand_key("mix", &candidates).unwrap(), "MIXING");
        assert_eq!(expand_key("DRG", &candidates).unwrap(), "DRG");
        assert_eq!(expand_key("pa", &candidates).unwrap(), "PACKBAGS");
        assert_eq!(expand_key("br", &candidates).unwrap(), "BR_CDG");

        // Ambiguous: SMX, SPG
        assert!(expand_key("s", &candidates).is_err());
        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_parse_production_entries() {
        let parsed = parse_production_entries(&strings(&["mix:100/5", "comber:20"])).unwrap();
        assert_eq!(parsed[&Department::Mixing], Counters::new(100, 5));
        assert_eq!(parsed[&Department::Comber], Counters::new(20, 0));

        assert!(parse_production_entries(&strings(&["mix:-1/5"])).unwrap_err().is_shape());
        assert!(parse_production_entries(&strings(&["mix:1/1", "MIXING:2/2"])).is_err());
    }

    #[test]
    fn test_parse_section_entries() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        let parsed = parse_section_entries(&strings(&["top:LR@2024-10-17", "mid:TOYODA"]), now).unwrap();

        let top = &parsed[&Section::TopApron];
        assert_eq!(top.machine_type, "LR");
        assert_eq!(top.install_date, NaiveDate::from_ymd_opt(2024, 10, 17));
        assert_eq!(top.next_schedule, "2026-10-17");

        let middle = &parsed[&Section::MiddleApron];
        assert_eq!(middle.install_date, None);
        assert_eq!(middle.next_schedule, "-");
        assert_eq!(middle.life_in_days, 0);

        assert!(parse_section_entries(&strings(&["top:LR@2024-13-01"]), now).is_err());
    }
}
