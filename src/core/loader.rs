//! Record Loader: parses the tab-separated roster and vaccine table.

use crate::core::{Result, RosterEntry, VaccineRule, VaccineTable};
use crate::domain::dates::parse_us_date;
use crate::utils::error::ReminderError;
use chrono::{Datelike, NaiveDate};

const ROSTER_SOURCE: &str = "roster";
const VACCINE_SOURCE: &str = "vaccine table";
const ROSTER_FIELDS: usize = 4;
const VACCINE_FIELDS: usize = 2;

/// Whole years between `dob` and `today`, counting the birthday itself as reached.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year() - 1;
    if (dob.month(), dob.day()) <= (today.month(), today.day()) {
        age += 1;
    }
    age
}

fn tsv_reader(data: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(data)
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn malformed(source_name: &str, line: u64, reason: String) -> ReminderError {
    ReminderError::MalformedRecordError {
        source_name: source_name.to_string(),
        line,
        reason,
    }
}

/// `name \t MM/DD/YYYY \t address \t phone` per line. Any bad line aborts the load.
pub fn parse_roster(data: &[u8], today: NaiveDate) -> Result<Vec<RosterEntry>> {
    let mut reader = tsv_reader(data);
    let mut entries = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = line_of(&record);

        if record.len() != ROSTER_FIELDS {
            return Err(malformed(
                ROSTER_SOURCE,
                line,
                format!("expected {} fields, found {}", ROSTER_FIELDS, record.len()),
            ));
        }

        let dob = parse_us_date(&record[1])
            .map_err(|e| malformed(ROSTER_SOURCE, line, e.to_string()))?;

        entries.push(RosterEntry {
            name: record[0].to_string(),
            dob,
            address: record[2].to_string(),
            phone_number: record[3].trim_end().to_string(),
            age: calculate_age(dob, today),
        });
    }

    tracing::debug!("Parsed {} roster entries", entries.len());
    Ok(entries)
}

/// `age \t vaccine` per line. With `drop_trailer_line` the final line of the
/// feed is a trailer, not a rule, and is discarded.
pub fn parse_vaccine_table(data: &[u8], drop_trailer_line: bool) -> Result<VaccineTable> {
    let mut reader = tsv_reader(data);
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    if drop_trailer_line {
        if let Some(trailer) = rows.pop() {
            tracing::debug!("Dropping vaccine table trailer at line {}", line_of(&trailer));
        }
    }

    let mut rules = Vec::with_capacity(rows.len());
    for record in rows {
        let line = line_of(&record);
        if record.len() != VACCINE_FIELDS {
            return Err(malformed(
                VACCINE_SOURCE,
                line,
                format!("expected {} fields, found {}", VACCINE_FIELDS, record.len()),
            ));
        }

        let min_age: i32 = record[0].trim().parse().map_err(|_| {
            malformed(
                VACCINE_SOURCE,
                line,
                format!("age '{}' is not a whole number", &record[0]),
            )
        })?;

        rules.push(VaccineRule {
            min_age,
            vaccine_name: record[1].trim_end().to_string(),
        });
    }

    Ok(VaccineTable::new(rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_on_and_before_birthday() {
        let dob = date(2000, 1, 1);
        assert_eq!(calculate_age(dob, date(2020, 1, 1)), 20);
        assert_eq!(calculate_age(dob, date(2019, 12, 31)), 19);
    }

    #[test]
    fn test_age_same_month_later_day() {
        let dob = date(1990, 6, 20);
        assert_eq!(calculate_age(dob, date(2020, 6, 19)), 29);
        assert_eq!(calculate_age(dob, date(2020, 6, 20)), 30);
        assert_eq!(calculate_age(dob, date(2020, 7, 1)), 30);
    }

    #[test]
    fn test_parse_roster_lines() {
        let data = "Ada Lovelace\t01/01/2000\t12 Main St, Springfield\t555-0100\n\
                    Alan Turing\t6/23/1952\t3 Bletchley Rd\t555-0199\n";
        let entries = parse_roster(data.as_bytes(), date(2020, 1, 1)).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Ada Lovelace");
        assert_eq!(entries[0].dob, date(2000, 1, 1));
        assert_eq!(entries[0].address, "12 Main St, Springfield");
        assert_eq!(entries[0].phone_number, "555-0100");
        assert_eq!(entries[0].age, 20);
        assert_eq!(entries[1].dob, date(1952, 6, 23));
        assert_eq!(entries[1].age, 67);
    }

    #[test]
    fn test_parse_roster_strips_crlf_from_phone() {
        let data = "Ada\t01/01/2000\t12 Main St\t555-0100\r\n";
        let entries = parse_roster(data.as_bytes(), date(2020, 1, 1)).unwrap();
        assert_eq!(entries[0].phone_number, "555-0100");
    }

    #[test]
    fn test_parse_roster_rejects_wrong_field_count() {
        let data = "Ada\t01/01/2000\t12 Main St\t555-0100\nBroken\t01/01/2000\n";
        let err = parse_roster(data.as_bytes(), date(2020, 1, 1)).unwrap_err();
        match err {
            ReminderError::MalformedRecordError { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_roster_rejects_bad_date() {
        let data = "Ada\t01/xx/2000\t12 Main St\t555-0100\n";
        let err = parse_roster(data.as_bytes(), date(2020, 1, 1)).unwrap_err();
        assert!(matches!(err, ReminderError::MalformedRecordError { line: 1, .. }));
    }

    #[test]
    fn test_vaccine_table_drops_trailer_line() {
        let data = "18\tTdap\n50\tShingles\n65\tPneumococcal\n";
        let table = parse_vaccine_table(data.as_bytes(), true).unwrap();
        let names: Vec<&str> = table.rules().iter().map(|r| r.vaccine_name.as_str()).collect();
        assert_eq!(names, vec!["Tdap", "Shingles"]);
        assert_eq!(table.rules()[1].min_age, 50);
    }

    #[test]
    fn test_vaccine_table_keeps_every_line_without_trailer() {
        let data = "18\tTdap\n50\tShingles\n65\tPneumococcal\n";
        let table = parse_vaccine_table(data.as_bytes(), false).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rules()[2].vaccine_name, "Pneumococcal");
    }

    #[test]
    fn test_vaccine_table_rejects_non_numeric_age() {
        let data = "adult\tTdap\n50\tShingles\n";
        let err = parse_vaccine_table(data.as_bytes(), false).unwrap_err();
        assert!(matches!(err, ReminderError::MalformedRecordError { line: 1, .. }));
    }

    #[test]
    fn test_empty_vaccine_table() {
        let table = parse_vaccine_table(b"", true).unwrap();
        assert!(table.is_empty());
    }
}
