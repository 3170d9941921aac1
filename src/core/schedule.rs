//! Schedule Builder: future age-gated vaccines and their reminder dates.

use crate::core::{NotificationRecord, PersonRecord, ReminderEntry, Result, VaccineTable};
use crate::utils::error::ReminderError;
use chrono::{Datelike, Duration, NaiveDate};

pub const DEFAULT_REMINDER_OFFSET_DAYS: i64 = 14;

/// The birthday on which someone born on `dob` turns `target_age`.
///
/// A February 29 birthday falls on February 28 in non-leap years.
pub fn birthday_for_age(dob: NaiveDate, target_age: i32) -> Result<NaiveDate> {
    dob.year()
        .checked_add(target_age)
        .and_then(|year| {
            dob.with_year(year).or_else(|| {
                if (dob.month(), dob.day()) == (2, 29) {
                    NaiveDate::from_ymd_opt(year, 2, 28)
                } else {
                    None
                }
            })
        })
        .ok_or_else(|| ReminderError::InvalidDateError {
            value: format!("{} + {} years", dob, target_age),
            reason: "target birthday is out of range".to_string(),
        })
}

pub fn reminder_date(birthday: NaiveDate, offset_days: i64) -> Result<NaiveDate> {
    birthday
        .checked_add_signed(Duration::days(offset_days))
        .ok_or_else(|| ReminderError::InvalidDateError {
            value: birthday.to_string(),
            reason: format!("cannot offset by {} days", offset_days),
        })
}

pub struct ScheduleBuilder<'a> {
    table: &'a VaccineTable,
    reminder_offset_days: i64,
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(table: &'a VaccineTable, reminder_offset_days: i64) -> Self {
        Self {
            table,
            reminder_offset_days,
        }
    }

    /// Only the age gate filters: a qualifying birthday already in the past is still listed.
    pub fn reminders_for(&self, person: &PersonRecord) -> Result<Vec<ReminderEntry>> {
        self.table
            .due_after(person.age)
            .map(|rule| -> Result<ReminderEntry> {
                let birthday = birthday_for_age(person.dob, rule.min_age)?;
                Ok(ReminderEntry {
                    vaccine_name: rule.vaccine_name.clone(),
                    required_age: rule.min_age,
                    reminder_date: reminder_date(birthday, self.reminder_offset_days)?,
                    birthday_for_vaccine: birthday,
                })
            })
            .collect()
    }

    pub fn notification_for(&self, person: &PersonRecord) -> Result<NotificationRecord> {
        Ok(NotificationRecord {
            name: person.name.clone(),
            phone_number: person.phone_number.clone(),
            current_age: person.age,
            vaccines: self.reminders_for(person)?,
            hospital: person.facility.clone(),
        })
    }

    pub fn build(&self, people: &[PersonRecord]) -> Result<Vec<NotificationRecord>> {
        people.iter().map(|p| self.notification_for(p)).collect()
    }
}
