//! Reminder rendering and the console stand-in for an SMS dispatcher.

use crate::core::{NotificationRecord, Notifier, ReminderMessage, Result};
use crate::domain::dates::format_padded;
use std::io::Write;

const SEPARATOR_WIDTH: usize = 50;

/// One message per reminder entry; an empty schedule renders nothing.
pub fn render_messages(record: &NotificationRecord) -> Vec<ReminderMessage> {
    record
        .vaccines
        .iter()
        .map(|vaccine| {
            let body = format!(
                "Send Date: {send_date}\n\
                 Dear {name},\n\
                 This is a friendly reminder that your {vaccine} vaccine is recommended at age {age}.\n\
                 Please schedule your vaccination soon.\n\
                 \n\
                 We recommend visiting your nearest hospital:\n \
                 - Hospital: {hospital}\n \
                 - Address: {address}\n \
                 - Distance: {distance}\n\
                 Stay healthy and take care!\n",
                send_date = format_padded(vaccine.reminder_date),
                name = record.name,
                vaccine = vaccine.vaccine_name,
                age = vaccine.required_age,
                hospital = record.hospital.name,
                address = record.hospital.address,
                distance = record.hospital.distance,
            );
            ReminderMessage {
                phone_number: record.phone_number.clone(),
                send_date: vaccine.reminder_date,
                body,
            }
        })
        .collect()
}

/// Writes reminders as text blocks, one recipient at a time.
pub struct ConsoleNotifier<W: Write> {
    out: W,
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn deliver(
        &mut self,
        recipient: &NotificationRecord,
        messages: &[ReminderMessage],
    ) -> Result<()> {
        let Some(first) = messages.first() else {
            return Ok(());
        };

        writeln!(self.out, "Phone: {}", first.phone_number)?;
        for message in messages {
            tracing::debug!(
                "📨 Reminder for {} ({}) due {}",
                recipient.name,
                message.phone_number,
                format_padded(message.send_date)
            );
            writeln!(self.out, "{}", message.body)?;
        }
        writeln!(self.out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FacilityInfo, ReminderEntry};
    use chrono::NaiveDate;

    fn record(vaccines: Vec<ReminderEntry>) -> NotificationRecord {
        NotificationRecord {
            name: "Ada Lovelace".to_string(),
            phone_number: "555-0100".to_string(),
            current_age: 20,
            vaccines,
            hospital: FacilityInfo {
                name: "Springfield General".to_string(),
                address: "1 Hospital Rd".to_string(),
                distance: "2.3 km".to_string(),
            },
        }
    }

    fn shingles() -> ReminderEntry {
        ReminderEntry {
            vaccine_name: "Shingles".to_string(),
            required_age: 50,
            reminder_date: NaiveDate::from_ymd_opt(2050, 1, 15).unwrap(),
            birthday_for_vaccine: NaiveDate::from_ymd_opt(2050, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_render_message_text() {
        let messages = render_messages(&record(vec![shingles()]));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].phone_number, "555-0100");
        assert_eq!(
            messages[0].body,
            "Send Date: 01/15/2050\n\
             Dear Ada Lovelace,\n\
             This is a friendly reminder that your Shingles vaccine is recommended at age 50.\n\
             Please schedule your vaccination soon.\n\
             \n\
             We recommend visiting your nearest hospital:\n - Hospital: Springfield General\n - Address: 1 Hospital Rd\n - Distance: 2.3 km\n\
             Stay healthy and take care!\n"
        );
    }

    #[test]
    fn test_empty_schedule_renders_nothing() {
        let empty = record(Vec::new());
        assert!(render_messages(&empty).is_empty());

        let mut notifier = ConsoleNotifier::new(Vec::new());
        notifier.deliver(&empty, &[]).unwrap();
        assert!(notifier.into_inner().is_empty());
    }

    #[test]
    fn test_console_block_layout() {
        let with_two = record(vec![shingles(), shingles()]);
        let messages = render_messages(&with_two);
        let mut notifier = ConsoleNotifier::new(Vec::new());
        notifier.deliver(&with_two, &messages).unwrap();

        let text = String::from_utf8(notifier.into_inner()).unwrap();
        assert!(text.starts_with("Phone: 555-0100\nSend Date: 01/15/2050\n"));
        assert_eq!(text.matches("Dear Ada Lovelace,").count(), 2);
        assert!(text.ends_with(&format!("{}\n", "-".repeat(50))));
    }

    #[test]
    fn test_block_header_uses_message_recipient() {
        let schedule = record(vec![shingles()]);
        let mut messages = render_messages(&schedule);
        assert_eq!(messages[0].send_date, NaiveDate::from_ymd_opt(2050, 1, 15).unwrap());
        messages[0].phone_number = "555-0199".to_string();

        let mut notifier = ConsoleNotifier::new(Vec::new());
        notifier.deliver(&schedule, &messages).unwrap();

        let text = String::from_utf8(notifier.into_inner()).unwrap();
        assert!(text.starts_with("Phone: 555-0199\n"));
    }
}
