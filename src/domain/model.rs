use crate::domain::dates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel written in place of any facility field the mapping service could not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// One line of the government roster, with the age derived at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub dob: NaiveDate,
    pub address: String,
    pub phone_number: String,
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityInfo {
    pub name: String,
    pub address: String,
    pub distance: String,
}

impl FacilityInfo {
    pub fn unavailable() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            address: NOT_AVAILABLE.to_string(),
            distance: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self == &Self::unavailable()
    }
}

/// A roster entry after enrichment, as persisted in the enriched roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    #[serde(rename = "DOB", with = "dates::padded")]
    pub dob: NaiveDate,
    pub address: String,
    pub phone_number: String,
    pub age: i32,
    #[serde(rename = "hospital_info", with = "facility_as_array")]
    pub facility: FacilityInfo,
}

impl PersonRecord {
    pub fn from_entry(entry: RosterEntry, facility: FacilityInfo) -> Self {
        Self {
            name: entry.name,
            dob: entry.dob,
            address: entry.address,
            phone_number: entry.phone_number,
            age: entry.age,
            facility,
        }
    }
}

// hospital_info 以 [name, address, distance] 陣列保存
mod facility_as_array {
    use super::FacilityInfo;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        facility: &FacilityInfo,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        (&facility.name, &facility.address, &facility.distance).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<FacilityInfo, D::Error> {
        let (name, address, distance) = <(String, String, String)>::deserialize(deserializer)?;
        Ok(FacilityInfo {
            name,
            address,
            distance,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccineRule {
    pub min_age: i32,
    pub vaccine_name: String,
}

/// The age-gated vaccine table, kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaccineTable {
    rules: Vec<VaccineRule>,
}

impl VaccineTable {
    pub fn new(rules: Vec<VaccineRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[VaccineRule] {
        &self.rules
    }

    /// Rules whose age gate lies strictly above `age`, in table order.
    pub fn due_after(&self, age: i32) -> impl Iterator<Item = &VaccineRule> {
        self.rules.iter().filter(move |rule| rule.min_age > age)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEntry {
    pub vaccine_name: String,
    pub required_age: i32,
    #[serde(with = "dates::padded")]
    pub reminder_date: NaiveDate,
    #[serde(with = "dates::unpadded")]
    pub birthday_for_vaccine: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub name: String,
    pub phone_number: String,
    pub current_age: i32,
    #[serde(default)]
    pub vaccines: Vec<ReminderEntry>,
    pub hospital: FacilityInfo,
}

/// A rendered reminder ready for a dispatch channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub phone_number: String,
    pub send_date: NaiveDate,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// The nearest facility as reported by the location service.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub location: Coordinates,
}

/// What to do when a mapping-service call fails outright (as opposed to finding nothing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LookupFailurePolicy {
    #[default]
    Abort,
    Degrade,
}
