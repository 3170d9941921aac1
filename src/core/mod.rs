pub mod enricher;
pub mod etl;
pub mod loader;
pub mod notifier;
pub mod schedule;

pub use crate::domain::model::{
    Coordinates, FacilityInfo, LookupFailurePolicy, NotificationRecord, PersonRecord, Place,
    ReminderEntry, ReminderMessage, RosterEntry, VaccineRule, VaccineTable, NOT_AVAILABLE,
};
pub use crate::domain::ports::{ConfigProvider, LocationService, Notifier, Pipeline, Storage};
pub use crate::utils::error::Result;
