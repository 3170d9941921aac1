use crate::domain::model::{
    Coordinates, LookupFailurePolicy, NotificationRecord, Place, ReminderMessage,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn roster_path(&self) -> &str;
    fn vaccine_table_path(&self) -> &str;
    fn enriched_roster_path(&self) -> &str;
    fn notifications_path(&self) -> &str;
    /// The reference date ages are computed against.
    fn current_date(&self) -> NaiveDate;
    fn reminder_offset_days(&self) -> i64;
    fn drop_trailer_line(&self) -> bool;
    fn facility_type(&self) -> &str;
    fn lookup_failure_policy(&self) -> LookupFailurePolicy;
}

/// Geocoding, nearest-facility and travel-distance lookups.
///
/// `Ok(None)` means the service answered but had nothing; `Err` means the
/// call itself failed.
#[async_trait]
pub trait LocationService: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>>;

    async fn nearest_facility(&self, origin: Coordinates, category: &str) -> Result<Option<Place>>;

    async fn travel_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<String>>;
}

/// Hands rendered reminders for one recipient to a dispatch channel.
pub trait Notifier {
    fn deliver(
        &mut self,
        recipient: &NotificationRecord,
        messages: &[ReminderMessage],
    ) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Raw: Send;
    type Transformed: Send;

    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Vec<Self::Raw>>;
    async fn transform(&self, data: Vec<Self::Raw>) -> Result<Vec<Self::Transformed>>;
    async fn load(&self, data: Vec<Self::Transformed>) -> Result<String>;
}
