use crate::app::pipelines::encode_json;
use crate::core::schedule::ScheduleBuilder;
use crate::core::{
    ConfigProvider, NotificationRecord, PersonRecord, Pipeline, Result, Storage, VaccineTable,
};

/// Enriched roster JSON → notification schedule JSON.
pub struct SchedulePipeline<'a, S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    table: &'a VaccineTable,
}

impl<'a, S: Storage, C: ConfigProvider> SchedulePipeline<'a, S, C> {
    pub fn new(storage: S, config: C, table: &'a VaccineTable) -> Self {
        Self {
            storage,
            config,
            table,
        }
    }
}

#[async_trait::async_trait]
impl<'a, S: Storage, C: ConfigProvider> Pipeline for SchedulePipeline<'a, S, C> {
    type Raw = PersonRecord;
    type Transformed = NotificationRecord;

    fn name(&self) -> &str {
        "schedule"
    }

    async fn extract(&self) -> Result<Vec<PersonRecord>> {
        let data = self
            .storage
            .read_file(self.config.enriched_roster_path())
            .await?;
        Ok(serde_json::from_slice(&data)?)
    }

    async fn transform(&self, people: Vec<PersonRecord>) -> Result<Vec<NotificationRecord>> {
        let builder = ScheduleBuilder::new(self.table, self.config.reminder_offset_days());
        let notifications = builder.build(&people)?;

        let reminders: usize = notifications.iter().map(|n| n.vaccines.len()).sum();
        tracing::debug!(
            "Scheduled {} reminders across {} people",
            reminders,
            notifications.len()
        );
        Ok(notifications)
    }

    async fn load(&self, notifications: Vec<NotificationRecord>) -> Result<String> {
        let path = self.config.notifications_path();
        let json = encode_json(&notifications)?;
        self.storage.write_file(path, &json).await?;

        tracing::info!("Notifications have been written to {}", path);
        Ok(path.to_string())
    }
}
