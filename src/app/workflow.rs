use crate::app::pipelines::{RosterPipeline, SchedulePipeline};
use crate::core::etl::EtlEngine;
use crate::core::loader::parse_vaccine_table;
use crate::core::notifier::render_messages;
use crate::core::{
    ConfigProvider, LocationService, NotificationRecord, Notifier, Result, Storage, VaccineTable,
};

/// Artifacts written and messages rendered by one workflow operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub enriched_roster: Option<String>,
    pub notifications: Option<String>,
    pub messages_sent: usize,
    pub recipients: usize,
}

/// The named operations behind each command.
pub struct ReminderWorkflow<S: Storage + Clone, C: ConfigProvider + Clone> {
    storage: S,
    config: C,
    monitor_enabled: bool,
}

impl<S: Storage + Clone, C: ConfigProvider + Clone> ReminderWorkflow<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            monitor_enabled: false,
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor_enabled = enabled;
        self
    }

    pub async fn load_vaccine_table(&self) -> Result<VaccineTable> {
        let data = self
            .storage
            .read_file(self.config.vaccine_table_path())
            .await?;
        let table = parse_vaccine_table(&data, self.config.drop_trailer_line())?;
        tracing::info!("Loaded {} vaccine rules", table.len());
        Ok(table)
    }

    /// Roster file → enriched roster artifact.
    pub async fn enrich<L: LocationService>(&self, locations: L) -> Result<RunSummary> {
        let pipeline = RosterPipeline::new(self.storage.clone(), self.config.clone(), locations);
        let path = EtlEngine::new_with_monitoring(pipeline, self.monitor_enabled)
            .run()
            .await?;

        Ok(RunSummary {
            enriched_roster: Some(path),
            ..RunSummary::default()
        })
    }

    /// Enriched roster artifact → notification schedule artifact.
    pub async fn schedule(&self, table: &VaccineTable) -> Result<RunSummary> {
        let pipeline = SchedulePipeline::new(self.storage.clone(), self.config.clone(), table);
        let path = EtlEngine::new_with_monitoring(pipeline, self.monitor_enabled)
            .run()
            .await?;

        Ok(RunSummary {
            notifications: Some(path),
            ..RunSummary::default()
        })
    }

    /// Renders every scheduled reminder and hands it to `notifier`.
    ///
    /// People with nothing due are skipped without any message.
    pub async fn notify<N: Notifier>(&self, notifier: &mut N) -> Result<RunSummary> {
        let data = self
            .storage
            .read_file(self.config.notifications_path())
            .await?;
        let schedule: Vec<NotificationRecord> = serde_json::from_slice(&data)?;

        let mut summary = RunSummary::default();
        for record in &schedule {
            let messages = render_messages(record);
            if messages.is_empty() {
                tracing::debug!("No upcoming vaccines for {}", record.name);
                continue;
            }
            notifier.deliver(record, &messages)?;
            summary.messages_sent += messages.len();
            summary.recipients += 1;
        }

        tracing::info!(
            "Rendered {} reminders for {} of {} people",
            summary.messages_sent,
            summary.recipients,
            schedule.len()
        );
        Ok(summary)
    }

    /// Processes the roster from scratch: enrich, schedule, notify.
    pub async fn run<L: LocationService, N: Notifier>(
        &self,
        locations: L,
        notifier: &mut N,
    ) -> Result<RunSummary> {
        let table = self.load_vaccine_table().await?;
        let enriched = self.enrich(locations).await?;
        self.finish(&table, enriched, notifier).await
    }

    /// Reuses a previously enriched roster: schedule, notify.
    pub async fn resume<N: Notifier>(&self, notifier: &mut N) -> Result<RunSummary> {
        let table = self.load_vaccine_table().await?;
        self.finish(&table, RunSummary::default(), notifier).await
    }

    async fn finish<N: Notifier>(
        &self,
        table: &VaccineTable,
        mut summary: RunSummary,
        notifier: &mut N,
    ) -> Result<RunSummary> {
        summary.notifications = self.schedule(table).await?.notifications;
        let delivered = self.notify(notifier).await?;
        summary.messages_sent = delivered.messages_sent;
        summary.recipients = delivered.recipients;
        Ok(summary)
    }
}
