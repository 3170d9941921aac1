use crate::app::pipelines::encode_json;
use crate::core::enricher::LocationEnricher;
use crate::core::loader::parse_roster;
use crate::core::{
    ConfigProvider, LocationService, PersonRecord, Pipeline, Result, RosterEntry, Storage,
};

/// Government roster → enriched roster JSON.
pub struct RosterPipeline<S: Storage, C: ConfigProvider, L: LocationService> {
    storage: S,
    config: C,
    enricher: LocationEnricher<L>,
}

impl<S: Storage, C: ConfigProvider, L: LocationService> RosterPipeline<S, C, L> {
    pub fn new(storage: S, config: C, locations: L) -> Self {
        let enricher = LocationEnricher::new(
            locations,
            config.facility_type(),
            config.lookup_failure_policy(),
        );
        Self {
            storage,
            config,
            enricher,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, L: LocationService> Pipeline for RosterPipeline<S, C, L> {
    type Raw = RosterEntry;
    type Transformed = PersonRecord;

    fn name(&self) -> &str {
        "roster"
    }

    async fn extract(&self) -> Result<Vec<RosterEntry>> {
        let today = self.config.current_date();
        tracing::debug!(
            "Loading roster from {} (reference date {})",
            self.config.roster_path(),
            today
        );
        let data = self.storage.read_file(self.config.roster_path()).await?;
        parse_roster(&data, today)
    }

    async fn transform(&self, data: Vec<RosterEntry>) -> Result<Vec<PersonRecord>> {
        let total = data.len();
        let mut people = Vec::with_capacity(total);

        // 逐筆查詢，不併發
        for (index, entry) in data.into_iter().enumerate() {
            tracing::debug!("Looking up facility {}/{} for {}", index + 1, total, entry.name);
            people.push(self.enricher.enrich(entry).await?);
        }

        Ok(people)
    }

    async fn load(&self, people: Vec<PersonRecord>) -> Result<String> {
        let path = self.config.enriched_roster_path();
        let json = encode_json(&people)?;
        self.storage.write_file(path, &json).await?;

        tracing::info!("Data has been written to {}", path);
        Ok(path.to_string())
    }
}
