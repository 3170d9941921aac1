//! Location Enricher: nearest facility and travel distance for an address.

use crate::core::{
    FacilityInfo, LocationService, LookupFailurePolicy, PersonRecord, Result, RosterEntry,
    NOT_AVAILABLE,
};

pub struct LocationEnricher<L: LocationService> {
    service: L,
    facility_type: String,
    on_failure: LookupFailurePolicy,
}

impl<L: LocationService> LocationEnricher<L> {
    pub fn new(
        service: L,
        facility_type: impl Into<String>,
        on_failure: LookupFailurePolicy,
    ) -> Self {
        Self {
            service,
            facility_type: facility_type.into(),
            on_failure,
        }
    }

    pub async fn enrich(&self, entry: RosterEntry) -> Result<PersonRecord> {
        let facility = self.locate(&entry.address).await?;
        tracing::debug!(
            person = %entry.name,
            facility = %facility.name,
            distance = %facility.distance,
            "Enriched roster entry"
        );
        Ok(PersonRecord::from_entry(entry, facility))
    }

    /// Each lookup that comes back empty blanks the fields it would have filled.
    pub async fn locate(&self, address: &str) -> Result<FacilityInfo> {
        let outcome = self.service.geocode(address).await;
        let Some(origin) = self.tolerate("geocode", address, outcome)? else {
            tracing::debug!("No geocoding match for '{}'", address);
            return Ok(FacilityInfo::unavailable());
        };

        let outcome = self
            .service
            .nearest_facility(origin, &self.facility_type)
            .await;
        let Some(place) = self.tolerate("nearby search", address, outcome)? else {
            tracing::debug!("No {} near '{}'", self.facility_type, address);
            return Ok(FacilityInfo::unavailable());
        };

        let outcome = self.service.travel_distance(origin, place.location).await;
        let distance = self
            .tolerate("distance matrix", address, outcome)?
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Ok(FacilityInfo {
            name: place.name,
            address: place.address,
            distance,
        })
    }

    fn tolerate<T>(
        &self,
        call: &str,
        address: &str,
        outcome: Result<Option<T>>,
    ) -> Result<Option<T>> {
        match outcome {
            Err(err)
                if err.is_lookup_failure() && self.on_failure == LookupFailurePolicy::Degrade =>
            {
                tracing::warn!("⚠️ {} failed for '{}', recording N/A: {}", call, address, err);
                Ok(None)
            }
            other => other,
        }
    }
}
