use super::panel::FilterPanel;
use crate::corpus::{RegistryRecord, RevocationEvent};
use crate::search::{FacetOption, RegistryFacets};

/// Certification-registry panel: certified systems filtered by level,
/// industry, certification status and monitoring status.
pub type RegistryBrowser<'c> = FilterPanel<'c, RegistryRecord, RegistryFacets>;

impl<'c> FilterPanel<'c, RegistryRecord, RegistryFacets> {
    /// Industries present in the registry with their record counts.
    #[must_use]
    pub fn industry_options(&self) -> Vec<FacetOption> {
        self.engine().facet_options(|record| record.industry.clone())
    }

    #[must_use]
    pub fn status_options(&self) -> Vec<FacetOption> {
        self.engine()
            .facet_options(|record| record.certification_status)
    }

    #[must_use]
    pub fn monitoring_options(&self) -> Vec<FacetOption> {
        self.engine().facet_options(|record| record.monitoring_status)
    }

    /// Suspension and revocation trail of `certification_id`, oldest first.
    #[must_use]
    pub fn history(&self, certification_id: &str) -> &'c [RevocationEvent] {
        self.lookup(certification_id)
            .map(|record| record.revocation_history.as_slice())
            .unwrap_or_default()
    }
}
