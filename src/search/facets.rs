use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::corpus::{
    CertificationLevel, CertificationStatus, Classification, ControlRecord, EvaluationMethod,
    MonitoringStatus, RegistryRecord,
};

/// A set of predicates a surface applies on top of the free-text query.
///
/// Every active predicate must hold for a record to be kept.
pub trait Facet<T: ?Sized> {
    fn matches(&self, record: &T) -> bool;

    /// Number of predicates currently narrowing the result set.
    fn active_predicates(&self) -> usize;
}

/// Facet set of the mixed-type surfaces, which only apply the text query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFacets;

impl<T: ?Sized> Facet<T> for NoFacets {
    fn matches(&self, _record: &T) -> bool {
        true
    }

    fn active_predicates(&self) -> usize {
        0
    }
}

/// Selected value of a single equality facet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FacetValue<V> {
    /// No filter on this field.
    #[default]
    Any,
    Is(V),
    /// A value that does not name anything in the corpus. Never matches.
    Unmatchable(String),
}

impl<V> FacetValue<V> {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, FacetValue::Any)
    }

    /// Test a record's field against the selection.
    pub fn admits<Q>(&self, value: &Q) -> bool
    where
        V: PartialEq<Q>,
        Q: ?Sized,
    {
        match self {
            FacetValue::Any => true,
            FacetValue::Is(expected) => expected == value,
            FacetValue::Unmatchable(_) => false,
        }
    }
}

impl<V: FromStr> FacetValue<V> {
    /// Interpret externally supplied text. Empty text and `all` clear the
    /// facet; anything that does not parse becomes [`FacetValue::Unmatchable`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if is_any(raw) {
            return FacetValue::Any;
        }
        match raw.parse() {
            Ok(value) => FacetValue::Is(value),
            Err(_) => FacetValue::Unmatchable(raw.to_string()),
        }
    }
}

impl<V: Display> FacetValue<V> {
    /// Label of the selection, `None` when the facet is cleared.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            FacetValue::Any => None,
            FacetValue::Is(value) => Some(value.to_string()),
            FacetValue::Unmatchable(raw) => Some(raw.clone()),
        }
    }
}

/// Minimum risk weight filter. The floor is inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RiskFloor {
    /// Sentinel "no filter"; distinct from a floor of zero.
    #[default]
    Any,
    AtLeast(u8),
    Unmatchable(String),
}

impl RiskFloor {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if is_any(raw) {
            return RiskFloor::Any;
        }
        match raw.parse() {
            Ok(floor) => RiskFloor::AtLeast(floor),
            Err(_) => RiskFloor::Unmatchable(raw.to_string()),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, RiskFloor::Any)
    }

    #[must_use]
    pub fn admits(&self, weight: u8) -> bool {
        match self {
            RiskFloor::Any => true,
            RiskFloor::AtLeast(floor) => weight >= *floor,
            RiskFloor::Unmatchable(_) => false,
        }
    }

    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            RiskFloor::Any => None,
            RiskFloor::AtLeast(floor) => Some(format!(">= {floor}")),
            RiskFloor::Unmatchable(raw) => Some(raw.clone()),
        }
    }
}

fn is_any(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("all") || raw.eq_ignore_ascii_case("any")
}

fn count_active(flags: &[bool]) -> usize {
    flags.iter().filter(|active| **active).count()
}

/// Filters offered by the control library panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlFacets {
    pub domain: FacetValue<u32>,
    pub level: FacetValue<CertificationLevel>,
    pub method: FacetValue<EvaluationMethod>,
    pub classification: FacetValue<Classification>,
    pub risk_floor: RiskFloor,
}

impl ControlFacets {
    #[must_use]
    pub fn with_domain(mut self, domain_id: u32) -> Self {
        self.domain = FacetValue::Is(domain_id);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: CertificationLevel) -> Self {
        self.level = FacetValue::Is(level);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: EvaluationMethod) -> Self {
        self.method = FacetValue::Is(method);
        self
    }

    #[must_use]
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = FacetValue::Is(classification);
        self
    }

    #[must_use]
    pub fn with_risk_floor(mut self, floor: u8) -> Self {
        self.risk_floor = RiskFloor::AtLeast(floor);
        self
    }
}

impl Facet<ControlRecord> for ControlFacets {
    fn matches(&self, control: &ControlRecord) -> bool {
        let level_ok = match &self.level {
            FacetValue::Any => true,
            FacetValue::Is(level) => control.applies_to(*level),
            FacetValue::Unmatchable(_) => false,
        };
        level_ok
            && self.domain.admits(&control.domain_id)
            && self.method.admits(&control.evaluation_method)
            && self.classification.admits(&control.classification)
            && self.risk_floor.admits(control.risk_weight)
    }

    fn active_predicates(&self) -> usize {
        count_active(&[
            self.domain.is_active(),
            self.level.is_active(),
            self.method.is_active(),
            self.classification.is_active(),
            self.risk_floor.is_active(),
        ])
    }
}

/// Filters offered by the registry panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryFacets {
    pub level: FacetValue<CertificationLevel>,
    pub industry: FacetValue<String>,
    pub status: FacetValue<CertificationStatus>,
    pub monitoring: FacetValue<MonitoringStatus>,
}

impl RegistryFacets {
    #[must_use]
    pub fn with_level(mut self, level: CertificationLevel) -> Self {
        self.level = FacetValue::Is(level);
        self
    }

    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = FacetValue::Is(industry.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: CertificationStatus) -> Self {
        self.status = FacetValue::Is(status);
        self
    }

    #[must_use]
    pub fn with_monitoring(mut self, monitoring: MonitoringStatus) -> Self {
        self.monitoring = FacetValue::Is(monitoring);
        self
    }
}

impl Facet<RegistryRecord> for RegistryFacets {
    fn matches(&self, record: &RegistryRecord) -> bool {
        self.level.admits(&record.certification_level)
            && self.industry.admits(&record.industry)
            && self.status.admits(&record.certification_status)
            && self.monitoring.admits(&record.monitoring_status)
    }

    fn active_predicates(&self) -> usize {
        count_active(&[
            self.level.is_active(),
            self.industry.is_active(),
            self.status.is_active(),
            self.monitoring.is_active(),
        ])
    }
}

/// A selectable facet value and the number of records carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub count: usize,
}

impl FacetOption {
    /// Create a new [`FacetOption`] with the provided `value` and `count`.
    #[must_use]
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}
