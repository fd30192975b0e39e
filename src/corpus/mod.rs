//! Record types and the read-only fixture collections they are loaded from.

mod fixtures;
mod kind;
mod pages;
mod records;

pub use fixtures::Fixtures;
pub use kind::{Record, RecordKind};
pub use pages::STATIC_PAGES;
pub use records::{
    CertificationLevel, CertificationStatus, Classification, ControlRecord, DomainRecord,
    EvaluationMethod, LevelApplicability, MonitoringStatus, RegistryRecord, RevocationEvent,
    STANDARD_BASE_URL, StaticPageRecord,
};
