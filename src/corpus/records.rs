use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::kind::{Record, RecordKind};
use crate::error::UnknownValue;

/// Root of every standard-text URL.
pub const STANDARD_BASE_URL: &str = "/standard/v1.0";

/// Declares a closed enumeration whose variants travel as fixed strings in
/// fixtures, command-line flags and output.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire string for the variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownValue {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// How conformance with a control is established.
    EvaluationMethod {
        AutomatedTest => "AT",
        HumanSampling => "HS",
        EvidenceInspection => "EI",
        ContinuousMonitoring => "CM",
    }
}

wire_enum! {
    /// Whether failing a control blocks certification outright.
    Classification {
        Blocking => "Blocking",
        Conditional => "Conditional",
    }
}

wire_enum! {
    /// Certification tier. Controls declare which tiers they apply to.
    CertificationLevel {
        L1 => "L1",
        L2 => "L2",
        L3 => "L3",
    }
}

wire_enum! {
    CertificationStatus {
        Active => "Active",
        Conditional => "Conditional",
        Suspended => "Suspended",
        Expired => "Expired",
        Revoked => "Revoked",
    }
}

wire_enum! {
    MonitoringStatus {
        Compliant => "Compliant",
        Warning => "Warning",
        NonCompliant => "Non-Compliant",
        Pending => "Pending",
    }
}

/// A thematic grouping of controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    pub id: u32,
    pub title: String,
    pub summary: String,
    pub slug: String,
    pub acr_count: u32,
}

impl DomainRecord {
    /// Literal label a user types to find a domain by number, e.g. `domain 7`.
    #[must_use]
    pub fn number_label(&self) -> String {
        format!("domain {}", self.id)
    }
}

impl Record for DomainRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::Domain
    }

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Owned(self.id.to_string())
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn url(&self) -> String {
        format!("{STANDARD_BASE_URL}/domains/{}", self.slug)
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.title.as_str()),
            Cow::Borrowed(self.summary.as_str()),
            Cow::Owned(self.number_label()),
        ]
    }
}

/// Per-level applicability flags of a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelApplicability {
    #[serde(rename = "L1")]
    pub l1: bool,
    #[serde(rename = "L2")]
    pub l2: bool,
    #[serde(rename = "L3")]
    pub l3: bool,
}

impl LevelApplicability {
    #[must_use]
    pub const fn applies_to(self, level: CertificationLevel) -> bool {
        match level {
            CertificationLevel::L1 => self.l1,
            CertificationLevel::L2 => self.l2,
            CertificationLevel::L3 => self.l3,
        }
    }

    /// Levels the control applies to, lowest first.
    #[must_use]
    pub fn levels(self) -> Vec<CertificationLevel> {
        CertificationLevel::ALL
            .iter()
            .copied()
            .filter(|level| self.applies_to(*level))
            .collect()
    }
}

/// A discrete, testable compliance requirement ("ACR").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub domain_id: u32,
    pub domain_name: String,
    pub evaluation_method: EvaluationMethod,
    pub classification: Classification,
    pub risk_weight: u8,
    pub level_applicability: LevelApplicability,
    /// May name controls that do not exist yet.
    #[serde(default)]
    pub related_controls: Vec<String>,
    pub version_introduced: String,
}

impl ControlRecord {
    #[must_use]
    pub const fn applies_to(&self, level: CertificationLevel) -> bool {
        self.level_applicability.applies_to(level)
    }
}

impl Record for ControlRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::Control
    }

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.id.as_str())
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn url(&self) -> String {
        format!("{STANDARD_BASE_URL}/acr/{}", self.id)
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.title.as_str()),
            Cow::Borrowed(self.description.as_str()),
            Cow::Borrowed(self.domain_name.as_str()),
        ]
    }
}

/// One entry in a certification's suspension and revocation trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEvent {
    pub date: String,
    pub action: String,
    pub reason: String,
}

/// A certified system listed in the public registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryRecord {
    pub certification_id: String,
    pub organization: String,
    pub system_name: String,
    pub scope_statement: String,
    pub certification_level: CertificationLevel,
    pub certification_status: CertificationStatus,
    pub monitoring_status: MonitoringStatus,
    pub industry: String,
    pub category: String,
    pub issue_date: String,
    pub expiry_date: String,
    #[serde(default)]
    pub revocation_history: Vec<RevocationEvent>,
}

impl Record for RegistryRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::Registry
    }

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.certification_id.as_str())
    }

    fn title(&self) -> &str {
        &self.system_name
    }

    fn url(&self) -> String {
        format!("/registry/{}", self.certification_id)
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.certification_id.as_str()),
            Cow::Borrowed(self.organization.as_str()),
            Cow::Borrowed(self.system_name.as_str()),
            Cow::Borrowed(self.scope_statement.as_str()),
        ]
    }
}

/// A fixed site page reachable from the command palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaticPageRecord {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

impl Record for StaticPageRecord {
    fn kind(&self) -> RecordKind {
        RecordKind::StaticPage
    }

    fn record_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.url)
    }

    fn title(&self) -> &str {
        self.title
    }

    fn url(&self) -> String {
        self.url.to_string()
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.title), Cow::Borrowed(self.description)]
    }
}
