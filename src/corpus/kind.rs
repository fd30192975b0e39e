use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Identifies the source collection a record was indexed from.
///
/// The derived ordering is the precedence used when results of several kinds
/// are flattened into one list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Domain,
    Control,
    Registry,
    StaticPage,
}

impl RecordKind {
    /// Stable string identifier for the kind, used in output and logs.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            RecordKind::Domain => "domain",
            RecordKind::Control => "control",
            RecordKind::Registry => "registry",
            RecordKind::StaticPage => "static_page",
        }
    }

    /// Heading shown above a group of results of this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RecordKind::Domain => "Domains",
            RecordKind::Control => "Controls",
            RecordKind::Registry => "Registry",
            RecordKind::StaticPage => "Pages",
        }
    }

    /// List of all kinds in their default precedence order.
    #[must_use]
    pub const fn all() -> [RecordKind; 4] {
        [
            RecordKind::Domain,
            RecordKind::Control,
            RecordKind::Registry,
            RecordKind::StaticPage,
        ]
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Behaviour shared by every record the engine can index.
pub trait Record {
    /// Source collection of the record.
    fn kind(&self) -> RecordKind;

    /// Immutable identifier, unique within the record's kind.
    fn record_id(&self) -> Cow<'_, str>;

    /// Human-readable title.
    fn title(&self) -> &str;

    /// Navigation target handed to the router when the record is committed.
    fn url(&self) -> String;

    /// Fields eligible for substring matching, in no particular order.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_follows_declaration_order() {
        let mut kinds = vec![
            RecordKind::StaticPage,
            RecordKind::Registry,
            RecordKind::Domain,
            RecordKind::Control,
        ];
        kinds.sort();
        assert_eq!(kinds, RecordKind::all().to_vec());
    }
}
