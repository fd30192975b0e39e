use super::panel::FilterPanel;
use crate::corpus::{ControlRecord, Record};
use crate::search::{ControlFacets, FacetOption};

/// Control-library panel: controls filtered by domain, level, evaluation
/// method, classification and minimum risk weight.
pub type ControlLibrary<'c> = FilterPanel<'c, ControlRecord, ControlFacets>;

/// A related-control reference resolved against the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedControl<'c> {
    Defined(&'c ControlRecord),
    /// The id names a control that does not exist yet.
    Undefined(&'c str),
}

impl RelatedControl<'_> {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            RelatedControl::Defined(control) => &control.id,
            RelatedControl::Undefined(id) => id,
        }
    }

    /// Title of the related control, or a placeholder for dangling references.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            RelatedControl::Defined(control) => control.title(),
            RelatedControl::Undefined(_) => "not yet defined",
        }
    }

    #[must_use]
    pub fn url(&self) -> Option<String> {
        match self {
            RelatedControl::Defined(control) => Some(control.url()),
            RelatedControl::Undefined(_) => None,
        }
    }
}

impl<'c> FilterPanel<'c, ControlRecord, ControlFacets> {
    /// Resolve `control`'s related ids in their declared order.
    #[must_use]
    pub fn related(&self, control: &'c ControlRecord) -> Vec<RelatedControl<'c>> {
        control
            .related_controls
            .iter()
            .map(|id| match self.lookup(id) {
                Some(related) => RelatedControl::Defined(related),
                None => RelatedControl::Undefined(id.as_str()),
            })
            .collect()
    }

    /// Domain choices with control counts, labelled by domain name.
    #[must_use]
    pub fn domain_options(&self) -> Vec<FacetOption> {
        self.engine()
            .facet_options(|control| format!("{} {}", control.domain_id, control.domain_name))
    }

    #[must_use]
    pub fn method_options(&self) -> Vec<FacetOption> {
        self.engine()
            .facet_options(|control| control.evaluation_method)
    }

    #[must_use]
    pub fn classification_options(&self) -> Vec<FacetOption> {
        self.engine().facet_options(|control| control.classification)
    }
}
