//! Interactive search surfaces.
//!
//! Each surface owns its query, facet and expansion state and borrows an
//! [`Engine`](crate::search::Engine) for the corpus it lists. Every mutation
//! recomputes the visible view before returning, so readers never observe a
//! stale result list.

mod controls;
mod deep_link;
mod expansion;
mod global;
mod palette;
mod panel;
mod registry;

pub use controls::{ControlLibrary, RelatedControl};
pub use deep_link::{
    DeepLink, DeepLinkSync, ScrollHost, ScrollRequest, ScrollStatus, detached_host,
};
pub use expansion::ExpandSet;
pub use global::GlobalSearch;
pub use palette::{CommandPalette, PaletteKey, PaletteOutcome, PaletteState};
pub use panel::{FilterPanel, Listed};
pub use registry::RegistryBrowser;
