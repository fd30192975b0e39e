//! One-shot reconciliation of a URL fragment into initial expansion state.
//!
//! A surface hands its fragment to [`DeepLinkSync::apply`] once, at mount.
//! The fragment becomes the only expanded id and a [`ScrollRequest`] is
//! scheduled for the presentation layer to bring the record into view after
//! layout settles. The request holds the host weakly, so a surface that is
//! torn down before the delay elapses turns the scroll into a no-op.

use std::rc::Weak;
use std::time::{Duration, Instant};

use super::expansion::ExpandSet;

/// Presentation layer able to bring an element into view.
pub trait ScrollHost {
    /// Scroll the element with `element_id` into view. Returns `false` when
    /// no such element exists.
    fn scroll_into_view(&self, element_id: &str) -> bool;
}

struct NoScrollHost;

impl ScrollHost for NoScrollHost {
    fn scroll_into_view(&self, _element_id: &str) -> bool {
        false
    }
}

/// Handle for surfaces mounted without anything to scroll.
#[must_use]
pub fn detached_host() -> Weak<dyn ScrollHost> {
    Weak::<NoScrollHost>::new()
}

/// Record id named by a URL fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink(String);

impl DeepLink {
    /// Strip a leading `#` and surrounding whitespace. Empty fragments name nothing.
    #[must_use]
    pub fn parse(fragment: &str) -> Option<Self> {
        let id = fragment.trim();
        let id = id.strip_prefix('#').unwrap_or(id).trim();
        if id.is_empty() {
            None
        } else {
            Some(Self(id.to_string()))
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Result of polling a [`ScrollRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollStatus {
    /// The settle delay has not elapsed yet.
    Pending,
    Scrolled,
    /// The host has no element with the target id.
    Missing,
    /// The host is gone.
    Detached,
}

/// Deferred, best-effort scroll of a deep-linked record into view.
pub struct ScrollRequest {
    target: String,
    due: Instant,
    host: Weak<dyn ScrollHost>,
    outcome: Option<ScrollStatus>,
}

impl std::fmt::Debug for ScrollRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollRequest")
            .field("target", &self.target)
            .field("due", &self.due)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl ScrollRequest {
    #[must_use]
    pub fn new(target: impl Into<String>, due: Instant, host: Weak<dyn ScrollHost>) -> Self {
        Self {
            target: target.into(),
            due,
            host,
            outcome: None,
        }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn due(&self) -> Instant {
        self.due
    }

    /// Fire the scroll once `now` reaches the deadline. The host is invoked
    /// at most once; later polls repeat the first outcome.
    pub fn poll(&mut self, now: Instant) -> ScrollStatus {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        if now < self.due {
            return ScrollStatus::Pending;
        }

        let outcome = match self.host.upgrade() {
            Some(host) if host.scroll_into_view(&self.target) => ScrollStatus::Scrolled,
            Some(_) => ScrollStatus::Missing,
            None => ScrollStatus::Detached,
        };
        log::debug!("deep link scroll to {:?}: {outcome:?}", self.target);
        self.outcome = Some(outcome);
        outcome
    }
}

/// Applies a fragment to a surface's expansion state exactly once.
#[derive(Debug, Clone)]
pub struct DeepLinkSync {
    delay: Duration,
    applied: bool,
}

impl DeepLinkSync {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            applied: false,
        }
    }

    #[must_use]
    pub fn has_run(&self) -> bool {
        self.applied
    }

    /// Seed `expanded` from `fragment` on the first call.
    ///
    /// A non-empty fragment replaces the expand set with `{fragment}`, even
    /// when no record carries that id, and yields a scroll request due after
    /// the settle delay. Every later call is ignored.
    pub fn apply(
        &mut self,
        fragment: Option<&str>,
        expanded: &mut ExpandSet,
        host: Weak<dyn ScrollHost>,
        now: Instant,
    ) -> Option<ScrollRequest> {
        if self.applied {
            log::trace!("deep link already applied; ignoring {fragment:?}");
            return None;
        }
        self.applied = true;

        let link = fragment.and_then(DeepLink::parse)?;
        expanded.replace_with(link.id());
        Some(ScrollRequest::new(link.0, now + self.delay, host))
    }
}
