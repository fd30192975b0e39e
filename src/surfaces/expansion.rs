use std::collections::BTreeSet;

/// Record ids whose detail disclosure is open.
///
/// Membership is independent of filtering: hiding a record does not collapse it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandSet {
    ids: BTreeSet<String>,
}

impl ExpandSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id` and return whether it is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Replace the whole set with exactly `{id}`.
    pub fn replace_with(&mut self, id: &str) {
        self.ids.clear();
        self.ids.insert(id.to_string());
    }

    pub fn collapse_all(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
