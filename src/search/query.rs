/// Free-text query as typed, plus its normalized needle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    raw: String,
    needle: String,
}

impl Query {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = fold(&raw);
        Self { raw, needle }
    }

    /// Text exactly as the user entered it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Case-folded text used for containment checks. Surrounding whitespace
    /// is kept and must appear in the field.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// True for empty or whitespace-only input. Surfaces decide what a blank
    /// query shows; it never matches by way of the empty substring.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Check the needle against already case-folded fields.
    ///
    /// Fields are OR'd: one containing field is enough. A blank query
    /// matches nothing.
    #[must_use]
    pub fn matches_folded<'a, I>(&self, folded_fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.is_blank() {
            return false;
        }
        folded_fields
            .into_iter()
            .any(|field| field.contains(self.needle.as_str()))
    }
}

/// Case-fold a searchable field so it can be compared against a needle.
#[must_use]
pub fn fold(field: &str) -> String {
    field.to_lowercase()
}
