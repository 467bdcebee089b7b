use crate::expand::expand;

/// A parsed `KEY=VALUE` assignment.
///
/// `raw` entries come from single-quoted values and must never be passed
/// through [`expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub raw: bool,
}

impl Entry {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>, raw: bool) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            raw,
        }
    }

    /// Whether the value should go through variable expansion.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        !self.raw && !self.value.is_empty()
    }

    /// The value to assign: expanded through `lookup` when expandable,
    /// the literal value otherwise.
    #[must_use]
    pub fn resolve<F>(&self, lookup: F) -> String
    where
        F: FnMut(&str) -> Option<String>,
    {
        if self.is_expandable() {
            expand(&self.value, lookup)
        } else {
            self.value.clone()
        }
    }
}
