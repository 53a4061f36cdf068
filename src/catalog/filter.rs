//! Case-insensitive allow-list over catalog names.

/// Allow-list of catalog names supplied at startup.
///
/// An empty filter admits every name. Otherwise a name is admitted when it
/// equals one of the listed names ignoring case. There is no substring, glob
/// or pattern matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    names: Vec<String>,
}

impl NameFilter {
    /// Filter admitting every name.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Build a filter from individual names.
    ///
    /// Names are trimmed; blank names are dropped.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// Build a filter from a comma-separated list such as `"intro, Setup"`.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Whether the filter admits every name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Listed names, trimmed, in the order given.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` passes the filter.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        if self.names.is_empty() {
            return true;
        }
        let folded = name.to_lowercase();
        self.names
            .iter()
            .any(|allowed| allowed == name || allowed.to_lowercase() == folded)
    }
}
