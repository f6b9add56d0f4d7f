use serde::Serialize;
use std::collections::BTreeSet;

/// Unique hostnames pulled out of certificate records.
///
/// Names are stored exactly as received; no case folding or trailing-dot
/// trimming happens here. Iteration is ordered, but nothing downstream
/// should depend on that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HostnameSet(BTreeSet<String>);

impl HostnameSet {
    /// Create an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Number of unique hostnames
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no hostnames were extracted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the exact hostname is present
    #[must_use]
    pub fn contains(&self, hostname: &str) -> bool {
        self.0.contains(hostname)
    }

    /// Iterate over the hostnames
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, hostname: &str) {
        if !self.0.contains(hostname) {
            self.0.insert(hostname.to_string());
        }
    }
}

impl<S: Into<String>> FromIterator<S> for HostnameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for HostnameSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a HostnameSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
