use serde::Serialize;

/// Sentinel recorded in place of addresses when a lookup yields nothing usable
pub const UNRESOLVABLE: &str = "unresolvable";

/// Outcome of resolving a single hostname.
///
/// `ips` is either the resolver's IPv4 answers in the order they arrived,
/// or exactly `[UNRESOLVABLE]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    /// Hostname that was looked up
    pub hostname: String,
    /// Resolved addresses, or the single sentinel entry
    pub ips: Vec<String>,
}

impl ResolutionResult {
    /// Build a result from resolved addresses.
    ///
    /// An empty address list is recorded as unresolvable.
    #[must_use]
    pub fn resolved<I, A>(hostname: impl Into<String>, ips: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: ToString,
    {
        let ips: Vec<String> = ips.into_iter().map(|ip| ip.to_string()).collect();
        if ips.is_empty() {
            return Self::unresolvable(hostname);
        }
        Self {
            hostname: hostname.into(),
            ips,
        }
    }

    /// Build the sentinel result for a failed lookup
    #[must_use]
    pub fn unresolvable(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ips: vec![UNRESOLVABLE.to_string()],
        }
    }

    /// Returns true if this is the sentinel result
    #[must_use]
    pub fn is_unresolvable(&self) -> bool {
        self.ips.len() == 1 && self.ips[0] == UNRESOLVABLE
    }

    /// Addresses joined as `ip1, ip2`
    #[must_use]
    pub fn ips_joined(&self) -> String {
        self.ips.join(", ")
    }
}

/// All resolution results from one pool run, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultCollection(Vec<ResolutionResult>);

impl ResultCollection {
    /// Create an empty collection with room for `capacity` results
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Append a result
    pub fn push(&mut self, result: ResolutionResult) {
        self.0.push(result);
    }

    /// Number of results
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over results in arrival order
    pub fn iter(&self) -> std::slice::Iter<'_, ResolutionResult> {
        self.0.iter()
    }

    /// Count of hostnames that produced at least one address
    #[must_use]
    pub fn resolvable_count(&self) -> usize {
        self.len() - self.unresolvable_count()
    }

    /// Count of hostnames recorded as unresolvable
    #[must_use]
    pub fn unresolvable_count(&self) -> usize {
        self.0.iter().filter(|r| r.is_unresolvable()).count()
    }

    /// Results ordered by hostname, for stable presentation
    #[must_use]
    pub fn sorted_by_hostname(&self) -> Vec<&ResolutionResult> {
        let mut sorted: Vec<&ResolutionResult> = self.0.iter().collect();
        sorted.sort_by(|a, b| a.hostname.cmp(&b.hostname));
        sorted
    }
}

impl FromIterator<ResolutionResult> for ResultCollection {
    fn from_iter<I: IntoIterator<Item = ResolutionResult>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ResultCollection {
    type Item = ResolutionResult;
    type IntoIter = std::vec::IntoIter<ResolutionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a ResolutionResult;
    type IntoIter = std::slice::Iter<'a, ResolutionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
