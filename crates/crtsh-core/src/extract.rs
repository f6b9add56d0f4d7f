//! Hostname extraction from certificate name-value blocks.

use crate::types::{CertificateRecord, HostnameSet};

/// What to do with SAN entries that look like email addresses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmailPolicy {
    /// Drop any entry containing `@`
    #[default]
    Exclude,
    /// Keep email-like entries as hostnames
    Keep,
}

/// Extract hostnames using the default policy (emails excluded).
#[must_use]
pub fn extract_hostnames(records: &[CertificateRecord]) -> HostnameSet {
    extract_hostnames_with(records, EmailPolicy::default())
}

/// Extract hostnames from every record's name-value field.
///
/// Each line is a candidate. Empty lines and wildcard entries (`*.`) are
/// skipped, as are email-like entries under [`EmailPolicy::Exclude`].
#[must_use]
pub fn extract_hostnames_with(records: &[CertificateRecord], policy: EmailPolicy) -> HostnameSet {
    let mut names = HostnameSet::new();

    for record in records {
        for token in record.names() {
            let token = token.strip_suffix('\r').unwrap_or(token);
            if accept(token, policy) {
                names.insert(token);
            }
        }
    }

    names
}

fn accept(token: &str, policy: EmailPolicy) -> bool {
    if token.is_empty() || token.starts_with('*') {
        return false;
    }
    !(policy == EmailPolicy::Exclude && token.contains('@'))
}
