use serde::{Deserialize, Deserializer, Serialize};

/// One certificate entry as returned by the crt.sh JSON output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Issuing CA identifier
    #[serde(default)]
    pub issuer_ca_id: i64,

    /// Issuer distinguished name
    #[serde(default, deserialize_with = "null_as_default")]
    pub issuer_name: String,

    /// Certificate common name
    #[serde(default, deserialize_with = "null_as_default")]
    pub common_name: String,

    /// Newline-delimited SAN entries (hostnames, wildcards, emails)
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_value: String,

    /// crt.sh certificate id
    #[serde(default)]
    pub id: i64,

    /// When the log entry was recorded
    #[serde(default)]
    pub entry_timestamp: Option<String>,

    /// Start of the validity window
    #[serde(default)]
    pub not_before: Option<String>,

    /// End of the validity window
    #[serde(default)]
    pub not_after: Option<String>,

    /// Hex-encoded certificate serial
    #[serde(default)]
    pub serial_number: Option<String>,
}

impl CertificateRecord {
    /// Iterate over the raw name-value lines of this record
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.name_value.split('\n')
    }
}

fn null_as_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
