//! Subdomain discovery from certificate-transparency logs.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use crtsh::{extract_hostnames, CrtshClient};
//! use crtsh::recon::{DnsServer, HickoryLookup, PoolConfig, ResolverPool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CrtshClient::new()?;
//!     let records = client.query("example.com").await?;
//!     let names = extract_hostnames(&records);
//!
//!     let config = PoolConfig::default();
//!     let lookup = HickoryLookup::new(DnsServer::default(), config.lookup_timeout);
//!     let results = ResolverPool::new(lookup, config).resolve_all(&names).await?;
//!
//!     for r in results.sorted_by_hostname() {
//!         println!("{} => {}", r.hostname, r.ips_joined());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - rustls plus live DNS resolution
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS
//! - `resolve` - Enable the resolver pool and hickory-backed lookups

#![doc(html_root_url = "https://docs.rs/crtsh/0.1.0")]

// Re-export core types
pub use crtsh_core::*;

// Re-export client
pub use crtsh_client::{CrtshClient, CrtshClientBuilder};

// Re-export the resolver pool if enabled
#[cfg(feature = "resolve")]
pub use crtsh_recon as recon;

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
