//! Concurrent DNS resolution for hostnames found in certificate logs.
//!
//! The [`ResolverPool`] drives a fixed number of workers over a shared queue
//! of hostnames and funnels every answer through a single aggregator. Lookups
//! go through the [`HostLookup`] trait; [`HickoryLookup`] is the production
//! implementation that queries one configured name server.

#![doc(html_root_url = "https://docs.rs/crtsh-recon/0.1.0")]

pub mod dns;
mod error;
pub mod pool;

#[cfg(feature = "hickory")]
pub use dns::HickoryLookup;
pub use dns::{DnsServer, HostLookup};
pub use error::{ReconError, ReconResult};
pub use pool::{PoolConfig, PoolPhase, ResolverPool, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_WORKERS};
