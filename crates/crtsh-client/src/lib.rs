//! HTTP client for the crt.sh certificate-transparency search.
//!
//! This crate provides [`CrtshClient`], the record source for the toolkit.

#![doc(html_root_url = "https://docs.rs/crtsh-client/0.1.0")]

mod client;

pub use client::{CrtshClient, CrtshClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use crtsh_core::{CertificateRecord, CrtshError, Result};
