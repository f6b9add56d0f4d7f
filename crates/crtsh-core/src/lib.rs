//! Core types for the crtsh toolkit.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - **Types**: certificate records, hostname sets and resolution results
//! - **Extraction**: turning certificate name-value blocks into a [`HostnameSet`]
//! - **Errors**: a single [`CrtshError`] for the record source and its callers
//!
//! # Example
//!
//! ```rust
//! use crtsh_core::{extract_hostnames, CertificateRecord};
//!
//! let record = CertificateRecord {
//!     name_value: "*.example.com\nwww.example.com".to_string(),
//!     ..CertificateRecord::default()
//! };
//!
//! let names = extract_hostnames(&[record]);
//! assert!(names.contains("www.example.com"));
//! assert_eq!(names.len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/crtsh-core/0.1.0")]

mod error;
pub mod extract;
pub mod types;

pub use error::{CrtshError, Result};
pub use extract::{extract_hostnames, extract_hostnames_with, EmailPolicy};
pub use types::*;
