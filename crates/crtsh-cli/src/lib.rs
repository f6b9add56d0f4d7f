//! # crtsh-cli
//!
//! Command-line front end for the crtsh toolkit.
//!
//! ## Features
//!
//! - **Certificate-transparency search**: pulls every certificate crt.sh knows for a domain
//! - **Subdomain extraction**: wildcard and email entries filtered out
//! - **Live check**: concurrent A lookups against a chosen DNS server
//! - **Output**: aligned tables, plain lines, or JSON

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
