//! Command-line argument definitions using clap.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Find subdomains in certificate-transparency logs
///
/// Queries crt.sh for every certificate issued under DOMAIN, lists the
/// hostnames they cover, and optionally checks which of them resolve.
#[derive(Parser, Debug)]
#[command(name = "crtsh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Domain to search for (e.g. example.com)
    pub domain: String,

    /// Check whether each host resolves
    #[arg(short = 'l', long = "live")]
    pub live: bool,

    /// Include unresolvable hosts in the output
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Print results as a table; pass -t=false for plain lines
    #[arg(
        short = 't',
        long = "table",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub table: bool,

    /// DNS server to use [default: 8.8.8.8]
    #[arg(short = 'd', long = "dns", env = "CRTSH_DNS_SERVER", value_name = "SERVER")]
    pub dns_server: Option<String>,

    /// DNS port number [default: 53]
    #[arg(short = 'p', long = "port", env = "CRTSH_DNS_PORT", value_name = "PORT")]
    pub dns_port: Option<u16>,

    /// Number of concurrent lookups [default: 10]
    #[arg(short = 'w', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Per-lookup timeout in seconds [default: 5]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Emit JSON instead of a table or plain lines
    #[arg(long)]
    pub json: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Certificate search endpoint
    #[arg(long, env = "CRTSH_ENDPOINT", hide = true)]
    pub endpoint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("crtsh").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = parse(&["example.com"]).unwrap();
        assert_eq!(cli.domain, "example.com");
        assert!(!cli.live);
        assert!(!cli.all);
        assert!(cli.table);
        assert!(!cli.json);
        assert_eq!(cli.workers, None);
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-l", "-a", "-d", "1.1.1.1", "-p", "5353", "example.com"]).unwrap();
        assert!(cli.live);
        assert!(cli.all);
        assert_eq!(cli.dns_server.as_deref(), Some("1.1.1.1"));
        assert_eq!(cli.dns_port, Some(5353));
    }

    #[test]
    fn table_flag_takes_optional_value() {
        assert!(!parse(&["-t=false", "example.com"]).unwrap().table);
        assert!(!parse(&["--table=false", "example.com"]).unwrap().table);

        let bare = parse(&["-t", "example.com"]).unwrap();
        assert!(bare.table);
        assert_eq!(bare.domain, "example.com");
    }

    #[test]
    fn exactly_one_domain() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.example.com", "b.example.com"]).is_err());
    }

    #[test]
    fn port_must_be_numeric() {
        assert!(parse(&["-p", "dns", "example.com"]).is_err());
    }
}
