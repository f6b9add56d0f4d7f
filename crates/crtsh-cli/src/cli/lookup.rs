//! Fetch, extract, optionally resolve, then render.

use anyhow::{Context as _, Result};
use crtsh::recon::{DnsServer, HickoryLookup, ResolverPool};
use crtsh::{extract_hostnames, CrtshClient};
use tracing::info;

use crate::config::RunConfig;
use crate::output::Presenter;

/// Run one lookup and return the text to print.
///
/// Any fetch failure aborts before anything is rendered; individual DNS
/// failures only mark their host as unresolvable.
pub async fn execute(config: &RunConfig) -> Result<String> {
    let mut builder = CrtshClient::builder();
    if let Some(endpoint) = &config.endpoint {
        builder = builder.base_url(endpoint);
    }
    let client = builder.build()?;

    let records = client
        .query(&config.domain)
        .await
        .with_context(|| format!("failed to fetch certificates for {:?}", config.domain))?;
    let names = extract_hostnames(&records);
    info!(
        domain = %config.domain,
        records = records.len(),
        hostnames = names.len(),
        "extracted hostnames"
    );

    let presenter = Presenter::new(config.output, config.show_unresolvable, config.color);

    if !config.live {
        return presenter.names(&config.domain, &names);
    }

    let server = DnsServer::resolve(&config.dns_server, config.dns_port)
        .await
        .with_context(|| format!("cannot use DNS server {:?}", config.dns_server))?;
    info!(%server, workers = config.pool.workers, "checking live hosts");

    let lookup = HickoryLookup::new(server, config.pool.lookup_timeout);
    let results = ResolverPool::new(lookup, config.pool)
        .resolve_all(&names)
        .await?;

    presenter.results(&config.domain, &results)
}
