//! crtsh - subdomain discovery from certificate-transparency logs.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    crtsh_cli::run().await
}
