//! Binary entry point that glues the configured gateway to the interactive
//! menu: bring up diagnostics, load the connection settings, and drive the
//! root menu loop over stdin/stdout until the user exits.

use std::io::{self, BufReader};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use biblio::{DbConfig, Gateway, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = DbConfig::load().context("failed to load database configuration")?;
    let gateway = Gateway::new(&config);

    let stdin = BufReader::new(io::stdin());
    let mut session = Session::new(gateway, stdin, io::stdout());
    session.run().await?;
    Ok(())
}
