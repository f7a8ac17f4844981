use std::io;

use anyhow::Context;

use bestbuy_cli::{catalog, CliConfig, Menu};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::from_env();
    bestbuy_observability::init(&config.log);

    let store = catalog::seed_store().context("failed to build the initial catalog")?;
    tracing::info!(products = store.len(), "store ready");

    let stdin = io::stdin();
    let mut menu = Menu::new(store, stdin.lock(), io::stdout());
    menu.run().context("terminal I/O failed")?;

    tracing::info!("session ended");
    Ok(())
}
