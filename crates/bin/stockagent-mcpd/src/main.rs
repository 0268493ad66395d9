//! Daemon entry point for the StockAgent MCP server.
//!
//! Loads configuration from CLI arguments and the environment, prints the
//! startup banner to stderr, and serves MCP over stdio and/or streamable HTTP.

mod banner;
mod config;
mod logging;

use std::sync::Arc;

use stockagent_core::{PortfolioLoader, PortfolioLookup};
use stockagent_mcp::server::{serve_stdio, serve_streamable_http};

use crate::config::{ConfigError, StockAgentConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = StockAgentConfig::from_args()?;
    logging::init_logger(&config.log_filter)?;
    banner::write_banner(&mut std::io::stderr().lock())?;

    let loader = PortfolioLoader::new(config.fetch_timeout)?;
    let lookup = Arc::new(PortfolioLookup::new(loader, config.lookup_defaults()));
    let classifier = Arc::new(config.classifier());
    let http_config = config.http_config();

    match (config.enable_stdio, config.mcp_serve) {
        (true, true) => {
            tokio::try_join!(
                serve_stdio(lookup.clone(), classifier.clone()),
                serve_streamable_http(lookup, classifier, http_config),
            )?;
        }
        (true, false) => serve_stdio(lookup, classifier).await?,
        (false, true) => serve_streamable_http(lookup, classifier, http_config).await?,
        (false, false) => return Err(ConfigError::NoTransport.into()),
    }
    Ok(())
}
