// SPDX-License-Identifier: AGPL-3.0-or-later

mod config;
mod http;
mod schema;

use std::convert::TryInto;

use anyhow::{Context, Result};
use log::info;
use relay_node::Configuration;

use crate::config::load_config;
use crate::http::http_service;
use crate::schema::{build_demo_schema, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from file, environment and command line arguments
    let (config_file_path, config_file) = load_config().context("Could not load configuration")?;

    env_logger::Builder::new()
        .parse_filters(&config_file.log_filter())
        .init();

    if let Some(path) = config_file_path {
        info!("Loaded config file from {}", path.display());
    }

    let http_port = config_file.http_port;
    let config: Configuration = config_file
        .try_into()
        .context("Invalid configuration")?;

    let schema = build_demo_schema(&config, MemoryStore::demo())?;
    http_service(http_port, schema).await
}
