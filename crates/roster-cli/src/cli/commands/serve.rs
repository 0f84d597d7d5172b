//! `roster serve` - runs the paginated users API.

use std::path::PathBuf;

use anyhow::{Context, Result};
use roster_core::config::{Config, RunMode};
use roster_server::{Server, ServerOptions, UserStore};

use crate::logging;

/// Command-line overrides for the settled server configuration.
pub struct ServeOverrides {
    pub port: Option<u16>,
    pub data: Option<PathBuf>,
    pub origin: Option<String>,
    pub static_dir: Option<PathBuf>,
}

pub async fn run(mut config: Config, overrides: ServeOverrides) -> Result<()> {
    logging::init_server();

    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(data) = overrides.data {
        config.server.data_path = data;
    }
    if let Some(origin) = overrides.origin {
        config.server.client_origin = origin;
    }
    if let Some(dir) = overrides.static_dir {
        config.server.static_dir = Some(dir);
    }

    // The dataset is read exactly once; a bad path fails fast here instead
    // of surfacing as request errors later.
    let store = UserStore::load(&config.server.data_path).context("load user data")?;

    // The static fallback only applies in production mode.
    let static_dir = match config.server.mode {
        RunMode::Production => config.server.static_dir.clone(),
        RunMode::Development => None,
    };

    let server = Server::bind(
        store,
        ServerOptions {
            port: config.server.port,
            client_origin: config.server.client_origin.clone(),
            static_dir,
        },
    )
    .await
    .context("start server")?;

    server.run().await
}
