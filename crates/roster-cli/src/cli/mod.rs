//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use roster_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "roster")]
#[command(version = "0.1")]
#[command(about = "Paginated user list demo: REST server + virtualized terminal table")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Serve the paginated users API
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the users.json dataset (overrides config)
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Origin allowed for cross-origin GETs (overrides config)
        #[arg(long, value_name = "ORIGIN")]
        origin: Option<String>,

        /// Serve this prebuilt static bundle as a catch-all fallback
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,
    },

    /// Browse the user table (default)
    Browse {
        /// API base URL, including the /api/v1 prefix (overrides config)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    // default to browse mode
    let Some(command) = cli.command else {
        return commands::browse::run(&config, None);
    };

    match command {
        Commands::Serve {
            port,
            data,
            origin,
            static_dir,
        } => {
            commands::serve::run(
                config,
                commands::serve::ServeOverrides {
                    port,
                    data,
                    origin,
                    static_dir,
                },
            )
            .await
        }
        Commands::Browse { base_url } => commands::browse::run(&config, base_url),
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
