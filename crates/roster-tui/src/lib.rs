//! Full-screen TUI for browsing the user list.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod text;
pub mod update;
pub mod window;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use roster_core::client::FetchClient;
use roster_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive table browser.
///
/// Must be called from within a tokio runtime: the event loop itself is
/// synchronous, but page fetches are spawned onto the runtime.
pub fn run_browser(config: &Config) -> Result<()> {
    // The browser requires a terminal to render into.
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Browse mode requires a terminal.\n\
             Point ROSTER_BASE_URL at the API and run from an interactive shell."
        );
    }

    let client = FetchClient::new(&config.client)?;
    let mut runtime = TuiRuntime::new(config, client)?;
    runtime.run()
}
