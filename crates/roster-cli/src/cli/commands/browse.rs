//! `roster browse` - runs the terminal table browser.

use anyhow::Result;
use roster_core::config::Config;

use crate::logging;

pub fn run(config: &Config, base_url: Option<String>) -> Result<()> {
    // Logs go to a file; stdout belongs to the alternate screen.
    let _guard = logging::init_tui()?;

    let mut config = config.clone();
    if let Some(url) = base_url {
        config.client.base_url = url;
    }

    roster_tui::run_browser(&config)
}
