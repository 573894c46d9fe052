//! Terminal setup and restoration

use pwdb_core::prelude::*;
use ratatui::DefaultTerminal;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Enter the alternate screen in raw mode
pub fn init() -> Result<DefaultTerminal> {
    ratatui::try_init().map_err(|e| Error::terminal(format!("cannot initialize terminal: {e}")))
}

/// Leave the alternate screen and raw mode
pub fn restore() {
    if let Err(e) = ratatui::try_restore() {
        warn!("Failed to restore terminal: {}", e);
    }
}
