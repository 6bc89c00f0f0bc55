//! Logger setup

// internal modules
use crate::error::Result;

/// Initialise `stderrlog` for the binary and every gtools library
///
/// Warnings are always shown unless `quiet` is set, each `-v` raises the
/// level by one through info, debug, and trace.
pub fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    stderrlog::new()
        .quiet(quiet)
        .verbosity(1 + verbose as usize)
        .show_level(true)
        .timestamp(stderrlog::Timestamp::Off)
        .init()?;
    Ok(())
}
