//! Error type of the command line tool

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, CliError>`
pub type Result<T> = core::result::Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Nuclide(#[from] gtools_nuclide::Error),

    #[error(transparent)]
    Iaea(#[from] gtools_iaea::Error),

    #[error("failed to write JSON output")]
    Json(#[from] serde_json::Error),

    #[error("could not start logging")]
    Logger(#[from] log::SetLoggerError),

    #[error("unable to read reference tables from \"{path}\"", path = path.display())]
    UnknownTables { path: PathBuf },
}
