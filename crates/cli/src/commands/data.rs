//! Writing and fetching reference tables

// external crates
use log::{info, warn};

// gtools modules
use gtools_nuclide::NuclideDatabase;

// internal modules
use super::Session;
use crate::cli::{ExportArgs, ExportFormat, FetchArgs};
use crate::error::Result;

pub fn export(session: &Session, args: &ExportArgs) -> Result<()> {
    let path = &args.path;
    match args.format {
        ExportFormat::Json => session.tables.write_json(path)?,
        ExportFormat::Binary => session.tables.write_binary(path)?,
        ExportFormat::Csv => session.tables.write_csv_dir(path)?,
    }
    info!(
        "Wrote {} table rows to {}",
        session.tables.len(),
        path.display()
    );
    Ok(())
}

/// Fetch from the IAEA, check the result loads, then write CSV tables
pub fn fetch(args: &FetchArgs) -> Result<()> {
    let tables = gtools_iaea::fetch_tables(&args.nuclides)?;

    let db = NuclideDatabase::load(tables.clone())?;
    for nuclide in &args.nuclides {
        if !db.contains(nuclide) {
            warn!("No usable data for {nuclide}");
        }
    }

    tables.write_csv_dir(&args.output)?;
    info!(
        "Wrote {} nuclides to {}",
        db.len(),
        args.output.display()
    );
    Ok(())
}
