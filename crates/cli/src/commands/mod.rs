//! Implementation of each subcommand

pub mod data;
pub mod query;

// standard library
use std::path::Path;

// external crates
use log::info;
use serde::Serialize;

// gtools modules
use gtools_nuclide::{NuclideDatabase, QueryOptions, ReferenceTables};

// internal modules
use crate::error::{CliError, Result};

/// Everything shared by commands that query reference data
pub struct Session {
    /// Tables the database was built from
    pub tables: ReferenceTables,
    /// Validated database
    pub db: NuclideDatabase,
    /// Base query options, before any command line overrides
    pub options: QueryOptions,
    /// Print results as JSON rather than text
    pub json: bool,
}

impl Session {
    /// Load tables from `data` or the built-in set, and base options from `config`
    pub fn new(data: Option<&Path>, config: Option<&Path>, json: bool) -> Result<Self> {
        let tables = match data {
            Some(path) => read_tables(path)?,
            None => ReferenceTables::builtin(),
        };

        let options = match config {
            Some(path) => {
                info!("Reading query options from {}", path.display());
                QueryOptions::from_json_file(path)?
            }
            None => QueryOptions::default(),
        };

        Ok(Self {
            db: NuclideDatabase::load(tables.clone())?,
            tables,
            options,
            json,
        })
    }

    /// Print either the JSON form of a result, or its text form
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        match self.json {
            true => println!("{}", serde_json::to_string_pretty(value)?),
            false => println!("{}", text()),
        }
        Ok(())
    }
}

/// Reference tables from a CSV directory or a snapshot file
fn read_tables(path: &Path) -> Result<ReferenceTables> {
    info!("Reading reference tables from {}", path.display());
    if path.is_dir() {
        return Ok(ReferenceTables::read_csv_dir(path)?);
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(ReferenceTables::read_json(path)?),
        Some("bin") => Ok(ReferenceTables::read_binary(path)?),
        _ => Err(CliError::UnknownTables {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn builtin_by_default() {
        let session = Session::new(None, None, false).unwrap();
        assert!(session.db.contains("Ra-226"));
        assert_eq!(session.options, QueryOptions::default());
    }

    #[rstest]
    #[case("tables.xlsx")]
    #[case("tables.csv")]
    #[case("no-such-directory")]
    fn unknown_table_format(#[case] path: &str) {
        let result = read_tables(Path::new(path));
        assert!(matches!(result, Err(CliError::UnknownTables { .. })));
    }

    #[rstest]
    #[case("missing.json")]
    #[case("missing.bin")]
    fn missing_snapshot(#[case] path: &str) {
        let path = std::env::temp_dir().join(path);
        let result = Session::new(Some(&path), None, false);
        assert!(matches!(result, Err(CliError::Nuclide(_))));
    }

    #[test]
    fn config_sets_base_options() {
        let path = std::env::temp_dir().join(format!("gtools-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "delta": 0.5, "limit_intensity": true }"#).unwrap();

        let session = Session::new(None, Some(&path), false).unwrap();
        assert_eq!(session.options.delta, 0.5);
        assert!(session.options.limit_intensity);
        assert_eq!(session.options.intensity_threshold, 0.0);

        std::fs::remove_file(path).unwrap();
    }
}
