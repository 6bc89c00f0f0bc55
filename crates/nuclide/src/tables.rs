//! Raw reference tables and their on-disk formats

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

// external crates
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// internal modules
use crate::error::Result;

/// Row of the nuclide table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuclideRow {
    /// Nuclide identifier e.g. 'Ra-226'
    pub nuclide: String,
    /// Atomic number
    pub z: u16,
    /// Mass number
    pub a: u16,
    /// Half-life (s), blank or `inf` for stable nuclides
    pub half_life: Option<f64>,
}

/// Row of the decay table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayRow {
    /// Decaying nuclide
    pub parent: String,
    /// Product nuclide
    pub daughter: String,
    /// Decay mode symbol e.g. 'A', 'B-'
    pub mode: String,
    /// Branching ratio as a fraction
    pub ratio: f64,
}

/// Row of the gamma transition table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaRow {
    /// Emitting nuclide
    pub nuclide: String,
    /// Line energy (keV)
    pub energy: f64,
    /// Relative intensity (% per decay)
    pub intensity: f64,
}

/// Row of the characteristic X-ray table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XrayRow {
    /// Element symbol
    pub element: String,
    /// Line energy (keV)
    pub energy: f64,
    /// Shell transition e.g. 'Ka1'
    pub shell: String,
}

/// Unvalidated reference data
///
/// This is the serialisable form of the dataset, kept as close as possible to
/// the tabular sources it comes from. Nothing in here is checked until it is
/// handed to [NuclideDatabase::load()](crate::NuclideDatabase::load).
///
/// Tables may be read from a directory of CSV files, or from JSON and binary
/// snapshots produced by [write_json()](ReferenceTables::write_json) and
/// [write_binary()](ReferenceTables::write_binary).
///
/// ```rust
/// # use gtools_nuclide::ReferenceTables;
/// let tables = ReferenceTables::builtin();
/// assert!(tables.nuclides.iter().any(|n| n.nuclide == "Ra-226"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    /// One row per nuclide
    pub nuclides: Vec<NuclideRow>,
    /// One row per decay branch
    pub decays: Vec<DecayRow>,
    /// One row per gamma line
    pub gammas: Vec<GammaRow>,
    /// One row per characteristic X-ray line, may be empty
    pub xrays: Vec<XrayRow>,
}

impl ReferenceTables {
    /// Tables compiled into the library
    ///
    /// Covers the U-238 series, U-235, Cs-137, Co-60, K-40 and Am-241 along with
    /// K-shell X-rays of the elements involved. Always parses, which is checked
    /// by the test suite.
    pub fn builtin() -> Self {
        Self {
            nuclides: parse_embedded(include_str!("../data/nuclides.csv")),
            decays: parse_embedded(include_str!("../data/decays.csv")),
            gammas: parse_embedded(include_str!("../data/gammas.csv")),
            xrays: parse_embedded(include_str!("../data/xrays.csv")),
        }
    }

    /// Read tables from a directory of CSV files
    ///
    /// Expects `nuclides.csv`, `decays.csv` and `gammas.csv` with headers
    /// matching the row fields. An `xrays.csv` file is optional.
    ///
    /// ```rust, no_run
    /// # use gtools_nuclide::ReferenceTables;
    /// let tables = ReferenceTables::read_csv_dir("path/to/tables").unwrap();
    /// ```
    pub fn read_csv_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Reading reference tables from {}", dir.display());

        let xrays_path = dir.join("xrays.csv");
        let xrays = match xrays_path.exists() {
            true => read_csv_file(xrays_path)?,
            false => {
                debug!("No xrays.csv found, X-ray table left empty");
                Vec::new()
            }
        };

        Ok(Self {
            nuclides: read_csv_file(dir.join("nuclides.csv"))?,
            decays: read_csv_file(dir.join("decays.csv"))?,
            gammas: read_csv_file(dir.join("gammas.csv"))?,
            xrays,
        })
    }

    /// Write tables to a directory of CSV files readable by
    /// [read_csv_dir()](ReferenceTables::read_csv_dir)
    pub fn write_csv_dir<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        write_csv_file(dir.join("nuclides.csv"), &self.nuclides)?;
        write_csv_file(dir.join("decays.csv"), &self.decays)?;
        write_csv_file(dir.join("gammas.csv"), &self.gammas)?;
        write_csv_file(dir.join("xrays.csv"), &self.xrays)?;
        Ok(())
    }

    /// Read a JSON snapshot
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write a pretty JSON snapshot
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let f = BufWriter::new(File::create(path)?);
        Ok(serde_json::to_writer_pretty(f, self)?)
    }

    /// Decode a binary snapshot
    pub fn read_binary<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(f)?)
    }

    /// Write a compact binary snapshot
    pub fn write_binary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let f = BufWriter::new(File::create(path)?);
        Ok(bincode::serialize_into(f, self)?)
    }

    /// Total number of rows across every table
    pub fn len(&self) -> usize {
        self.nuclides.len() + self.decays.len() + self.gammas.len() + self.xrays.len()
    }

    /// True if every table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ! Private functions

fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader)
}

fn read_csv_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let rows = csv_reader(File::open(path.as_ref())?)
        .deserialize::<T>()
        .collect::<core::result::Result<Vec<T>, csv::Error>>()?;
    debug!("Read {} rows from {}", rows.len(), path.as_ref().display());
    Ok(rows)
}

fn write_csv_file<T: Serialize, P: AsRef<Path>>(path: P, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

// Embedded tables are fixed at compile time, see `builtin_tables_parse`
fn parse_embedded<T: DeserializeOwned>(text: &str) -> Vec<T> {
    csv_reader(text.as_bytes())
        .deserialize::<T>()
        .collect::<core::result::Result<Vec<T>, csv::Error>>()
        .expect("embedded reference table is malformed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::NuclideDatabase;
    use rstest::rstest;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gtools-{name}-{}", std::process::id()))
    }

    /// JSON has no infinity, stable half-lives come back blank
    fn blank_stable(mut tables: ReferenceTables) -> ReferenceTables {
        for row in &mut tables.nuclides {
            if row.half_life.is_some_and(f64::is_infinite) {
                row.half_life = None;
            }
        }
        tables
    }

    #[test]
    fn builtin_tables_parse() {
        let tables = ReferenceTables::builtin();
        assert!(!tables.nuclides.is_empty());
        assert!(!tables.decays.is_empty());
        assert!(!tables.gammas.is_empty());
        assert!(!tables.xrays.is_empty());
    }

    #[test]
    fn stable_half_life_is_infinite() {
        let tables = ReferenceTables::builtin();
        let lead = tables
            .nuclides
            .iter()
            .find(|n| n.nuclide == "Pb-206")
            .unwrap();
        assert!(lead.half_life.map_or(true, f64::is_infinite));
    }

    #[test]
    fn csv_rows_are_trimmed_and_comments_skipped() {
        let text = "# comment line\nnuclide, z, a, half_life\n Co-60 , 27, 60, 1.6634e8\nNi-60,28,60,inf\nNi-58,28,58,\n";
        let rows: Vec<NuclideRow> = csv_reader(text.as_bytes())
            .deserialize::<NuclideRow>()
            .collect::<core::result::Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].nuclide, "Co-60");
        assert_eq!(rows[0].half_life, Some(1.6634e8));
        assert_eq!(rows[1].half_life, Some(f64::INFINITY));
        assert_eq!(rows[2].half_life, None);
    }

    #[test]
    fn json_snapshot_matches_tables() {
        let tables = ReferenceTables::builtin();
        let text = serde_json::to_string(&tables).unwrap();
        let back: ReferenceTables = serde_json::from_str(&text).unwrap();
        assert_eq!(back.nuclides.len(), tables.nuclides.len());
        assert_eq!(back.gammas, tables.gammas);
    }

    #[test]
    fn csv_directory_round_trip() {
        let dir = scratch("csv-dir");
        let tables = ReferenceTables::builtin();
        tables.write_csv_dir(&dir).unwrap();

        let back = ReferenceTables::read_csv_dir(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(back, tables);
        assert!(NuclideDatabase::load(back).is_ok());
    }

    #[test]
    fn csv_directory_without_xrays() {
        let dir = scratch("csv-no-xrays");
        let tables = ReferenceTables::builtin();
        tables.write_csv_dir(&dir).unwrap();
        std::fs::remove_file(dir.join("xrays.csv")).unwrap();

        let back = ReferenceTables::read_csv_dir(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(back.xrays.is_empty());
        assert_eq!(back.nuclides, tables.nuclides);
        assert_eq!(back.gammas, tables.gammas);
        let db = NuclideDatabase::load(back).unwrap();
        assert!(db.xrays().is_empty());
    }

    #[test]
    fn csv_directory_missing_a_table() {
        let dir = scratch("csv-no-gammas");
        ReferenceTables::builtin().write_csv_dir(&dir).unwrap();
        std::fs::remove_file(dir.join("gammas.csv")).unwrap();

        let result = ReferenceTables::read_csv_dir(&dir);
        std::fs::remove_dir_all(&dir).unwrap();
        assert!(result.is_err());
    }

    #[rstest]
    #[case::json("json")]
    #[case::binary("bin")]
    fn snapshot_round_trip(#[case] extension: &str) {
        let path = scratch(&format!("snapshot.{extension}"));
        let tables = ReferenceTables::builtin();

        let back = match extension {
            "json" => {
                tables.write_json(&path).unwrap();
                ReferenceTables::read_json(&path)
            }
            _ => {
                tables.write_binary(&path).unwrap();
                ReferenceTables::read_binary(&path)
            }
        }
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        match extension {
            "json" => assert_eq!(blank_stable(back.clone()), blank_stable(tables)),
            _ => assert_eq!(back, tables),
        }

        let db = NuclideDatabase::load(back).unwrap();
        assert!(db.lookup("Pb-206").unwrap().is_stable());
    }

    #[test]
    fn unreadable_snapshots() {
        let path = scratch("garbage.json");
        std::fs::write(&path, "not a snapshot").unwrap();
        assert!(ReferenceTables::read_json(&path).is_err());
        std::fs::remove_file(&path).unwrap();

        assert!(ReferenceTables::read_binary(scratch("missing.bin")).is_err());
    }
}
