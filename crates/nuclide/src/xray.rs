//! Characteristic X-ray lookup

// external crates
use itertools::Itertools;
use log::debug;
use serde::Serialize;

// gtools modules
use gtools_support::StringExt;

// internal modules
use crate::database::NuclideDatabase;
use crate::error::{Error, Result};
use crate::options::check_energy;
use crate::records::XrayLine;

/// X-ray lines of a single element as parallel sequences
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementXrays {
    /// Line energies (keV), ascending
    pub energies: Vec<f64>,
    /// Shell transition matching each energy
    pub shells: Vec<String>,
}

impl ElementXrays {
    /// Number of lines
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// True if there are no lines
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

impl From<ElementXrays> for (Vec<f64>, Vec<String>) {
    fn from(lines: ElementXrays) -> Self {
        (lines.energies, lines.shells)
    }
}

/// X-ray lookups over a [NuclideDatabase]
///
/// Low energy peaks are often fluorescence from shielding or from the source
/// itself rather than gamma lines, so these are kept alongside.
///
/// ```rust
/// # use gtools_nuclide::{NuclideDatabase, ReferenceTables, XrayLineSearch};
/// let db = NuclideDatabase::load(ReferenceTables::builtin()).unwrap();
/// let search = XrayLineSearch::new(&db);
///
/// // The lead K-alpha1 line
/// let lines = search.search_xray_line(75.0, 0.1).unwrap();
/// assert_eq!(lines[0].element, "Pb");
/// assert_eq!(lines[0].shell, "Ka1");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct XrayLineSearch<'a> {
    db: &'a NuclideDatabase,
}

impl<'a> XrayLineSearch<'a> {
    /// Search the X-ray lines held by `db`
    pub fn new(db: &'a NuclideDatabase) -> Self {
        Self { db }
    }

    /// Every X-ray line within `delta` of `center`
    ///
    /// Sorted by distance from `center`, then by element. Fails with
    /// [Error::InvalidArgument] unless `delta` is finite and positive.
    pub fn search_xray_line(&self, center: f64, delta: f64) -> Result<Vec<XrayLine>> {
        check_energy("center", center)?;
        if !delta.is_finite() || delta <= 0.0 {
            return Err(Error::InvalidArgument {
                name: "delta",
                value: delta,
                reason: "must be finite and > 0",
            });
        }

        let lines = self
            .db
            .xrays()
            .iter()
            .filter(|x| (x.energy - center).abs() <= delta)
            .sorted_by(|a, b| {
                let da = (a.energy - center).abs();
                let db = (b.energy - center).abs();
                da.total_cmp(&db)
                    .then_with(|| a.element.cmp(&b.element))
                    .then(a.energy.total_cmp(&b.energy))
            })
            .cloned()
            .collect::<Vec<XrayLine>>();

        debug!(
            "Found {} X-ray lines within {} keV of {} keV",
            lines.len(),
            delta,
            center
        );
        Ok(lines)
    }

    /// Every X-ray line of an element, by ascending energy
    ///
    /// The symbol is case insensitive. Unknown elements give empty sequences.
    pub fn element_xray_lines(&self, element: &str) -> ElementXrays {
        let symbol = element.trim().as_symbol();
        let (energies, shells) = self
            .db
            .xrays()
            .iter()
            .filter(|x| x.element == symbol)
            .sorted_by(|a, b| a.energy.total_cmp(&b.energy))
            .map(|x| (x.energy, x.shell.clone()))
            .unzip();

        ElementXrays { energies, shells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;

    fn db() -> NuclideDatabase {
        NuclideDatabase::load(ReferenceTables::builtin()).unwrap()
    }

    #[test]
    fn nearby_lines_of_different_elements() {
        let db = db();
        let search = XrayLineSearch::new(&db);

        // Pb Ka2 72.805, Tl Ka1 72.872
        let lines = search.search_xray_line(72.85, 0.1).unwrap();
        let elements: Vec<&str> = lines.iter().map(|x| x.element.as_str()).collect();
        assert_eq!(elements, ["Tl", "Pb"]);
    }

    #[test]
    fn nothing_nearby() {
        let db = db();
        let search = XrayLineSearch::new(&db);
        assert!(search.search_xray_line(10.0, 1.0).unwrap().is_empty());
    }

    #[test]
    fn invalid_delta() {
        let db = db();
        let search = XrayLineSearch::new(&db);
        assert!(matches!(
            search.search_xray_line(75.0, -1.0),
            Err(Error::InvalidArgument { name: "delta", .. })
        ));
    }

    #[test]
    fn lines_of_an_element() {
        let db = db();
        let search = XrayLineSearch::new(&db);

        let lead = search.element_xray_lines("PB");
        assert_eq!(lead.energies, [72.805, 74.969, 84.938, 87.300]);
        assert_eq!(lead.shells, ["Ka2", "Ka1", "Kb1", "Kb2"]);

        assert!(search.element_xray_lines("Xe").is_empty());
    }
}
