//! Filtered lookup of gamma lines

// standard library
use std::cmp::Ordering;

// external crates
use itertools::Itertools;
use log::{debug, trace};
use serde::Serialize;

// gtools modules
use gtools_support::{f, FloatExt, OptionExt};

// internal modules
use crate::database::NuclideDatabase;
use crate::error::Result;
use crate::id::NuclideId;
use crate::mode::DecayMode;
use crate::options::{check_energy, QueryOptions};

/// Fraction of the strongest line kept by the `limit_intensity` option
pub const LIMIT_INTENSITY_FRACTION: f64 = 0.1;

/// Candidate emitter for an observed energy
///
/// `decay_mode` is the mode of the strongest decay branch feeding the emitter,
/// see [NuclideDatabase::feeding_mode()]. Displayed as `n/a` when nothing in
/// the reference data feeds the emitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Line energy (keV)
    pub energy: f64,
    /// Relative intensity (% per decay)
    pub intensity: f64,
    /// Decay mode into the emitter
    pub decay_mode: Option<DecayMode>,
    /// Half-life of the emitter (s)
    pub half_life: f64,
    /// Emitting nuclide
    pub nuclide: NuclideId,
}

impl std::fmt::Display for SearchHit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = f!(
            "{:>10.3} keV {:>9.4} %  {:<4} {:>11} s  {}",
            self.energy,
            self.intensity,
            self.decay_mode.display_or("n/a"),
            self.half_life.sci(3, 2),
            self.nuclide
        );
        write!(f, "{s}")
    }
}

/// Gamma lines of a single nuclide as parallel sequences
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NuclideLines {
    /// Line energies (keV)
    pub energies: Vec<f64>,
    /// Relative intensities (%) matching `energies`
    pub intensities: Vec<f64>,
}

impl NuclideLines {
    /// Number of lines
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// True if there are no lines
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

impl From<NuclideLines> for (Vec<f64>, Vec<f64>) {
    fn from(lines: NuclideLines) -> Self {
        (lines.energies, lines.intensities)
    }
}

/// Gamma line lookups over a [NuclideDatabase]
///
/// ```rust
/// # use gtools_nuclide::{GammaLineSearch, NuclideDatabase, QueryOptions, ReferenceTables};
/// let db = NuclideDatabase::load(ReferenceTables::builtin()).unwrap();
/// let search = GammaLineSearch::new(&db);
///
/// // What could a peak at 186.87 keV be?
/// let options = QueryOptions::default()
///     .with_delta(1.0)
///     .with_halflife_threshold(60.0)
///     .with_intensity_threshold(1.0);
///
/// let hits = search.search_by_energy(186.87, &options).unwrap();
/// assert_eq!(hits[0].nuclide.to_string(), "Ra-226");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GammaLineSearch<'a> {
    db: &'a NuclideDatabase,
}

impl<'a> GammaLineSearch<'a> {
    /// Search the gamma lines held by `db`
    pub fn new(db: &'a NuclideDatabase) -> Self {
        Self { db }
    }

    /// Every gamma line within `delta` of `center`
    ///
    /// Uses the `delta`, `halflife_threshold` and `intensity_threshold`
    /// options. A line matches if
    ///
    /// - `|energy - center| <= delta`
    /// - the emitter half-life is at least `halflife_threshold`
    /// - the intensity is at least `intensity_threshold`
    ///
    /// Hits are sorted by distance from `center`, then by descending intensity,
    /// then by nuclide. No matches is an empty list rather than an error.
    pub fn search_by_energy(&self, center: f64, options: &QueryOptions) -> Result<Vec<SearchHit>> {
        check_energy("center", center)?;
        options.check_energy_window()?;

        let db = self.db;
        let QueryOptions {
            delta,
            halflife_threshold,
            intensity_threshold,
            ..
        } = *options;

        let hits = db
            .nuclides()
            .enumerate()
            .filter(move |(_, n)| n.half_life >= halflife_threshold)
            .flat_map(move |(i, n)| {
                db.transitions_at(i)
                    .iter()
                    .filter(move |t| (t.energy - center).abs() <= delta)
                    .filter(move |t| t.intensity >= intensity_threshold)
                    .map(move |t| SearchHit {
                        energy: t.energy,
                        intensity: t.intensity,
                        decay_mode: db.feeding_mode_at(i).cloned(),
                        half_life: n.half_life,
                        nuclide: n.id.clone(),
                    })
            })
            .sorted_by(|a, b| by_distance(a, b, center))
            .collect::<Vec<SearchHit>>();

        for hit in &hits {
            trace!("  {hit}");
        }
        debug!(
            "Found {} gamma lines within {} keV of {} keV",
            hits.len(),
            delta,
            center
        );

        Ok(hits)
    }

    /// Gamma lines of one nuclide sorted by descending intensity
    ///
    /// Uses the `intensity_threshold` and `limit_intensity` options. With
    /// `limit_intensity` set, the threshold becomes 10% of the strongest line
    /// of the nuclide and any explicit `intensity_threshold` is ignored.
    ///
    /// A nuclide without gamma lines gives empty sequences.
    ///
    /// ```rust
    /// # use gtools_nuclide::{GammaLineSearch, NuclideDatabase, QueryOptions, ReferenceTables};
    /// let db = NuclideDatabase::load(ReferenceTables::builtin()).unwrap();
    /// let search = GammaLineSearch::new(&db);
    ///
    /// let options = QueryOptions::default().with_limit_intensity(true);
    /// let lines = search.lines_for_nuclide("Pb-214", &options).unwrap();
    ///
    /// assert_eq!(lines.energies, [351.932, 295.224, 241.997]);
    /// ```
    pub fn lines_for_nuclide(&self, nuclide: &str, options: &QueryOptions) -> Result<NuclideLines> {
        let i = self.db.index_of(nuclide)?;
        options.check_line_filter()?;
        Ok(self.lines_at(i, options))
    }

    /// Filtered lines by database index, options already validated
    pub(crate) fn lines_at(&self, i: usize, options: &QueryOptions) -> NuclideLines {
        let transitions = self.db.transitions_at(i);

        let threshold = match options.limit_intensity {
            true => {
                let max = transitions
                    .iter()
                    .map(|t| t.intensity)
                    .fold(0.0, f64::max);
                LIMIT_INTENSITY_FRACTION * max
            }
            false => options.intensity_threshold,
        };

        let (energies, intensities) = transitions
            .iter()
            .filter(|t| t.intensity >= threshold)
            .sorted_by(|a, b| {
                b.intensity
                    .total_cmp(&a.intensity)
                    .then(a.energy.total_cmp(&b.energy))
            })
            .map(|t| (t.energy, t.intensity))
            .unzip();

        NuclideLines {
            energies,
            intensities,
        }
    }
}

/// Closest first, then strongest, then by nuclide and energy for determinism
fn by_distance(a: &SearchHit, b: &SearchHit, center: f64) -> Ordering {
    let da = (a.energy - center).abs();
    let db = (b.energy - center).abs();
    da.total_cmp(&db)
        .then(b.intensity.total_cmp(&a.intensity))
        .then_with(|| a.nuclide.cmp(&b.nuclide))
        .then(a.energy.total_cmp(&b.energy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::tables::{GammaRow, NuclideRow, ReferenceTables};

    fn db() -> NuclideDatabase {
        NuclideDatabase::load(ReferenceTables::builtin()).unwrap()
    }

    /// Three lines exactly 0.5 keV either side of 100.5 keV
    fn equidistant() -> NuclideDatabase {
        let tables = ReferenceTables {
            nuclides: vec![
                NuclideRow {
                    nuclide: "Cs-137".to_string(),
                    z: 55,
                    a: 137,
                    half_life: Some(9.4925e8),
                },
                NuclideRow {
                    nuclide: "Co-60".to_string(),
                    z: 27,
                    a: 60,
                    half_life: Some(1.6634e8),
                },
            ],
            gammas: vec![
                GammaRow {
                    nuclide: "Co-60".to_string(),
                    energy: 100.0,
                    intensity: 5.0,
                },
                GammaRow {
                    nuclide: "Cs-137".to_string(),
                    energy: 101.0,
                    intensity: 50.0,
                },
                GammaRow {
                    nuclide: "Co-60".to_string(),
                    energy: 101.0,
                    intensity: 50.0,
                },
            ],
            ..Default::default()
        };
        NuclideDatabase::load(tables).unwrap()
    }

    #[test]
    fn window_is_inclusive() {
        let db = equidistant();
        let search = GammaLineSearch::new(&db);

        let options = QueryOptions::default().with_delta(0.5);
        assert_eq!(search.search_by_energy(100.5, &options).unwrap().len(), 3);

        let options = QueryOptions::default().with_delta(0.25);
        assert!(search.search_by_energy(100.5, &options).unwrap().is_empty());
    }

    #[test]
    fn equal_distances_order_by_intensity_then_nuclide() {
        let db = equidistant();
        let search = GammaLineSearch::new(&db);

        let options = QueryOptions::default().with_delta(0.5);
        let hits = search.search_by_energy(100.5, &options).unwrap();
        let found: Vec<(String, f64)> = hits
            .iter()
            .map(|h| (h.nuclide.to_string(), h.energy))
            .collect();
        assert_eq!(
            found,
            [
                ("Co-60".to_string(), 101.0),
                ("Cs-137".to_string(), 101.0),
                ("Co-60".to_string(), 100.0)
            ]
        );
    }

    #[test]
    fn closest_line_comes_first() {
        let db = db();
        let search = GammaLineSearch::new(&db);

        // Rn-218 609.31 is marginally closer than Bi-214 609.312
        let options = QueryOptions::default().with_delta(1.0);
        let hits = search.search_by_energy(609.0, &options).unwrap();
        let names: Vec<String> = hits.iter().map(|h| h.nuclide.to_string()).collect();
        assert_eq!(names, ["Rn-218", "Bi-214"]);
        assert_eq!(hits[1].decay_mode, Some(DecayMode::BetaMinus));
    }

    #[test]
    fn stable_or_unfed_emitters_report_no_mode() {
        let db = db();
        let search = GammaLineSearch::new(&db);

        let hits = search
            .search_by_energy(49.55, &QueryOptions::default().with_delta(0.01))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nuclide.to_string(), "U-238");
        assert_eq!(hits[0].decay_mode, None);
        assert!(hits[0].to_string().contains("n/a"));
    }

    #[test]
    fn thresholds_filter_hits() {
        let db = db();
        let search = GammaLineSearch::new(&db);

        // 799.6 Tl-210 (78 s), 799.7 Po-214 (164 us), 803.06 Po-210 (138 d)
        let options = QueryOptions::default().with_delta(5.0);
        assert_eq!(search.search_by_energy(800.0, &options).unwrap().len(), 3);

        let options = options.with_halflife_threshold(60.0);
        let hits = search.search_by_energy(800.0, &options).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.half_life >= 60.0));

        let options = options.with_intensity_threshold(1.0);
        let hits = search.search_by_energy(800.0, &options).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nuclide.to_string(), "Tl-210");
    }

    #[test]
    fn empty_is_not_an_error() {
        let db = db();
        let search = GammaLineSearch::new(&db);
        let options = QueryOptions::default().with_delta(0.5);
        assert!(search.search_by_energy(5000.0, &options).unwrap().is_empty());
    }

    #[test]
    fn invalid_search_arguments() {
        let db = db();
        let search = GammaLineSearch::new(&db);

        let options = QueryOptions::default().with_delta(0.0);
        assert!(matches!(
            search.search_by_energy(100.0, &options),
            Err(Error::InvalidArgument { name: "delta", .. })
        ));

        let options = QueryOptions::default();
        assert!(matches!(
            search.search_by_energy(f64::NAN, &options),
            Err(Error::InvalidArgument { name: "center", .. })
        ));
    }

    #[test]
    fn explicit_threshold_for_nuclide_lines() {
        let db = db();
        let search = GammaLineSearch::new(&db);

        let options = QueryOptions::default().with_intensity_threshold(10.0);
        let lines = search.lines_for_nuclide("Bi-214", &options).unwrap();
        assert_eq!(lines.energies, [609.312, 1764.494, 1120.287]);
        assert_eq!(lines.intensities, [45.49, 15.28, 14.91]);
    }

    #[test]
    fn limit_overrides_explicit_threshold() {
        let db = db();
        let search = GammaLineSearch::new(&db);

        let options = QueryOptions::default()
            .with_intensity_threshold(50.0)
            .with_limit_intensity(true);
        let lines = search.lines_for_nuclide("Pb-214", &options).unwrap();
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn nuclide_without_lines() {
        let db = db();
        let search = GammaLineSearch::new(&db);

        let options = QueryOptions::default().with_limit_intensity(true);
        let lines = search.lines_for_nuclide("Po-218", &options).unwrap();
        assert!(lines.is_empty());
        assert!(lines.intensities.is_empty());
    }

    #[test]
    fn unknown_nuclide_lines() {
        let db = db();
        let search = GammaLineSearch::new(&db);
        assert!(matches!(
            search.lines_for_nuclide("Xx-999", &QueryOptions::default()),
            Err(Error::NotFound { .. })
        ));
    }
}
