//! Convenience functions over the built-in dataset

// standard library
use std::sync::OnceLock;

// internal modules
use crate::chain::DecayChainResolver;
use crate::database::NuclideDatabase;
use crate::error::Result;
use crate::id::NuclideId;
use crate::options::QueryOptions;
use crate::records::XrayLine;
use crate::search::{GammaLineSearch, SearchHit};
use crate::spectrum::ChainGammaAggregator;
use crate::tables::ReferenceTables;
use crate::xray::XrayLineSearch;

// Only ever validate the embedded tables once on first use
static BUILTIN: OnceLock<NuclideDatabase> = OnceLock::new();

impl NuclideDatabase {
    /// Shared database of the built-in reference tables
    ///
    /// Built on first use and kept for the life of the process. See
    /// [ReferenceTables::builtin()] for what is covered.
    pub fn builtin() -> &'static NuclideDatabase {
        BUILTIN.get_or_init(|| {
            NuclideDatabase::load(ReferenceTables::builtin())
                .expect("built-in reference tables failed validation")
        })
    }
}

/// Find candidate emitters for an observed peak
///
/// Shorthand for [GammaLineSearch::search_by_energy()] on the built-in data.
///
/// ```rust
/// # use gtools_nuclide::search_gamma_line;
/// let hits = search_gamma_line(186.87, 1.0, 60.0, 1.0).unwrap();
/// assert_eq!(hits[0].nuclide.to_string(), "Ra-226");
/// assert_eq!(hits[0].energy, 186.211);
/// ```
pub fn search_gamma_line(
    energy: f64,
    delta: f64,
    halflife_threshold: f64,
    intensity_threshold: f64,
) -> Result<Vec<SearchHit>> {
    let options = QueryOptions::default()
        .with_delta(delta)
        .with_halflife_threshold(halflife_threshold)
        .with_intensity_threshold(intensity_threshold);
    GammaLineSearch::new(NuclideDatabase::builtin()).search_by_energy(energy, &options)
}

/// Descendants of a nuclide in discovery order
///
/// Shorthand for [DecayChainResolver::resolve()] on the built-in data.
///
/// ```rust
/// # use gtools_nuclide::decay_products;
/// let products = decay_products("Ra-226", 0.01).unwrap();
/// assert!(products.iter().any(|id| id.to_string() == "Pb-214"));
/// assert!(decay_products("Pb-206", 0.0).unwrap().is_empty());
/// ```
pub fn decay_products(nuclide: &str, branching_ratio_threshold: f64) -> Result<Vec<NuclideId>> {
    let options = QueryOptions::default().with_branching_ratio_threshold(branching_ratio_threshold);
    let chain = DecayChainResolver::new(NuclideDatabase::builtin())
        .resolve(nuclide, &options)?;
    Ok(chain.into())
}

/// Gamma line `(energies, intensities)` of a nuclide by descending intensity
///
/// Shorthand for [GammaLineSearch::lines_for_nuclide()] on the built-in data.
///
/// ```rust
/// # use gtools_nuclide::nuclide_gamma_lines;
/// let (energies, intensities) = nuclide_gamma_lines("Co-60", 1.0, false).unwrap();
/// assert_eq!(energies, [1332.492, 1173.228]);
/// assert_eq!(intensities.len(), 2);
/// ```
pub fn nuclide_gamma_lines(
    nuclide: &str,
    intensity_threshold: f64,
    limit_intensity: bool,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let options = QueryOptions::default()
        .with_intensity_threshold(intensity_threshold)
        .with_limit_intensity(limit_intensity);
    let lines = GammaLineSearch::new(NuclideDatabase::builtin())
        .lines_for_nuclide(nuclide, &options)?;
    Ok(lines.into())
}

/// Flattened `(nuclides, energies)` of a whole decay chain, root first
///
/// Shorthand for [ChainGammaAggregator::decay_products_spectrum()] on the
/// built-in data.
///
/// ```rust
/// # use gtools_nuclide::decay_products_spectrum;
/// let (nuclides, energies) = decay_products_spectrum("Cs-137", 0.0, 1.0, false).unwrap();
/// assert_eq!(nuclides[0].to_string(), "Ba-137m");
/// assert_eq!(energies[0], 661.657);
/// ```
pub fn decay_products_spectrum(
    nuclide: &str,
    branching_ratio_threshold: f64,
    intensity_threshold: f64,
    limit_intensity: bool,
) -> Result<(Vec<NuclideId>, Vec<f64>)> {
    let options = QueryOptions::default()
        .with_branching_ratio_threshold(branching_ratio_threshold)
        .with_intensity_threshold(intensity_threshold)
        .with_limit_intensity(limit_intensity);
    let spectrum = ChainGammaAggregator::new(NuclideDatabase::builtin())
        .decay_products_spectrum(nuclide, &options)?;
    Ok(spectrum.into())
}

/// Characteristic X-rays within `delta` of an energy
///
/// Shorthand for [XrayLineSearch::search_xray_line()] on the built-in data.
pub fn search_xray_line(energy: f64, delta: f64) -> Result<Vec<XrayLine>> {
    XrayLineSearch::new(NuclideDatabase::builtin()).search_xray_line(energy, delta)
}

/// X-ray `(energies, shells)` of an element by ascending energy
///
/// Shorthand for [XrayLineSearch::element_xray_lines()] on the built-in data.
///
/// ```rust
/// # use gtools_nuclide::element_xray_lines;
/// let (energies, shells) = element_xray_lines("bi");
/// assert_eq!(energies[0], 74.815);
/// assert_eq!(shells[0], "Ka2");
/// ```
pub fn element_xray_lines(element: &str) -> (Vec<f64>, Vec<String>) {
    XrayLineSearch::new(NuclideDatabase::builtin())
        .element_xray_lines(element)
        .into()
}
