//! Predicted gamma spectrum of a whole decay chain

// external crates
use log::debug;
use serde::Serialize;

// internal modules
use crate::chain::{DecayChain, DecayChainResolver};
use crate::database::NuclideDatabase;
use crate::error::Result;
use crate::id::NuclideId;
use crate::options::QueryOptions;
use crate::search::GammaLineSearch;

/// Gamma lines of a decay chain as parallel sequences
///
/// Entry `k` of every sequence describes the same line. Lines are grouped by
/// nuclide in chain order, root first, and by descending intensity within each
/// nuclide.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChainSpectrum {
    /// Emitter of each line
    pub nuclides: Vec<NuclideId>,
    /// Line energies (keV)
    pub energies: Vec<f64>,
    /// Relative intensities (% per decay of the emitter)
    pub intensities: Vec<f64>,
}

impl ChainSpectrum {
    /// Number of lines
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// True if no nuclide in the chain has a line passing the filters
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Iterate over `(nuclide, energy, intensity)` triplets
    pub fn iter(&self) -> impl Iterator<Item = (&NuclideId, f64, f64)> {
        self.nuclides
            .iter()
            .zip(self.energies.iter().copied())
            .zip(self.intensities.iter().copied())
            .map(|((n, e), i)| (n, e, i))
    }
}

impl From<ChainSpectrum> for (Vec<NuclideId>, Vec<f64>) {
    fn from(spectrum: ChainSpectrum) -> Self {
        (spectrum.nuclides, spectrum.energies)
    }
}

/// Combines chain resolution and line lookup
///
/// ```rust
/// # use gtools_nuclide::{ChainGammaAggregator, NuclideDatabase, QueryOptions, ReferenceTables};
/// let db = NuclideDatabase::load(ReferenceTables::builtin()).unwrap();
/// let aggregator = ChainGammaAggregator::new(&db);
///
/// let options = QueryOptions::default()
///     .with_branching_ratio_threshold(0.1)
///     .with_limit_intensity(true);
///
/// let spectrum = aggregator.decay_products_spectrum("Ra-226", &options).unwrap();
///
/// // Ra-226 has a single line above 10% of its strongest
/// assert_eq!(spectrum.nuclides[0].to_string(), "Ra-226");
/// assert_eq!(spectrum.energies[0], 186.211);
/// assert_eq!(spectrum.nuclides[1].to_string(), "Rn-222");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChainGammaAggregator<'a> {
    db: &'a NuclideDatabase,
    resolver: DecayChainResolver<'a>,
    search: GammaLineSearch<'a>,
}

impl<'a> ChainGammaAggregator<'a> {
    /// Aggregate chain spectra from the reference data in `db`
    pub fn new(db: &'a NuclideDatabase) -> Self {
        Self {
            db,
            resolver: DecayChainResolver::new(db),
            search: GammaLineSearch::new(db),
        }
    }

    /// Flattened gamma lines of `root` and every descendant
    ///
    /// Uses the `branching_ratio_threshold`, `intensity_threshold` and
    /// `limit_intensity` options. With `limit_intensity` the 10% cut is applied
    /// to each nuclide separately.
    pub fn decay_products_spectrum(
        &self,
        root: &str,
        options: &QueryOptions,
    ) -> Result<ChainSpectrum> {
        options.check_line_filter()?;
        let chain = self.resolver.resolve(root, options)?;
        self.spectrum_of(&chain, options)
    }

    /// Flattened gamma lines of an already resolved chain
    ///
    /// Lines are taken from this aggregator's database, whichever database
    /// the chain was resolved against. Fails with
    /// [Error::NotFound](crate::Error::NotFound) if the root or any member is
    /// not part of it.
    pub fn spectrum_of(
        &self,
        chain: &DecayChain,
        options: &QueryOptions,
    ) -> Result<ChainSpectrum> {
        let mut spectrum = ChainSpectrum::default();
        for id in std::iter::once(&chain.root).chain(chain.ids()) {
            let i = self.db.index_of_id(id)?;
            let lines = self.search.lines_at(i, options);
            spectrum
                .nuclides
                .extend(std::iter::repeat(id).take(lines.len()).cloned());
            spectrum.energies.extend(lines.energies);
            spectrum.intensities.extend(lines.intensities);
        }

        debug!(
            "Chain spectrum of {} has {} lines from {} nuclides",
            chain.root,
            spectrum.len(),
            chain.len() + 1
        );

        Ok(spectrum)
    }
}
