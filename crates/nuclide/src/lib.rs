//! Gamma line identification and decay chain spectra
//!
//! This crate maps observed gamma-ray peak energies to candidate nuclides and
//! predicts the gamma lines produced by a nuclide together with all of its
//! decay products.
//!
//! Everything works over a read-only [NuclideDatabase] built once from
//! [ReferenceTables]. The query components borrow the database and never
//! modify it, so any number of them may run concurrently.
//!
//! | Component               | Purpose                                            |
//! | ----------------------- | -------------------------------------------------- |
//! | [GammaLineSearch]       | Lines near an energy, or every line of a nuclide   |
//! | [DecayChainResolver]    | Descendants above a cumulative branching ratio     |
//! | [ChainGammaAggregator]  | Flattened gamma lines of a root and its chain      |
//! | [XrayLineSearch]        | Characteristic X-rays near an energy or by element |
//!
//! Filters are given by [QueryOptions], validated by each query before any
//! work is done.
//!
//! ```rust
//! # use gtools_nuclide::{ChainGammaAggregator, GammaLineSearch, NuclideDatabase, QueryOptions};
//! let db = NuclideDatabase::builtin();
//!
//! // What could a peak at 609.3 keV be?
//! let options = QueryOptions::default().with_delta(0.5).with_intensity_threshold(1.0);
//! let hits = GammaLineSearch::new(db).search_by_energy(609.3, &options).unwrap();
//! assert_eq!(hits[0].nuclide.to_string(), "Bi-214");
//!
//! // So what else should be visible if that came from a radium source?
//! let options = QueryOptions::default()
//!     .with_branching_ratio_threshold(0.1)
//!     .with_limit_intensity(true);
//! let spectrum = ChainGammaAggregator::new(db)
//!     .decay_products_spectrum("Ra-226", &options)
//!     .unwrap();
//!
//! for (nuclide, energy, intensity) in spectrum.iter() {
//!     println!("{nuclide:<8} {energy:>10.3} keV {intensity:>8.3} %");
//! }
//! ```
//!
//! The free functions [search_gamma_line()], [decay_products()],
//! [nuclide_gamma_lines()], [decay_products_spectrum()], [search_xray_line()]
//! and [element_xray_lines()] are shorthands for the same queries against the
//! built-in dataset.

// Split into subfiles for development, but anything important is re-exported
mod builtin;
mod chain;
mod database;
mod error;
mod id;
mod mode;
mod options;
mod parsers;
mod records;
mod search;
mod spectrum;
mod tables;
mod xray;

#[doc(inline)]
pub use database::{NuclideDatabase, BRANCHING_SUM_TOLERANCE};

#[doc(inline)]
pub use tables::{DecayRow, GammaRow, NuclideRow, ReferenceTables, XrayRow};

#[doc(inline)]
pub use records::{DecayEdge, GammaTransition, Nuclide, XrayLine};

#[doc(inline)]
pub use id::{IsomerState, NuclideId};

#[doc(inline)]
pub use mode::DecayMode;

#[doc(inline)]
pub use options::{QueryOptions, BRANCHING_RATIO_FLOOR, MAX_CHAIN_DEPTH};

#[doc(inline)]
pub use search::{GammaLineSearch, NuclideLines, SearchHit, LIMIT_INTENSITY_FRACTION};

#[doc(inline)]
pub use chain::{ChainMember, DecayChain, DecayChainResolver};

#[doc(inline)]
pub use spectrum::{ChainGammaAggregator, ChainSpectrum};

#[doc(inline)]
pub use xray::{ElementXrays, XrayLineSearch};

#[doc(inline)]
pub use builtin::{
    decay_products, decay_products_spectrum, element_xray_lines, nuclide_gamma_lines,
    search_gamma_line, search_xray_line,
};

#[doc(inline)]
pub use error::{Error, Integrity, Result};
