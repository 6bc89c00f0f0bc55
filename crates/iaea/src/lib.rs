//! Build reference tables from the IAEA chart of nuclides
//!
//! The built-in dataset of `gtools-nuclide` covers the common calibration and
//! natural decay series nuclides. This crate extends that to anything in the
//! IAEA chart of nuclides API by converting its CSV responses into
//! [ReferenceTables](gtools_nuclide::ReferenceTables).
//!
//! See <https://www-nds.iaea.org/relnsd/vcharthtml/api_v0_guide.html> for
//! further information on the API itself.
//!
//! ## Implementation
//!
//! Every nuclide request returns a series of [Record]s, one per emission. A
//! collection of these is called a [RecordSet]. A decay of the parent is
//! repeated on every emission it produces, so converting a set of records
//! merges these back into a single decay edge.
//!
//! ```rust, no_run
//! # use gtools_iaea::fetch_tables;
//! # use gtools_nuclide::{GammaLineSearch, NuclideDatabase, QueryOptions};
//! let tables = fetch_tables(&["co60", "ni60"]).unwrap();
//! let db = NuclideDatabase::load(tables).unwrap();
//!
//! let lines = GammaLineSearch::new(&db)
//!     .lines_for_nuclide("Co-60", &QueryOptions::default())
//!     .unwrap();
//! ```
//!
//! Responses saved to disk can be converted offline with [parse_records()],
//! [parse_ground_states()] and [tables_from_iaea()].
//!
//! ```rust
//! # use gtools_iaea::{parse_ground_states, parse_records, tables_from_iaea, RadType};
//! let ground = "z,n,symbol,half_life,half_life_sec\n\
//!               27,33,Co,5.2714,166344192\n\
//!               28,32,Ni,STABLE,\n";
//! let gammas = "energy,intensity,p_z,p_n,p_symbol,p_energy,half_life_sec,decay,decay_%,d_z,d_n,d_symbol\n\
//!               1173.228,99.85,27,33,Co,0,166344192,B-,100,28,32,Ni\n\
//!               1332.492,99.9826,27,33,Co,0,166344192,B-,100,28,32,Ni\n";
//!
//! let states = parse_ground_states(ground).unwrap();
//! let records = parse_records(gammas, RadType::Gamma).unwrap();
//! let tables = tables_from_iaea(&states, &[records]);
//!
//! assert_eq!(tables.nuclides.len(), 2);
//! assert_eq!(tables.decays.len(), 1);
//! assert_eq!(tables.gammas.len(), 2);
//! ```

// Split into subfiles for development, but anything important is re-exported
mod convert;
mod error;
mod fetch;
mod record;

#[doc(inline)]
pub use record::{parse_ground_states, parse_records, GroundState, RadType, Record, RecordSet};

#[doc(inline)]
pub use convert::tables_from_iaea;

#[doc(inline)]
pub use fetch::{fetch_ground_states, fetch_raw_csv, fetch_records, fetch_tables};

#[doc(inline)]
pub use error::{Error, Result};
