// standard library
use std::str::FromStr;

// external crates
use kdam::par_tqdm;
use log::{debug, info};
use rayon::prelude::*;

// gtools modules
use gtools_nuclide::{NuclideId, ReferenceTables};
use gtools_support::f;

// internal modules
use crate::convert::tables_from_iaea;
use crate::error::{Error, Result};
use crate::record::{parse_ground_states, parse_records, GroundState, RadType, RecordSet};

/// Base of the URL used to query the IAEA API
const IAEA_API: &str = "https://nds.iaea.org/relnsd/v1/data?";

// ! Public API

/// Unaltered `decay_rads` CSV text for one nuclide and radiation type
///
/// Any name accepted as a [NuclideId] may be given, and is converted into the
/// lowercase form the API expects (`Ra-226` is requested as `ra226`). Excited
/// states are reported by the API with their ground state, so asking for an
/// isomer directly fails with [Error::InvalidNuclideQuery].
///
/// ```rust, no_run
/// # use gtools_iaea::{fetch_raw_csv, RadType};
/// let text = fetch_raw_csv("Ra-226", RadType::Gamma).unwrap();
/// assert!(text.starts_with("energy,"));
/// ```
///
/// The response is a header row followed by one row per emission, and a
/// header alone when the nuclide has no data for this radiation type.
pub fn fetch_raw_csv(nuclide: &str, rad_type: RadType) -> Result<String> {
    let url = f!(
        "{IAEA_API}fields=decay_rads&nuclides={}&rad_types={}",
        query_name(nuclide)?,
        rad_type.query_symbol()
    );
    debug!("GET {url}");

    let response = minreq::get(url).send()?;
    Ok(response.as_str()?.to_string())
}

/// Every decay record of a nuclide
///
/// Combines the records of every supported [RadType], since decays of
/// nuclides that emit no gamma rays only appear in the other radiation types.
/// A radiation type without data for this nuclide contributes nothing.
///
/// ```rust, no_run
/// # use gtools_iaea::fetch_records;
/// let records = fetch_records("po218").unwrap();
/// ```
pub fn fetch_records(nuclide: &str) -> Result<RecordSet> {
    let mut records = RecordSet::new();
    for rad_type in RadType::ALL {
        let csv_text = fetch_raw_csv(nuclide, rad_type)?;
        records.extend(parse_records(&csv_text, rad_type)?);
    }
    debug!("Fetched {} records for {nuclide}", records.len());
    Ok(records)
}

/// Ground state properties of every nuclide in the chart
///
/// ```rust, no_run
/// # use gtools_iaea::fetch_ground_states;
/// let states = fetch_ground_states().unwrap();
/// ```
pub fn fetch_ground_states() -> Result<Vec<GroundState>> {
    let url = f!("{IAEA_API}fields=ground_states&nuclides=all");
    debug!("GET {url}");

    let response = minreq::get(&url).send()?;
    let states = parse_ground_states(response.as_str()?)?;

    match states.is_empty() {
        true => Err(Error::EmptyResponse { query: url }),
        false => Ok(states),
    }
}

/// Reference tables for a set of nuclides straight from the IAEA
///
/// Requests for each nuclide are run in parallel with a progress counter. The
/// result only covers the nuclides requested, so daughters must be listed
/// explicitly to have their own decays and lines included.
///
/// ```rust, no_run
/// # use gtools_iaea::fetch_tables;
/// # use gtools_nuclide::NuclideDatabase;
/// let tables = fetch_tables(&["co60", "cs137", "ba137"]).unwrap();
/// let db = NuclideDatabase::load(tables).unwrap();
/// ```
pub fn fetch_tables<S: AsRef<str> + Sync>(nuclides: &[S]) -> Result<ReferenceTables> {
    let ground_states = fetch_ground_states()?;
    info!("Fetched {} ground states", ground_states.len());

    let record_sets = par_tqdm!(
        nuclides.par_iter().map(|n| fetch_records(n.as_ref())),
        bar_format = "Fetching nuclides: {count}/{total} [{rate:.2} nuc/s]  "
    )
    .collect::<Result<Vec<RecordSet>>>()?;
    eprintln!();

    Ok(tables_from_iaea(&ground_states, &record_sets))
}

// ! Private functions

/// IAEA query names are the lowercase element and mass, e.g. `ra226`
fn query_name(nuclide: &str) -> Result<String> {
    let id = NuclideId::from_str(nuclide)?;
    match id.is_isomer() {
        true => Err(Error::InvalidNuclideQuery {
            nuclide: nuclide.to_string(),
        }),
        false => Ok(f!("{}{}", id.symbol.to_lowercase(), id.mass)),
    }
}
