//! Conversion of IAEA data into gtools reference tables

// standard library
use std::collections::{BTreeMap, HashMap, HashSet};

// external crates
use log::{debug, warn};

// gtools modules
use gtools_nuclide::{
    DecayRow, GammaRow, IsomerState, NuclideId, NuclideRow, ReferenceTables,
    BRANCHING_SUM_TOLERANCE,
};
use gtools_support::StringExt;

// internal modules
use crate::record::{GroundState, RadType, Record, RecordSet};

/// Build reference tables from IAEA ground states and decay records
///
/// - Every ground state becomes a nuclide row, `STABLE` ones with an infinite
///   half-life. Ground states without any half-life are skipped.
/// - Parents in an excited state become isomer rows, numbered in order of
///   increasing excitation energy.
/// - Decay mode and branching of every record become decay rows, with
///   repeats from different radiation types merged.
/// - Gamma records with both an energy and an intensity become gamma rows.
///
/// Anything the nuclide database would reject is dropped here with a warning.
/// That is decays into nuclides missing from the ground states, out of range
/// lines, and branching that sums past 100%, which is scaled back to unity.
///
/// ```rust
/// # use gtools_iaea::{parse_ground_states, parse_records, tables_from_iaea, RadType};
/// # use gtools_nuclide::NuclideDatabase;
/// let ground = "z,n,symbol,half_life,half_life_sec\n\
///               27,33,Co,5.2714,166344192\n\
///               28,32,Ni,STABLE,\n";
/// let gamma = "energy,intensity,p_z,p_n,p_symbol,p_energy,half_life_sec,decay,decay_%,d_z,d_n,d_symbol\n\
///              1173.228,99.85,27,33,Co,0,166344192,B-,100,28,32,Ni\n\
///              1332.492,99.9826,27,33,Co,0,166344192,B-,100,28,32,Ni\n";
///
/// let tables = tables_from_iaea(
///     &parse_ground_states(ground).unwrap(),
///     &[parse_records(gamma, RadType::Gamma).unwrap()],
/// );
///
/// let db = NuclideDatabase::load(tables).unwrap();
/// assert_eq!(db.outgoing_edges("Co-60").unwrap().len(), 1);
/// assert_eq!(db.transitions_of("Co-60").unwrap().len(), 2);
/// ```
pub fn tables_from_iaea(
    ground_states: &[GroundState],
    record_sets: &[RecordSet],
) -> ReferenceTables {
    let mut tables = ReferenceTables::default();
    let mut known: HashSet<NuclideId> = HashSet::new();

    for state in ground_states {
        let id = ground_id(&state.symbol, state.mass());
        let half_life = match (state.is_stable(), state.half_life_sec) {
            (true, _) => None,
            (false, Some(h)) if h > 0.0 => Some(h),
            _ => {
                debug!("Skipping {state} without a usable half-life");
                continue;
            }
        };

        if !known.insert(id.clone()) {
            continue;
        }
        tables.nuclides.push(NuclideRow {
            nuclide: id.to_string(),
            z: state.z,
            a: state.mass(),
            half_life,
        });
    }

    let records = record_sets.iter().flatten().collect::<Vec<&Record>>();
    let isomers = number_isomers(&records);

    for ((symbol, a, _), (state, half_life, z)) in isomers.iter() {
        let id = NuclideId {
            symbol: symbol.clone(),
            mass: *a,
            state: *state,
        };
        if half_life.is_none() {
            debug!("Skipping isomer {id} without a usable half-life");
            continue;
        }
        if !known.insert(id.clone()) {
            continue;
        }
        tables.nuclides.push(NuclideRow {
            nuclide: id.to_string(),
            z: *z,
            a: *a,
            half_life: *half_life,
        });
    }

    let mut seen_edges = HashSet::new();
    for record in &records {
        let Some(parent) = parent_id(record, &isomers).filter(|p| known.contains(p)) else {
            continue;
        };

        if let (Some(mode), Some(branching), Some((d_symbol, d_mass))) =
            (&record.decay_mode, record.branching, record.daughter())
        {
            let daughter = match mode.trim() == "IT" {
                true => parent.ground(),
                false => ground_id(&d_symbol, d_mass),
            };

            let first = seen_edges.insert((parent.clone(), daughter.clone(), mode.clone()));
            if !first {
                debug!("Merged repeated {parent} -> {daughter} ({mode})");
            } else if !known.contains(&daughter) {
                warn!("Dropped {parent} -> {daughter} ({mode}), daughter is not in the data");
            } else if !(branching > 0.0 && branching <= 100.0) {
                warn!("Dropped {parent} -> {daughter} ({mode}) with branching {branching}%");
            } else {
                tables.decays.push(DecayRow {
                    parent: parent.to_string(),
                    daughter: daughter.to_string(),
                    mode: mode.clone(),
                    ratio: branching / 100.0,
                });
            }
        }

        if record.rad_type == RadType::Gamma {
            if let (Some(energy), Some(intensity)) = (record.energy, record.intensity) {
                if energy > 0.0 && (0.0..=100.0).contains(&intensity) {
                    tables.gammas.push(GammaRow {
                        nuclide: parent.to_string(),
                        energy,
                        intensity,
                    });
                } else {
                    warn!("Dropped {parent} gamma line {energy} keV at {intensity}%");
                }
            }
        }
    }

    renormalise(&mut tables.decays);

    debug!(
        "Converted IAEA data to {} nuclides, {} decays, {} gamma lines",
        tables.nuclides.len(),
        tables.decays.len(),
        tables.gammas.len()
    );

    tables
}

// ! Private functions

type IsomerKey = (String, u16, u64);
type IsomerInfo = (IsomerState, Option<f64>, u16);

fn ground_id(symbol: &str, mass: u16) -> NuclideId {
    NuclideId {
        symbol: symbol.as_symbol(),
        mass,
        state: IsomerState::Ground,
    }
}

/// Excitation energies are keyed by their bits, they are only ever compared
/// for identity
fn isomer_key(record: &Record) -> Option<IsomerKey> {
    let (symbol, a) = record.parent()?;
    Some((symbol, a, record.p_energy?.to_bits()))
}

/// Number excited parents per nuclide by ascending excitation energy
fn number_isomers(records: &[&Record]) -> BTreeMap<IsomerKey, IsomerInfo> {
    let mut levels: HashMap<(String, u16), Vec<(f64, Option<f64>, u16)>> = HashMap::new();
    for record in records.iter().filter(|r| r.is_isomer()) {
        if let (Some((symbol, a)), Some(energy), Some(z)) =
            (record.parent(), record.p_energy, record.p_z)
        {
            let found = levels.entry((symbol, a)).or_default();
            if !found.iter().any(|(e, _, _)| *e == energy) {
                found.push((energy, record.half_life, z));
            }
        }
    }

    let mut isomers = BTreeMap::new();
    for ((symbol, a), mut found) in levels {
        found.sort_by(|x, y| x.0.total_cmp(&y.0));
        for (k, (energy, half_life, z)) in found.into_iter().enumerate() {
            let state = IsomerState::Excited(k as u8 + 1);
            let half_life = half_life.filter(|h| *h > 0.0);
            isomers.insert((symbol.clone(), a, energy.to_bits()), (state, half_life, z));
        }
    }
    isomers
}

fn parent_id(record: &Record, isomers: &BTreeMap<IsomerKey, IsomerInfo>) -> Option<NuclideId> {
    let (symbol, mass) = record.parent()?;
    match record.is_isomer() {
        true => {
            let (state, _, _) = isomers.get(&isomer_key(record)?)?;
            Some(NuclideId {
                symbol,
                mass,
                state: *state,
            })
        }
        false => Some(ground_id(&symbol, mass)),
    }
}

/// Scale back any parent whose branching sums past unity
fn renormalise(decays: &mut [DecayRow]) {
    let mut sums: HashMap<String, f64> = HashMap::new();
    for d in decays.iter() {
        *sums.entry(d.parent.clone()).or_default() += d.ratio;
    }

    for (parent, sum) in sums.iter().filter(|(_, s)| **s > 1.0 + BRANCHING_SUM_TOLERANCE) {
        warn!("Branching of {parent} sums to {:.4}%, scaled to 100%", sum * 100.0);
        for d in decays.iter_mut().filter(|d| &d.parent == parent) {
            d.ratio /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        parent: (&str, u16, u16, f64),
        daughter: (&str, u16, u16),
        mode: &str,
        branching: f64,
    ) -> Record {
        Record {
            p_symbol: Some(parent.0.to_string()),
            p_z: Some(parent.1),
            p_n: Some(parent.2),
            p_energy: Some(parent.3),
            half_life: Some(69.54),
            d_symbol: Some(daughter.0.to_string()),
            d_z: Some(daughter.1),
            d_n: Some(daughter.2),
            decay_mode: Some(mode.to_string()),
            branching: Some(branching),
            rad_type: RadType::BetaMinus,
            ..Default::default()
        }
    }

    fn ground(symbol: &str, z: u16, n: u16, half_life_sec: Option<f64>) -> GroundState {
        GroundState {
            symbol: symbol.to_string(),
            z,
            n,
            half_life: half_life_sec.map(|h| h.to_string()).or(Some("STABLE".to_string())),
            half_life_sec,
        }
    }

    #[test]
    fn excited_parents_become_isomers() {
        let states = [
            ground("Pa", 91, 143, Some(24120.0)),
            ground("U", 92, 142, Some(7.7472e12)),
        ];
        let records = vec![
            record(("Pa", 91, 143, 73.92), ("U", 92, 142), "B-", 99.84),
            record(("Pa", 91, 143, 73.92), ("Pa", 91, 143), "IT", 0.16),
        ];

        let tables = tables_from_iaea(&states, &[records]);
        let names: Vec<&str> = tables.nuclides.iter().map(|n| n.nuclide.as_str()).collect();
        assert_eq!(names, ["Pa-234", "U-234", "Pa-234m"]);

        let it = tables.decays.iter().find(|d| d.mode == "IT").unwrap();
        assert_eq!(it.parent, "Pa-234m");
        assert_eq!(it.daughter, "Pa-234");
        assert!((it.ratio - 0.0016).abs() < 1e-12);
    }

    #[test]
    fn repeated_decays_are_merged() {
        let states = [
            ground("Co", 27, 33, Some(1.6634e8)),
            ground("Ni", 28, 32, None),
        ];
        let line = record(("Co", 27, 33, 0.0), ("Ni", 28, 32), "B-", 100.0);
        let tables = tables_from_iaea(&states, &[vec![line.clone(), line.clone()], vec![line]]);
        assert_eq!(tables.decays.len(), 1);
        assert_eq!(tables.decays[0].ratio, 1.0);
        assert_eq!(tables.nuclides[1].half_life, None);
    }

    #[test]
    fn unknown_daughters_are_dropped() {
        let states = [ground("Co", 27, 33, Some(1.6634e8))];
        let line = record(("Co", 27, 33, 0.0), ("Ni", 28, 32), "B-", 100.0);
        let tables = tables_from_iaea(&states, &[vec![line]]);
        assert!(tables.decays.is_empty());
    }

    #[test]
    fn over_unity_branching_is_scaled() {
        let states = [
            ground("K", 19, 21, Some(3.9383e16)),
            ground("Ca", 20, 20, None),
            ground("Ar", 18, 22, None),
        ];
        let records = vec![
            record(("K", 19, 21, 0.0), ("Ca", 20, 20), "B-", 89.28),
            record(("K", 19, 21, 0.0), ("Ar", 18, 22), "EC", 20.0),
        ];
        let tables = tables_from_iaea(&states, &[records]);
        let sum: f64 = tables.decays.iter().map(|d| d.ratio).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn only_gamma_records_give_lines() {
        let states = [
            ground("Co", 27, 33, Some(1.6634e8)),
            ground("Ni", 28, 32, None),
        ];
        let mut gamma = record(("Co", 27, 33, 0.0), ("Ni", 28, 32), "B-", 100.0);
        gamma.energy = Some(1173.228);
        gamma.intensity = Some(99.85);
        let mut beta = gamma.clone();
        beta.rad_type = RadType::BetaMinus;
        gamma.rad_type = RadType::Gamma;

        let mut bad = gamma.clone();
        bad.intensity = Some(150.0);

        let tables = tables_from_iaea(&states, &[vec![gamma, beta, bad]]);
        assert_eq!(tables.gammas.len(), 1);
        assert_eq!(tables.gammas[0].nuclide, "Co-60");
    }
}
