//! Immutable store of nuclides, decay edges and gamma transitions

// standard library
use std::collections::HashMap;
use std::str::FromStr;

// external crates
use log::{debug, info};

// gtools modules
use gtools_support::StringExt;

// internal modules
use crate::error::{Error, Integrity, Result};
use crate::id::NuclideId;
use crate::mode::DecayMode;
use crate::records::{DecayEdge, GammaTransition, Nuclide, XrayLine};
use crate::tables::ReferenceTables;

/// Allowed excess over unity when summing branching ratios of a parent
pub const BRANCHING_SUM_TOLERANCE: f64 = 1e-6;

/// Read-only reference data indexed by nuclide
///
/// A database is built once from [ReferenceTables] and never modified. All
/// queries take `&self`, so a single database may be shared freely between
/// threads. Replacing the data means building a new database.
///
/// ```rust
/// # use gtools_nuclide::{NuclideDatabase, ReferenceTables};
/// let db = NuclideDatabase::load(ReferenceTables::builtin()).unwrap();
///
/// let radium = db.lookup("Ra-226").unwrap();
/// assert_eq!(radium.z, 88);
///
/// // any accepted spelling works
/// assert_eq!(db.lookup("ra226").unwrap(), radium);
///
/// // Ra-226 alpha decays to Rn-222
/// let edges = db.outgoing_edges("Ra-226").unwrap();
/// assert_eq!(edges[0].daughter.to_string(), "Rn-222");
/// ```
#[derive(Debug, Clone)]
pub struct NuclideDatabase {
    nuclides: Vec<Nuclide>,
    index: HashMap<NuclideId, usize>,
    edges: Vec<Vec<DecayEdge>>,
    /// Index of the daughter for every entry in `edges`
    children: Vec<Vec<usize>>,
    /// Parent index and edge position of the strongest edge into each nuclide
    feeding: Vec<Option<(usize, usize)>>,
    transitions: Vec<Vec<GammaTransition>>,
    xrays: Vec<XrayLine>,
}

impl NuclideDatabase {
    /// Validate and index reference tables
    ///
    /// Every row is checked and the first defect found aborts the build with
    /// [Error::DataIntegrity]. No partially built database is ever returned.
    pub fn load(tables: ReferenceTables) -> Result<Self> {
        let mut db = Self {
            nuclides: Vec::with_capacity(tables.nuclides.len()),
            index: HashMap::with_capacity(tables.nuclides.len()),
            edges: Vec::new(),
            children: Vec::new(),
            feeding: Vec::new(),
            transitions: Vec::new(),
            xrays: Vec::with_capacity(tables.xrays.len()),
        };

        for row in tables.nuclides {
            let id = parse_id(&row.nuclide)?;

            if id.mass != row.a {
                return Err(Integrity::MassMismatch {
                    nuclide: id.to_string(),
                    expected: id.mass,
                    found: row.a,
                }
                .into());
            }

            let half_life = row.half_life.unwrap_or(f64::INFINITY);
            if half_life.is_nan() || half_life <= 0.0 {
                return Err(Integrity::HalfLife {
                    nuclide: id.to_string(),
                    half_life,
                }
                .into());
            }

            if db.index.contains_key(&id) {
                return Err(Integrity::DuplicateNuclide {
                    nuclide: id.to_string(),
                }
                .into());
            }

            db.index.insert(id.clone(), db.nuclides.len());
            db.nuclides.push(Nuclide {
                id,
                z: row.z,
                a: row.a,
                half_life,
            });
        }

        let n = db.nuclides.len();
        db.edges = vec![Vec::new(); n];
        db.children = vec![Vec::new(); n];
        db.feeding = vec![None; n];
        db.transitions = vec![Vec::new(); n];

        for row in tables.decays {
            let parent = parse_id(&row.parent)?;
            let daughter = parse_id(&row.daughter)?;

            let dangling = |missing: &NuclideId| Integrity::DanglingEdge {
                parent: parent.to_string(),
                daughter: daughter.to_string(),
                missing: missing.to_string(),
            };
            let p = *db.index.get(&parent).ok_or_else(|| dangling(&parent))?;
            let d = *db.index.get(&daughter).ok_or_else(|| dangling(&daughter))?;

            if !(row.ratio > 0.0 && row.ratio <= 1.0) {
                return Err(Integrity::BranchingRatio {
                    parent: parent.to_string(),
                    daughter: daughter.to_string(),
                    ratio: row.ratio,
                }
                .into());
            }

            db.children[p].push(d);
            db.edges[p].push(DecayEdge {
                parent,
                daughter,
                mode: DecayMode::from(row.mode),
                ratio: row.ratio,
            });
        }

        for (p, edges) in db.edges.iter().enumerate() {
            if edges.is_empty() {
                continue;
            }

            let nuclide = &db.nuclides[p];
            if nuclide.is_stable() {
                return Err(Integrity::StableWithEdges {
                    nuclide: nuclide.id.to_string(),
                }
                .into());
            }

            let sum: f64 = edges.iter().map(|e| e.ratio).sum();
            if sum > 1.0 + BRANCHING_SUM_TOLERANCE {
                return Err(Integrity::BranchingSum {
                    parent: nuclide.id.to_string(),
                    sum,
                }
                .into());
            }

            // strictly greater keeps the first edge on ties
            for (k, (&d, edge)) in db.children[p].iter().zip(edges).enumerate() {
                let stronger = match db.feeding[d] {
                    Some((fp, fk)) => edge.ratio > db.edges[fp][fk].ratio,
                    None => true,
                };
                if stronger {
                    db.feeding[d] = Some((p, k));
                }
            }
        }

        for row in tables.gammas {
            let id = parse_id(&row.nuclide)?;
            let i = *db.index.get(&id).ok_or_else(|| Integrity::UnknownEmitter {
                nuclide: id.to_string(),
            })?;

            if !(row.energy.is_finite() && row.energy > 0.0) {
                return Err(Integrity::Energy {
                    nuclide: id.to_string(),
                    energy: row.energy,
                }
                .into());
            }

            if !(0.0..=100.0).contains(&row.intensity) {
                return Err(Integrity::Intensity {
                    nuclide: id.to_string(),
                    energy: row.energy,
                    intensity: row.intensity,
                }
                .into());
            }

            db.transitions[i].push(GammaTransition {
                nuclide: id,
                energy: row.energy,
                intensity: row.intensity,
            });
        }

        for row in tables.xrays {
            let element = row.element.as_symbol();
            if !(row.energy.is_finite() && row.energy > 0.0) {
                return Err(Integrity::XrayEnergy {
                    element,
                    energy: row.energy,
                }
                .into());
            }
            db.xrays.push(XrayLine {
                element,
                energy: row.energy,
                shell: row.shell,
            });
        }

        info!(
            "Built nuclide database: {} nuclides, {} decays, {} gamma lines, {} X-ray lines",
            db.len(),
            db.edges.iter().map(Vec::len).sum::<usize>(),
            db.transitions.iter().map(Vec::len).sum::<usize>(),
            db.xrays.len()
        );

        Ok(db)
    }

    /// Find the record for a nuclide
    ///
    /// Fails with [Error::NotFound] for unknown nuclides, including strings
    /// that are not nuclide identifiers at all.
    pub fn lookup(&self, nuclide: &str) -> Result<&Nuclide> {
        Ok(&self.nuclides[self.index_of(nuclide)?])
    }

    /// Find the record for an already parsed identifier
    pub fn get(&self, id: &NuclideId) -> Option<&Nuclide> {
        self.index.get(id).map(|&i| &self.nuclides[i])
    }

    /// Decay branches leaving a nuclide, in load order
    ///
    /// Empty for stable nuclides and for nuclides whose decay is not part of the
    /// reference data.
    pub fn outgoing_edges(&self, nuclide: &str) -> Result<&[DecayEdge]> {
        Ok(&self.edges[self.index_of(nuclide)?])
    }

    /// Gamma lines of a nuclide, in load order
    ///
    /// Empty if the nuclide emits no measurable gamma lines.
    pub fn transitions_of(&self, nuclide: &str) -> Result<&[GammaTransition]> {
        Ok(&self.transitions[self.index_of(nuclide)?])
    }

    /// Decay mode of the strongest branch into a nuclide
    ///
    /// `None` if nothing in the reference data decays into this nuclide.
    ///
    /// ```rust
    /// # use gtools_nuclide::{DecayMode, NuclideDatabase, ReferenceTables};
    /// let db = NuclideDatabase::load(ReferenceTables::builtin()).unwrap();
    /// assert_eq!(db.feeding_mode("Pb-214").unwrap(), Some(&DecayMode::Alpha));
    /// assert_eq!(db.feeding_mode("U-238").unwrap(), None);
    /// ```
    pub fn feeding_mode(&self, nuclide: &str) -> Result<Option<&DecayMode>> {
        Ok(self.feeding_mode_at(self.index_of(nuclide)?))
    }

    /// Every nuclide in load order
    pub fn nuclides(&self) -> impl Iterator<Item = &Nuclide> {
        self.nuclides.iter()
    }

    /// Every gamma line of every nuclide
    pub fn transitions(&self) -> impl Iterator<Item = &GammaTransition> {
        self.transitions.iter().flatten()
    }

    /// Every characteristic X-ray line in load order
    pub fn xrays(&self) -> &[XrayLine] {
        &self.xrays
    }

    /// Check if a nuclide is part of the reference data
    pub fn contains(&self, nuclide: &str) -> bool {
        self.index_of(nuclide).is_ok()
    }

    /// Number of nuclides
    pub fn len(&self) -> usize {
        self.nuclides.len()
    }

    /// True if there are no nuclides
    pub fn is_empty(&self) -> bool {
        self.nuclides.is_empty()
    }

    // ! Index based access for the query components

    pub(crate) fn index_of(&self, nuclide: &str) -> Result<usize> {
        let not_found = || Error::NotFound {
            nuclide: nuclide.to_string(),
        };
        let id = NuclideId::from_str(nuclide).map_err(|_| not_found())?;
        self.index.get(&id).copied().ok_or_else(not_found)
    }

    pub(crate) fn index_of_id(&self, id: &NuclideId) -> Result<usize> {
        self.index.get(id).copied().ok_or_else(|| Error::NotFound {
            nuclide: id.to_string(),
        })
    }

    pub(crate) fn nuclide_at(&self, i: usize) -> &Nuclide {
        &self.nuclides[i]
    }

    pub(crate) fn transitions_at(&self, i: usize) -> &[GammaTransition] {
        &self.transitions[i]
    }

    /// Daughter index and edge for every branch leaving a nuclide
    pub(crate) fn branches_at(&self, i: usize) -> impl Iterator<Item = (usize, &DecayEdge)> {
        self.children[i].iter().copied().zip(self.edges[i].iter())
    }

    pub(crate) fn feeding_mode_at(&self, i: usize) -> Option<&DecayMode> {
        self.feeding[i].map(|(p, k)| &self.edges[p][k].mode)
    }
}

fn parse_id(text: &str) -> Result<NuclideId> {
    NuclideId::from_str(text).map_err(|_| {
        debug!("Rejected nuclide identifier \"{text}\"");
        Error::from(Integrity::InvalidIdentifier {
            text: text.to_string(),
        })
    })
}
