//! Breadth-first resolution of decay chains

// standard library
use std::collections::{HashMap, HashSet, VecDeque};
use std::str::FromStr;

// external crates
use log::{debug, trace, warn};
use serde::Serialize;

// gtools modules
use gtools_support::f;

// internal modules
use crate::database::NuclideDatabase;
use crate::error::Result;
use crate::id::NuclideId;
use crate::options::{QueryOptions, BRANCHING_RATIO_FLOOR, MAX_CHAIN_DEPTH};

/// Descendant of a root nuclide
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainMember {
    /// Descendant nuclide
    pub nuclide: NuclideId,
    /// Largest cumulative branching ratio over every path from the root
    pub ratio: f64,
    /// Number of decay steps from the root when first discovered
    pub depth: usize,
}

/// Every descendant of a root nuclide above a branching ratio threshold
///
/// Members are distinct and in breadth-first discovery order. The root itself
/// is never a member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecayChain {
    /// Nuclide the chain was resolved from
    pub root: NuclideId,
    /// Descendants in discovery order
    pub members: Vec<ChainMember>,
    /// Number of distinct parent to daughter branches dropped by
    /// [BRANCHING_RATIO_FLOOR]
    pub floor_pruned: usize,
    /// Number of distinct parent to daughter branches dropped by
    /// [MAX_CHAIN_DEPTH]
    pub depth_pruned: usize,
}

impl DecayChain {
    /// Descendant identifiers in discovery order
    pub fn ids(&self) -> impl Iterator<Item = &NuclideId> {
        self.members.iter().map(|m| &m.nuclide)
    }

    /// Cumulative branching ratio of a descendant, `None` if not in the chain
    pub fn ratio_of(&self, nuclide: &str) -> Option<f64> {
        let id = NuclideId::from_str(nuclide).ok()?;
        self.members
            .iter()
            .find(|m| m.nuclide == id)
            .map(|m| m.ratio)
    }

    /// Check if a nuclide is a descendant in this chain
    pub fn contains(&self, nuclide: &str) -> bool {
        self.ratio_of(nuclide).is_some()
    }

    /// Number of descendants
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the root has no descendants above the threshold
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl From<DecayChain> for Vec<NuclideId> {
    fn from(chain: DecayChain) -> Self {
        chain.members.into_iter().map(|m| m.nuclide).collect()
    }
}

impl std::fmt::Display for DecayChain {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!("Decay chain of {}\n", self.root);
        for m in &self.members {
            s += &f!(
                "  {:<3} {:<10} {:.6e}\n",
                m.depth,
                m.nuclide.to_string(),
                m.ratio
            );
        }
        s += &f!("  {} descendants", self.members.len());
        write!(f, "{s}")
    }
}

/// Resolves the descendants of a nuclide from the decay graph
///
/// Traversal is an iterative breadth-first search that carries the
/// cumulative branching ratio of each path.
///
/// - A daughter is followed only if its cumulative ratio is at least the
///   `branching_ratio_threshold` option, and never below
///   [BRANCHING_RATIO_FLOOR].
/// - A nuclide reached by converging paths is recorded once with the largest
///   ratio. It is expanded again only when a path strictly improves that
///   ratio, so its own descendants pick up the improvement.
/// - Nothing further than [MAX_CHAIN_DEPTH] steps from the root is followed.
///
/// This always terminates, even on cyclic data.
///
/// ```rust
/// # use gtools_nuclide::{DecayChainResolver, NuclideDatabase, QueryOptions, ReferenceTables};
/// let db = NuclideDatabase::load(ReferenceTables::builtin()).unwrap();
/// let resolver = DecayChainResolver::new(&db);
///
/// let options = QueryOptions::default().with_branching_ratio_threshold(0.01);
/// let chain = resolver.resolve("Ra-226", &options).unwrap();
///
/// assert!(chain.contains("Pb-214"));
/// assert!(!chain.contains("At-218"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecayChainResolver<'a> {
    db: &'a NuclideDatabase,
}

impl<'a> DecayChainResolver<'a> {
    /// Resolve chains over the decay branches of `db`
    pub fn new(db: &'a NuclideDatabase) -> Self {
        Self { db }
    }

    /// Resolve the decay chain of `root`
    ///
    /// Uses the `branching_ratio_threshold` option. A stable root gives an
    /// empty chain.
    pub fn resolve(&self, root: &str, options: &QueryOptions) -> Result<DecayChain> {
        let root = self.db.index_of(root)?;
        options.check_branching()?;
        Ok(self.resolve_at(root, options.branching_ratio_threshold))
    }

    /// Chain by database index, threshold already validated
    pub(crate) fn resolve_at(&self, root: usize, threshold: f64) -> DecayChain {
        let cutoff = threshold.max(BRANCHING_RATIO_FLOOR);
        let root_id = self.db.nuclide_at(root).id.clone();
        debug!("Resolving decay chain of {root_id} down to {cutoff:.3e}");

        let mut members: Vec<ChainMember> = Vec::new();
        let mut position: HashMap<usize, usize> = HashMap::new();
        // a branch can be revisited when its parent improves
        let mut floor_pruned: HashSet<(usize, usize)> = HashSet::new();
        let mut depth_pruned: HashSet<(usize, usize)> = HashSet::new();

        let mut queue = VecDeque::from([(root, 1.0, 0)]);
        while let Some((parent, ratio, depth)) = queue.pop_front() {
            // superseded by a stronger path queued later
            if let Some(&k) = position.get(&parent) {
                if ratio < members[k].ratio {
                    continue;
                }
            }

            for (daughter, edge) in self.db.branches_at(parent) {
                let cumulative = ratio * edge.ratio;

                if cumulative < cutoff {
                    if cumulative >= threshold {
                        floor_pruned.insert((parent, daughter));
                    }
                    continue;
                }

                if daughter == root {
                    continue;
                }

                if depth >= MAX_CHAIN_DEPTH {
                    depth_pruned.insert((parent, daughter));
                    continue;
                }

                match position.get(&daughter) {
                    Some(&k) => {
                        if cumulative <= members[k].ratio {
                            continue;
                        }
                        trace!(
                            "  {} improved {:.6e} -> {:.6e} via {}",
                            edge.daughter,
                            members[k].ratio,
                            cumulative,
                            edge.parent
                        );
                        members[k].ratio = cumulative;
                    }
                    None => {
                        trace!(
                            "  {} found at {:.6e} via {}",
                            edge.daughter,
                            cumulative,
                            edge.parent
                        );
                        position.insert(daughter, members.len());
                        members.push(ChainMember {
                            nuclide: edge.daughter.clone(),
                            ratio: cumulative,
                            depth: depth + 1,
                        });
                    }
                }

                queue.push_back((daughter, cumulative, depth + 1));
            }
        }

        let floor_pruned = floor_pruned.len();
        let depth_pruned = depth_pruned.len();
        if floor_pruned > 0 {
            warn!(
                "{floor_pruned} branches of {root_id} fell below the {BRANCHING_RATIO_FLOOR:e} ratio floor"
            );
        }
        if depth_pruned > 0 {
            warn!("{depth_pruned} branches of {root_id} exceeded {MAX_CHAIN_DEPTH} decay steps");
        }
        debug!("Decay chain of {root_id} has {} descendants", members.len());

        DecayChain {
            root: root_id,
            members,
            floor_pruned,
            depth_pruned,
        }
    }
}
