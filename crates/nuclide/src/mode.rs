//! Decay modes

// external crates
use serde::{Deserialize, Serialize};

/// Mechanism by which a parent decays into a daughter
///
/// The `FromStr` trait is implemented for the usual ENSDF/IAEA symbols. It
/// never fails, anything unrecognised is kept verbatim as [DecayMode::Other]
/// so that unusual modes (`B-N`, `2B-`, ...) survive a round trip.
///
/// ```rust
/// # use gtools_nuclide::DecayMode;
/// # use std::str::FromStr;
/// assert_eq!(DecayMode::from_str("a").unwrap(), DecayMode::Alpha);
/// assert_eq!(DecayMode::from_str("EC+B+").unwrap(), DecayMode::ElectronCapture);
/// assert_eq!(DecayMode::from_str("B-N").unwrap(), DecayMode::Other("B-N".to_string()));
/// assert_eq!(DecayMode::BetaMinus.to_string(), "B-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecayMode {
    /// Alpha decay (`A`)
    Alpha,
    /// Beta- decay (`B-`)
    BetaMinus,
    /// Beta+ decay (`B+`)
    BetaPlus,
    /// Electron capture, including combined EC+B+ data (`EC`)
    ElectronCapture,
    /// Isomeric transition (`IT`)
    IsomericTransition,
    /// Spontaneous fission (`SF`)
    SpontaneousFission,
    /// Anything else, kept as found in the data
    Other(String),
}

impl DecayMode {
    /// Symbol used in tables and output
    pub fn symbol(&self) -> &str {
        match self {
            DecayMode::Alpha => "A",
            DecayMode::BetaMinus => "B-",
            DecayMode::BetaPlus => "B+",
            DecayMode::ElectronCapture => "EC",
            DecayMode::IsomericTransition => "IT",
            DecayMode::SpontaneousFission => "SF",
            DecayMode::Other(s) => s,
        }
    }
}

impl std::str::FromStr for DecayMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "A" | "ALPHA" => DecayMode::Alpha,
            "B-" | "BM" | "BETA-" => DecayMode::BetaMinus,
            "B+" | "BP" | "BETA+" => DecayMode::BetaPlus,
            "EC" | "EC+B+" | "ECB+" | "B+EC" => DecayMode::ElectronCapture,
            "IT" => DecayMode::IsomericTransition,
            "SF" => DecayMode::SpontaneousFission,
            _ => DecayMode::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for DecayMode {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(mode) => mode,
            Err(never) => match never {},
        }
    }
}

impl From<DecayMode> for String {
    fn from(mode: DecayMode) -> Self {
        mode.symbol().to_string()
    }
}

impl std::fmt::Display for DecayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
