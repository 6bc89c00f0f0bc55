//! Rows of the IAEA `decay_rads` and `ground_states` tables

// external crates
use serde::{Deserialize, Serialize};

// gtools modules
use gtools_support::{f, OptionExt, StringExt};

// internal modules
use crate::error::{Error, Result};

/// Type alias for `Vec<Record>`
pub type RecordSet = Vec<Record>;

/// Type of decay radiation
///
/// Only the radiation types that carry information used to build reference
/// tables are supported. Every type reports the decay mode and branching of
/// the parent, but only [RadType::Gamma] records carry gamma lines.
///
/// ```rust
/// # use gtools_iaea::RadType;
/// # use std::str::FromStr;
/// assert_eq!(RadType::from_str("bm").unwrap(), RadType::BetaMinus);
/// assert_eq!(RadType::Gamma.query_symbol(), "g");
/// ```
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum RadType {
    /// Alpha decay (`a`)
    Alpha,
    /// Beta+ or electron capture (`bp`)
    BetaPlus,
    /// Beta- (`bm`)
    BetaMinus,
    /// Gamma decay (`g`)
    #[default]
    Gamma,
}

impl RadType {
    /// Every supported radiation type
    pub const ALL: [RadType; 4] = [
        RadType::Alpha,
        RadType::BetaPlus,
        RadType::BetaMinus,
        RadType::Gamma,
    ];

    /// Get corresponding API symbol for a variant
    pub fn query_symbol(&self) -> &str {
        match self {
            RadType::Alpha => "a",
            RadType::BetaPlus => "bp",
            RadType::BetaMinus => "bm",
            RadType::Gamma => "g",
        }
    }
}

impl std::str::FromStr for RadType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "a" => Ok(RadType::Alpha),
            "bp" => Ok(RadType::BetaPlus),
            "bm" => Ok(RadType::BetaMinus),
            "g" => Ok(RadType::Gamma),
            _ => Err(Error::CouldNotInferRadType {
                hint: s.to_string(),
            }),
        }
    }
}

/// Data for a single record from an IAEA `decay_rads` request
///
/// This is a subset of the `decay_rads` fields of the IAEA chart of nuclides
/// API (see the
/// [guide](https://www-nds.iaea.org/relnsd/vcharthtml/api_v0_guide.html)),
/// keeping only what is needed for reference tables.
///
/// ## Why Option?
///
/// The guide is frustratingly inconsistent with the data you actually recieve
/// and every CSV field appears optional. Blank fields are `None`.
///
/// ```text
/// Record (g)
///   Energy           186.211 keV
///   Intensity        3.64 %
///   Half life        50491081600 s
///   Decay mode       A
///   Branching        100 %
///   Parent           Ra226 (0 keV)
///   Daughter         Rn222
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Record {
    /// Radiation energy (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(alias = "mean_energy")]
    pub energy: Option<f64>,

    /// Radiation intensity (%)
    #[serde(alias = "intensity_beta")]
    #[serde(deserialize_with = "csv::invalid_option")]
    pub intensity: Option<f64>,

    /// Parent half-life (s)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "half_life_sec")]
    pub half_life: Option<f64>,

    /// Decay mechanism
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay")]
    pub decay_mode: Option<String>,

    /// Decay mechanism branching ratio (%)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay_%")]
    pub branching: Option<f64>,

    // * Parent nuclide
    /// Element of the parent
    #[serde(deserialize_with = "csv::invalid_option")]
    pub p_symbol: Option<String>,

    /// Parent proton number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub p_z: Option<u16>,

    /// Parent neutron number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub p_n: Option<u16>,

    /// Parent energy state (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub p_energy: Option<f64>,

    // * Daughter nuclide
    /// Element of the daughter
    #[serde(deserialize_with = "csv::invalid_option")]
    pub d_symbol: Option<String>,

    /// Daughter proton number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub d_z: Option<u16>,

    /// Daughter neutron number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub d_n: Option<u16>,

    /// Radiation type of the request this record came from
    #[serde(skip_deserializing)]
    pub rad_type: RadType,
}

impl Record {
    /// Check if the parent is in an excited state
    pub fn is_isomer(&self) -> bool {
        matches!(self.p_energy, Some(e) if e > 0.0)
    }

    /// Parent element and mass number, if both are present
    pub fn parent(&self) -> Option<(String, u16)> {
        let symbol = self.p_symbol.as_ref()?.as_symbol();
        Some((symbol, self.p_z? + self.p_n?))
    }

    /// Daughter element and mass number, if both are present
    pub fn daughter(&self) -> Option<(String, u16)> {
        let symbol = self.d_symbol.as_ref()?.as_symbol();
        Some((symbol, self.d_z? + self.d_n?))
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = |n: Option<(String, u16)>| n.map(|(s, a)| f!("{s}{a}"));
        let mut s = f!("Record ({})\n", self.rad_type.query_symbol());
        s += &f!("  Energy           {} keV\n", self.energy.display());
        s += &f!("  Intensity        {} %\n", self.intensity.display());
        s += &f!("  Half life        {} s\n", self.half_life.display());
        s += &f!("  Decay mode       {}\n", self.decay_mode.display());
        s += &f!("  Branching        {} %\n", self.branching.display());
        s += &f!(
            "  Parent           {} ({} keV)\n",
            name(self.parent()).display(),
            self.p_energy.display()
        );
        s += &f!("  Daughter         {}", name(self.daughter()).display());
        write!(f, "{s}")
    }
}

/// Data for a single row of an IAEA `ground_states` request
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct GroundState {
    /// Element symbol
    pub symbol: String,

    /// Proton number
    pub z: u16,

    /// Neutron number
    pub n: u16,

    /// Half-life as written by the IAEA, `STABLE` for stable nuclides
    #[serde(deserialize_with = "csv::invalid_option")]
    pub half_life: Option<String>,

    /// Half-life (s)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub half_life_sec: Option<f64>,
}

impl GroundState {
    /// Mass number
    pub fn mass(&self) -> u16 {
        self.z + self.n
    }

    /// Check for the IAEA `STABLE` marker
    pub fn is_stable(&self) -> bool {
        self.half_life
            .as_ref()
            .is_some_and(|h| h.eq_ignore_ascii_case("stable"))
    }
}

impl std::fmt::Display for GroundState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.symbol.as_symbol(), self.mass())
    }
}

// ! CSV parsing

fn csv_reader(csv_text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes())
}

/// Deserialise `decay_rads` CSV text into [Record]s
///
/// ```rust
/// # use gtools_iaea::{parse_records, RadType};
/// let text = "energy,intensity,p_z,p_n,p_symbol,p_energy,half_life_sec,decay,decay_%,d_z,d_n,d_symbol\n\
///             1173.228,99.85,27,33,Co,0,166344192,B-,100,28,32,Ni\n";
///
/// let records = parse_records(text, RadType::Gamma).unwrap();
/// assert_eq!(records[0].energy, Some(1173.228));
/// assert_eq!(records[0].daughter(), Some(("Ni".to_string(), 60)));
/// ```
pub fn parse_records(csv_text: &str, rad_type: RadType) -> Result<RecordSet> {
    let mut records = Vec::new();
    for record in csv_reader(csv_text).deserialize::<Record>() {
        let mut record = record?;
        record.rad_type = rad_type;
        records.push(record);
    }
    Ok(records)
}

/// Deserialise `ground_states` CSV text into [GroundState]s
///
/// Neutrons are listed with `z = 0` and are easily confused for nitrogen
/// isotopes, so these are left out.
pub fn parse_ground_states(csv_text: &str) -> Result<Vec<GroundState>> {
    let mut states = Vec::new();
    for state in csv_reader(csv_text).deserialize::<GroundState>() {
        let state = state?;
        if state.z > 0 {
            states.push(state);
        }
    }
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: &str = "z,n,symbol,half_life,unit_hl,half_life_sec\n\
                          0,1,N,613.9,s,613.9\n\
                          27,33,Co,5.2714,y,166344192\n\
                          28,32,Ni,STABLE,,\n";

    #[test]
    fn ground_states_skip_neutrons() {
        let states = parse_ground_states(GROUND).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].to_string(), "Co60");
        assert!(!states[0].is_stable());
        assert!(states[1].is_stable());
        assert_eq!(states[1].half_life_sec, None);
    }

    #[test]
    fn blank_fields_are_none() {
        let text = "energy,intensity,p_z,p_n,p_symbol,p_energy,decay,decay_%\n\
                    ,,91,143,Pa,73.92,IT,0.16\n";
        let records = parse_records(text, RadType::BetaMinus).unwrap();
        assert_eq!(records[0].energy, None);
        assert_eq!(records[0].daughter(), None);
        assert!(records[0].is_isomer());
        assert_eq!(records[0].rad_type, RadType::BetaMinus);
    }

    #[test]
    fn unknown_rad_type() {
        use std::str::FromStr;
        assert!(matches!(
            RadType::from_str("x"),
            Err(Error::CouldNotInferRadType { .. })
        ));
    }
}
