//! Result and Error types for the nuclide engine

/// Type alias for `Result<T, nuclide::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `gtools-nuclide`
///
/// Query errors ([Error::NotFound], [Error::InvalidArgument]) are recoverable
/// and leave the database untouched. A [Error::DataIntegrity] error is only
/// ever raised while building a database, and no database is returned.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Nuclide is not in the reference data
    #[error("nuclide \"{nuclide}\" not found in reference data")]
    NotFound { nuclide: String },

    /// Query argument outside of its valid range
    #[error("invalid {name} = {value}, {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Reference data failed validation while building a database
    #[error("corrupt reference data: {0}")]
    DataIntegrity(#[from] Integrity),

    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failed to read or write a CSV table
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// Failed to read or write a JSON snapshot
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// Failure to serialize/deserialize a byte stream
    #[error("failed binary (de)serialization")]
    FailedBinaryOp(#[from] Box<bincode::ErrorKind>),

    /// Generic error type for nom parser results
    #[error("parser failed: {0}")]
    ParseError(String),
}

/// Specific defect found in reference data
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Integrity {
    #[error("\"{text}\" is not a valid nuclide identifier")]
    InvalidIdentifier { text: String },

    #[error("{nuclide} is listed more than once")]
    DuplicateNuclide { nuclide: String },

    #[error("{nuclide} has mass number {found} but its identifier implies {expected}")]
    MassMismatch {
        nuclide: String,
        expected: u16,
        found: u16,
    },

    #[error("{nuclide} has invalid half-life {half_life} s")]
    HalfLife { nuclide: String, half_life: f64 },

    #[error("decay {parent} -> {daughter} references unknown nuclide {missing}")]
    DanglingEdge {
        parent: String,
        daughter: String,
        missing: String,
    },

    #[error("decay {parent} -> {daughter} has branching ratio {ratio} outside (0,1]")]
    BranchingRatio {
        parent: String,
        daughter: String,
        ratio: f64,
    },

    #[error("branching ratios of {parent} sum to {sum} > 1")]
    BranchingSum { parent: String, sum: f64 },

    #[error("{nuclide} is stable but has outgoing decays")]
    StableWithEdges { nuclide: String },

    #[error("gamma line references unknown nuclide {nuclide}")]
    UnknownEmitter { nuclide: String },

    #[error("{nuclide} gamma line has non-positive energy {energy} keV")]
    Energy { nuclide: String, energy: f64 },

    #[error("{nuclide} gamma line at {energy} keV has intensity {intensity} outside [0,100]")]
    Intensity {
        nuclide: String,
        energy: f64,
        intensity: f64,
    },

    #[error("{element} X-ray line has non-positive energy {energy} keV")]
    XrayEnergy { element: String, energy: f64 },
}
