//! Result and Error types for the IAEA data module

/// Type alias for `Result<T, iaea::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `gtools-iaea`
pub enum Error {
    /// Failure during GET request to IAEA API
    #[error("request to IAEA API failed")]
    FailedRequest(#[from] minreq::Error),

    /// Failed to deserialise the CSV returned by the API
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// Failure in the nuclide engine, usually an invalid identifier
    #[error(transparent)]
    Nuclide(#[from] gtools_nuclide::Error),

    /// Unable to infer a radiation type
    #[error("failed to infer radiation type from \"{hint}\"")]
    CouldNotInferRadType { hint: String },

    /// Invalid nuclide state for IAEA API queries
    #[error("IAEA API does not accept isomer \"{nuclide}\" in queries")]
    InvalidNuclideQuery { nuclide: String },

    /// Request succeeded but returned nothing usable
    #[error("empty response for \"{query}\"")]
    EmptyResponse { query: String },
}
