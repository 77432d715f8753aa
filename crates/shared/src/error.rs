//! Boundary error taxonomy.
//!
//! Only two variants cross the boundary: validation failures (the caller
//! sent nothing usable, generation is never attempted) and pipeline
//! failures (the external call failed in a way the pipeline does not
//! recover from). Parse misses and persistence failures are absorbed
//! closer to where they happen and never reach here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Empty or missing required input. Surfaced immediately.
    #[error("{0}")]
    Validation(String),

    /// The external generation call failed and no local recovery applies.
    #[error("{0}")]
    Generation(String),
}

impl Error {
    /// HTTP-equivalent status, so transport layers can distinguish
    /// caller mistakes from pipeline failures.
    pub fn status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Generation(_) => 500,
        }
    }
}
