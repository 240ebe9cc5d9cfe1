// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Agrisim Farmer Adoption Suite - Error Taxonomy

//! Failure modes of a simulation run.
//!
//! Every error here is fatal for the run that raised it: the run aborts and
//! no partial time series is persisted. There is no recovered failure mode.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration value is outside its admissible range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A documented but unimplemented feature was requested.
    #[error("not implemented: {0}")]
    Unimplemented(&'static str),

    /// The initial population or its neighborhood graph could not be built.
    #[error("population construction failed: {0}")]
    PopulationConstruction(String),

    /// A decision signal turned out non-finite. Comparing against NaN would
    /// silently land every agent in the tie branch, so it is rejected here.
    #[error("degenerate decision signal: {0}")]
    DegenerateSignal(String),
}
