use rand::distributions::WeightedError;
use thiserror::Error;

/// Ways a run can end without a usable trajectory
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RunError {
    #[error("outflow radius went negative at step {step} (time {time})")]
    NegativeRadius { step: usize, time: f64 },

    #[error("no trajectory points above the radius floor")]
    EmptyAfterFilter,

    #[error("no random generator supplied for resampling")]
    NoSampler,

    #[error("trajectory resampling failed: {0}")]
    Sampling(#[from] WeightedError),
}
