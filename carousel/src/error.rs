use thiserror::Error;

/// Errors raised while building lookups over sampled maps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("inverse lookup needs at least 2 samples, got {len}")]
    TooFewSamples { len: usize },
    #[error("input range has {inputs} samples but output range has {outputs}")]
    LengthMismatch { inputs: usize, outputs: usize },
}

/// Errors raised synchronously by the mutating [`crate::Selector`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    #[error("index {index} is out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("index {0} is negative")]
    NegativeIndex(f64),
    #[error("transition target {0} is not a whole index")]
    NonIntegerIndex(f64),
    #[error(transparent)]
    Map(#[from] MapError),
}
