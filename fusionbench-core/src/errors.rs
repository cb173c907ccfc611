//! Error Types for Fusion and Benchmark Failures
//!
//! ## Design Philosophy
//!
//! FusionBench separates two kinds of trouble:
//!
//! 1. **Contract violations** abort the requested computation and are returned
//!    to the caller. Every variant names the offending stream(s) so a caller
//!    running hundreds of conditions can tell which input was bad.
//!
//! 2. **Numerical degeneracies** (a constant stream, an all-zero confidence
//!    sum, a constant reference) are absorbed where they occur with a
//!    well-defined sentinel or fallback. They never show up here.
//!
//! ## Error Categories
//!
//! ### Input Shape
//! - `EmptyStore`: no streams at all
//! - `EmptyStream`: a stream with zero samples
//! - `LengthMismatch`: streams of unequal length
//! - `ReferenceLength`: reference sequence does not match the stream length
//! - `NonFinite`: NaN or infinity inside a stream
//! - `DuplicateStream`: the same name supplied twice
//!
//! ### Weight Mismatch
//! Weight keys and stream keys differ. Dropping or ignoring a stream would
//! silently change the fused result, so this is always fatal.
//!
//! ### Configuration
//! Window sizes, scale constants and blend coefficients are checked once, when
//! the engine is built, instead of producing garbage scores later.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use fusionbench_core::{FusionError, ShapeError, SignalStore};
//!
//! let result = SignalStore::from_streams([("a", vec![1.0, 2.0]), ("b", vec![1.0])]);
//! match result {
//!     Err(FusionError::Shape(ShapeError::LengthMismatch { stream, .. })) => {
//!         assert_eq!(stream, "b");
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use alloc::{string::String, vec::Vec};
use core::fmt;

use thiserror_no_std::Error;

/// Result type for fusion, assessment and benchmark operations
pub type FusionResult<T> = Result<T, FusionError>;

/// Top-level error for the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    /// Input streams or reference have the wrong shape
    #[error("input shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Weight keys do not match the stream keys of the store being fused
    #[error("weight set does not match streams (missing: {missing}, unexpected: {unexpected})")]
    WeightMismatch {
        /// Streams present in the store but absent from the weight set
        missing: NameList,
        /// Weights naming streams the store does not contain
        unexpected: NameList,
    },

    /// Engine configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Shape and contract violations on input data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// No streams were supplied
    #[error("signal store is empty")]
    EmptyStore,

    /// A stream has no samples
    #[error("stream '{stream}' has no samples")]
    EmptyStream {
        /// Name of the empty stream
        stream: String,
    },

    /// A stream's length differs from the others
    #[error("stream '{stream}' has {actual} samples, expected {expected}")]
    LengthMismatch {
        /// Name of the stream that disagrees
        stream: String,
        /// Length shared by the streams seen first
        expected: usize,
        /// Length of the offending stream
        actual: usize,
    },

    /// Reference sequence length differs from the stream length
    #[error("reference has {actual} samples, streams have {expected}")]
    ReferenceLength {
        /// Stream length
        expected: usize,
        /// Reference length
        actual: usize,
    },

    /// A sample is NaN or infinite
    #[error("stream '{stream}' has a non-finite sample at index {index}")]
    NonFinite {
        /// Name of the stream
        stream: String,
        /// Position of the first bad sample
        index: usize,
    },

    /// The same stream name was supplied more than once
    #[error("stream '{stream}' supplied more than once")]
    DuplicateStream {
        /// Repeated name
        stream: String,
    },
}

/// Invalid numeric configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Rolling window too small for its statistic
    #[error("{name} window of {value} samples is too small")]
    WindowTooSmall {
        /// Which window
        name: &'static str,
        /// Configured size
        value: usize,
    },

    /// A constant that must be strictly positive and finite is not
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive {
        /// Which constant
        name: &'static str,
        /// Configured value
        value: f64,
    },

    /// Confidence blend coefficients are negative or do not sum to one
    #[error("confidence coefficients must be non-negative and sum to 1, got sum {sum}")]
    CoefficientSum {
        /// Sum of the configured coefficients
        sum: f64,
    },

    /// A fixed weight is negative or non-finite
    #[error("weight for '{stream}' must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Stream the weight belongs to
        stream: String,
        /// Offending weight
        value: f64,
    },

    /// JSON configuration could not be parsed
    #[error("could not parse configuration: {0}")]
    Parse(String),
}

/// Comma-separated list of stream names carried inside errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameList(pub Vec<String>);

impl NameList {
    /// True when no names are listed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Listed names
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for NameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl FusionError {
    /// True for input-shape violations (empty store, length mismatches, ...)
    pub fn is_shape_error(&self) -> bool {
        matches!(self, FusionError::Shape(_))
    }
}
