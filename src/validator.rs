//! # Plaintext Validation
//!
//! Decides whether a decoded buffer looks like genuine recovered plaintext.
//! The default [`PrintableRatioValidator`] runs once per candidate key, so it
//! is a single pass over the buffer.

use crate::consts::{MAX_NULL_RATIO, MIN_PRINTABLE_RATIO};

/// Scores decoded candidate buffers.
///
/// Implementations are shared by every worker thread and must be stateless
/// or internally synchronised.
pub trait PlaintextValidator: Send + Sync {
    /// `true` when `candidate` is plausible plaintext.
    fn is_plausible(&self, candidate: &[u8]) -> bool;
}

impl<F> PlaintextValidator for F
where
    F: Fn(&[u8]) -> bool + Send + Sync,
{
    fn is_plausible(&self, candidate: &[u8]) -> bool {
        self(candidate)
    }
}

/// Accepts buffers that are mostly printable ASCII and nearly free of NULs.
///
/// A buffer passes when its printable ratio (bytes `0x20..=0x7E`) is strictly
/// greater than `min_printable_ratio` and its NUL ratio is strictly below
/// `max_null_ratio`. Empty buffers never pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintableRatioValidator {
    min_printable_ratio: f64,
    max_null_ratio: f64,
}

impl PrintableRatioValidator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_printable_ratio: MIN_PRINTABLE_RATIO,
            max_null_ratio: MAX_NULL_RATIO,
        }
    }

    #[must_use]
    pub fn with_min_printable_ratio(mut self, ratio: f64) -> Self {
        self.min_printable_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_max_null_ratio(mut self, ratio: f64) -> Self {
        self.max_null_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub const fn min_printable_ratio(&self) -> f64 {
        self.min_printable_ratio
    }

    #[must_use]
    pub const fn max_null_ratio(&self) -> f64 {
        self.max_null_ratio
    }
}

impl Default for PrintableRatioValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaintextValidator for PrintableRatioValidator {
    fn is_plausible(&self, candidate: &[u8]) -> bool {
        if candidate.is_empty() {
            return false;
        }

        let (printable, nulls) = candidate
            .iter()
            .fold((0usize, 0usize), |(printable, nulls), &byte| match byte {
                0 => (printable, nulls + 1),
                0x20..=0x7E => (printable + 1, nulls),
                _ => (printable, nulls),
            });

        let len = candidate.len() as f64;
        printable as f64 / len > self.min_printable_ratio
            && (nulls as f64) < len * self.max_null_ratio
    }
}
