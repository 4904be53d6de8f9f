//! src/keyspace/mask.rs
//! Hashcat-style masks: `?l ?u ?d ?s ?a` classes, `??` for a literal `?`,
//! anything else literal.

use crate::error::SpadeError;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// A parsed mask. Candidate `i` is the mixed-radix decoding of `i` with the
/// rightmost position varying fastest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPattern {
    positions: Vec<Vec<char>>,
    len: u64,
}

impl MaskPattern {
    /// Parse `pattern`.
    ///
    /// Fails with [`SpadeError::InvalidRequest`] for an empty pattern, an
    /// unknown `?x` class or a candidate count that overflows `u64`.
    pub fn parse(pattern: &str) -> Result<Self, SpadeError> {
        if pattern.is_empty() {
            return Err("mask pattern is empty".into());
        }

        let mut positions = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c != '?' {
                positions.push(vec![c]);
                continue;
            }
            let set: Vec<char> = match chars.next() {
                Some('l') => LOWER.chars().collect(),
                Some('u') => UPPER.chars().collect(),
                Some('d') => DIGITS.chars().collect(),
                Some('s') => SPECIAL.chars().collect(),
                Some('a') => [LOWER, UPPER, DIGITS, SPECIAL].concat().chars().collect(),
                Some('?') | None => vec!['?'],
                Some(other) => {
                    return Err(SpadeError::InvalidRequest(format!(
                        "unknown mask class ?{other}"
                    )))
                }
            };
            positions.push(set);
        }

        let len = positions
            .iter()
            .try_fold(1u64, |acc, set| acc.checked_mul(set.len() as u64))
            .ok_or("mask candidate count overflows u64")?;

        Ok(Self { positions, len })
    }

    /// Number of candidates.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Candidate at `index`, or `None` past the end.
    #[must_use]
    pub fn candidate(&self, mut index: u64) -> Option<String> {
        if index >= self.len {
            return None;
        }
        let mut out = vec!['\0'; self.positions.len()];
        for (slot, set) in out.iter_mut().zip(&self.positions).rev() {
            let radix = set.len() as u64;
            *slot = set[(index % radix) as usize];
            index /= radix;
        }
        Some(out.into_iter().collect())
    }
}
