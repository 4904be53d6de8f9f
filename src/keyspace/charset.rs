//! src/keyspace/charset.rs
//! Every password over an alphabet, shortest first.

use crate::consts::MAX_PASSWORD_LENGTH;
use crate::error::SpadeError;

/// All strings of length `1..=max_length` over `alphabet`.
///
/// Lengths are enumerated in increasing order; within one length the
/// rightmost character varies fastest, so `"ab"` with length 2 yields
/// `a b aa ab ba bb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetSpace {
    alphabet: Vec<char>,
    /// Candidate count per length, index 0 holding length 1.
    per_length: Vec<u64>,
    len: u64,
}

impl CharsetSpace {
    /// Fails with [`SpadeError::InvalidRequest`] for an empty alphabet, a
    /// maximum length outside `1..=MAX_PASSWORD_LENGTH` or a candidate count
    /// that overflows `u64`.
    pub fn new(alphabet: &str, max_length: u32) -> Result<Self, SpadeError> {
        let mut chars: Vec<char> = Vec::new();
        for c in alphabet.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        if chars.is_empty() {
            return Err("charset is empty".into());
        }
        if !(1..=MAX_PASSWORD_LENGTH).contains(&max_length) {
            return Err(SpadeError::InvalidRequest(format!(
                "maximum password length {max_length} outside 1..={MAX_PASSWORD_LENGTH}"
            )));
        }

        let radix = chars.len() as u64;
        let mut per_length = Vec::with_capacity(max_length as usize);
        let mut count = 1u64;
        let mut len = 0u64;
        for _ in 0..max_length {
            count = count
                .checked_mul(radix)
                .ok_or("charset candidate count overflows u64")?;
            len = len
                .checked_add(count)
                .ok_or("charset candidate count overflows u64")?;
            per_length.push(count);
        }

        Ok(Self {
            alphabet: chars,
            per_length,
            len,
        })
    }

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
        let mut length = 1;
        for &count in &self.per_length {
            if index < count {
                break;
            }
            index -= count;
            length += 1;
        }

        let radix = self.alphabet.len() as u64;
        let mut out = vec!['\0'; length];
        for slot in out.iter_mut().rev() {
            *slot = self.alphabet[(index % radix) as usize];
            index /= radix;
        }
        Some(out.into_iter().collect())
    }
}
