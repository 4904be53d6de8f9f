//! # Keyspace
//!
//! Index spaces searched by the engine and their partitioning across workers.
//!
//! Every attack method reduces to a [`KeySource`] over `0..len()`: brute force
//! maps an index to raw key bytes, the password methods map it to a candidate
//! string. Multi-stage methods (smart brute force, hybrid) chain sources end
//! to end. Indices are split into contiguous [`KeyspacePartition`]s, one per
//! worker.

pub mod charset;
pub mod mask;
pub mod rules;

use zeroize::Zeroizing;

use crate::consts::COMMON_PASSWORDS;
use crate::error::SpadeError;
use crate::kdf::KeyMaterial;
use crate::model::{AttackMethod, AttackRequest};

pub use self::charset::CharsetSpace;
pub use self::mask::MaskPattern;
pub use self::rules::{apply_rule, DEFAULT_RULES};

/// Half-open index range `[start, end)` assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyspacePartition {
    pub start: u64,
    pub end: u64,
}

impl KeyspacePartition {
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `[0, total)` into at most `workers` contiguous partitions.
///
/// Sizes come from integer division; the remainder is folded into the last
/// partition. The worker count is clamped to `1..=total`, so no partition is
/// empty unless `total` is zero, in which case a single empty partition is
/// returned.
#[must_use]
pub fn partition(total: u64, workers: usize) -> Vec<KeyspacePartition> {
    if total == 0 {
        return vec![KeyspacePartition::new(0, 0)];
    }
    let count = (workers.max(1) as u64).min(total);
    let size = total / count;

    (0..count)
        .map(|i| {
            let start = i * size;
            let end = if i == count - 1 { total } else { start + size };
            KeyspacePartition::new(start, end)
        })
        .collect()
}

/// Raw trial key for a brute-force counter: the counter's little-endian bytes
/// in the low positions, zero elsewhere.
#[must_use]
pub fn key_from_counter(counter: u64, key_len: usize) -> KeyMaterial {
    let mut key = Zeroizing::new(vec![0u8; key_len]);
    let bytes = counter.to_le_bytes();
    let n = key_len.min(bytes.len());
    key[..n].copy_from_slice(&bytes[..n]);
    key
}

/// One candidate produced by a [`KeySource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Raw key bytes, used as-is.
    RawKey { counter: u64, key: KeyMaterial },
    /// A password still to be run through key derivation.
    Password(String),
}

/// Indexable candidate space for one attack.
#[derive(Debug, Clone)]
pub enum KeySource<'a> {
    /// Counters `0..total` turned into raw keys of `key_len` bytes.
    Counter { total: u64, key_len: usize },
    /// Words in caller order.
    Words(&'a [String]),
    /// Every word under every rule; index `i` is word `i / rules`, rule `i % rules`.
    Rules {
        words: &'a [String],
        rules: &'a [String],
    },
    Mask(MaskPattern),
    /// Built-in password list.
    Common(&'static [&'static str]),
    Charset(CharsetSpace),
    /// `hash:password` lines; the candidate is the second field.
    RainbowTable(&'a [String]),
    /// Sources searched one after another.
    Chain(Vec<KeySource<'a>>),
}

impl<'a> KeySource<'a> {
    /// Build the source for `request`, enumerating at most `2^cap_bits`
    /// brute-force keys.
    pub fn for_request(request: &'a AttackRequest, cap_bits: u32) -> Result<Self, SpadeError> {
        let source = match &request.method {
            AttackMethod::BruteForce => {
                let bits = request.key_size_bits.min(cap_bits);
                KeySource::Counter {
                    total: 1u64 << bits,
                    key_len: (request.key_size_bits / 8) as usize,
                }
            }
            AttackMethod::Dictionary { words, .. } => KeySource::Words(words),
            AttackMethod::RuleBased { words, rules, .. } => KeySource::Rules { words, rules },
            AttackMethod::Mask { pattern, .. } => KeySource::Mask(MaskPattern::parse(pattern)?),
            AttackMethod::SmartBruteForce {
                charset,
                max_length,
                common_first,
                ..
            } => smart_source(charset, *max_length, *common_first)?,
            AttackMethod::Hybrid {
                words,
                charset,
                max_length,
                ..
            } => KeySource::Chain(vec![
                KeySource::Words(words),
                smart_source(charset, *max_length, true)?,
            ]),
            AttackMethod::RainbowTable { entries, .. } => KeySource::RainbowTable(entries),
        };
        if source.len() == 0 {
            return Err(SpadeError::InvalidRequest(format!(
                "{} attack has no candidates",
                request.method.label()
            )));
        }
        Ok(source)
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> u64 {
        match self {
            KeySource::Counter { total, .. } => *total,
            KeySource::Words(words) => words.len() as u64,
            KeySource::Rules { words, rules } => {
                (words.len() as u64).saturating_mul(rules.len() as u64)
            }
            KeySource::Mask(mask) => mask.len(),
            KeySource::Common(words) => words.len() as u64,
            KeySource::Charset(space) => space.len(),
            KeySource::RainbowTable(entries) => entries.len() as u64,
            KeySource::Chain(stages) => stages
                .iter()
                .fold(0u64, |total, stage| total.saturating_add(stage.len())),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidate at `index`, or `None` past the end.
    #[must_use]
    pub fn candidate(&self, index: u64) -> Option<Candidate> {
        if index >= self.len() {
            return None;
        }
        let password = match self {
            KeySource::Counter { key_len, .. } => {
                return Some(Candidate::RawKey {
                    counter: index,
                    key: key_from_counter(index, *key_len),
                })
            }
            KeySource::Words(words) => words[index as usize].clone(),
            KeySource::Rules { words, rules } => {
                let per_word = rules.len() as u64;
                let word = &words[(index / per_word) as usize];
                let rule = &rules[(index % per_word) as usize];
                apply_rule(word, rule)
            }
            KeySource::Mask(mask) => mask.candidate(index)?,
            KeySource::Common(words) => words[index as usize].to_string(),
            KeySource::Charset(space) => space.candidate(index)?,
            KeySource::RainbowTable(entries) => {
                entries[index as usize].trim().split(':').nth(1)?.to_string()
            }
            KeySource::Chain(stages) => {
                let mut index = index;
                for stage in stages {
                    let len = stage.len();
                    if index < len {
                        return stage.candidate(index);
                    }
                    index -= len;
                }
                return None;
            }
        };
        Some(Candidate::Password(password))
    }
}

/// Common passwords (optionally) followed by the charset space.
fn smart_source<'a>(
    charset: &str,
    max_length: u32,
    common_first: bool,
) -> Result<KeySource<'a>, SpadeError> {
    let space = KeySource::Charset(CharsetSpace::new(charset, max_length)?);
    Ok(if common_first {
        KeySource::Chain(vec![KeySource::Common(COMMON_PASSWORDS), space])
    } else {
        space
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Algorithm;

    #[test]
    fn remainder_goes_to_last_partition() {
        let parts = partition(10, 3);
        assert_eq!(
            parts,
            vec![
                KeyspacePartition::new(0, 3),
                KeyspacePartition::new(3, 6),
                KeyspacePartition::new(6, 10),
            ]
        );
    }

    #[test]
    fn more_workers_than_keys() {
        let parts = partition(2, 8);
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.len() == 1));
    }

    #[test]
    fn counter_key_is_little_endian() {
        let key = key_from_counter(0x0102_0304, 16);
        assert_eq!(&key[..5], &[0x04, 0x03, 0x02, 0x01, 0x00]);
        assert!(key[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn brute_force_source_respects_cap() {
        let request = AttackRequest::new(vec![0u8; 32], Algorithm::Aes);
        let source = KeySource::for_request(&request, 12).unwrap();
        assert_eq!(source.len(), 1 << 12);
        match source.candidate(5) {
            Some(Candidate::RawKey { counter, key }) => {
                assert_eq!(counter, 5);
                assert_eq!(key.len(), 32);
            }
            other => panic!("unexpected candidate {other:?}"),
        }
        assert!(source.candidate(1 << 12).is_none());
    }

    #[test]
    fn rule_source_walks_rules_per_word() {
        let words = vec!["alpha".to_string(), "beta".to_string()];
        let rules = vec![":".to_string(), "u".to_string()];
        let source = KeySource::Rules { words: &words, rules: &rules };
        let all: Vec<_> = (0..source.len()).filter_map(|i| source.candidate(i)).collect();
        assert_eq!(
            all,
            ["alpha", "ALPHA", "beta", "BETA"]
                .map(|s| Candidate::Password(s.to_string()))
                .to_vec()
        );
    }

    #[test]
    fn chain_walks_stages_in_order() {
        let words = vec!["first".to_string()];
        let source = KeySource::Chain(vec![
            KeySource::Words(&words),
            KeySource::Words(&[]),
            KeySource::Common(&["second", "third"]),
        ]);
        assert_eq!(source.len(), 3);
        assert_eq!(source.candidate(0), Some(Candidate::Password("first".into())));
        assert_eq!(source.candidate(2), Some(Candidate::Password("third".into())));
        assert_eq!(source.candidate(3), None);
    }

    #[test]
    fn smart_source_puts_common_passwords_first() {
        let request = AttackRequest::new(vec![0u8; 32], Algorithm::Aes)
            .with_method(AttackMethod::smart_brute_force("xy", 2));
        let source = KeySource::for_request(&request, 32).unwrap();
        let common = COMMON_PASSWORDS.len() as u64;
        assert_eq!(source.len(), common + 2 + 4);
        assert_eq!(source.candidate(0), Some(Candidate::Password("password".into())));
        assert_eq!(source.candidate(common), Some(Candidate::Password("x".into())));
        assert_eq!(source.candidate(common + 5), Some(Candidate::Password("yy".into())));
    }

    #[test]
    fn rainbow_entries_yield_second_field() {
        let entries = vec![
            " 5f4dcc3b:password \n".to_string(),
            "no separator".to_string(),
            "abc:def:ghi".to_string(),
        ];
        let source = KeySource::RainbowTable(&entries);
        assert_eq!(source.len(), 3);
        assert_eq!(source.candidate(0), Some(Candidate::Password("password".into())));
        assert_eq!(source.candidate(1), None);
        assert_eq!(source.candidate(2), Some(Candidate::Password("def".into())));
    }

    #[test]
    fn empty_dictionary_is_rejected() {
        let request = AttackRequest::new(vec![0u8; 32], Algorithm::Aes)
            .with_method(AttackMethod::dictionary(Vec::<String>::new()));
        assert!(matches!(
            KeySource::for_request(&request, 32),
            Err(SpadeError::InvalidRequest(_))
        ));
    }
}
