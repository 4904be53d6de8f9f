//! src/keyspace/rules.rs
//! Word-mangling rules.

/// Rule set used when the caller supplies none.
pub const DEFAULT_RULES: &[&str] = &[
    ":", "$1", "$2", "$3", "^1", "^2", "^3", "u", "l", "c", "r", "d",
];

/// Apply one mangling rule to `word`.
///
/// | rule | effect |
/// |------|--------|
/// | `:`  | unchanged |
/// | `$X` | append `X` (everything after `$`) |
/// | `^X` | prepend `X` |
/// | `u`  | uppercase |
/// | `l`  | lowercase |
/// | `c`  | lowercase, then uppercase the first character |
/// | `r`  | reverse |
/// | `d`  | duplicate |
///
/// Anything else leaves the word unchanged.
#[must_use]
pub fn apply_rule(word: &str, rule: &str) -> String {
    if let Some(suffix) = rule.strip_prefix('$') {
        return format!("{word}{suffix}");
    }
    if let Some(prefix) = rule.strip_prefix('^') {
        return format!("{prefix}{word}");
    }
    match rule {
        "u" => word.to_uppercase(),
        "l" => word.to_lowercase(),
        "c" => capitalise(word),
        "r" => word.chars().rev().collect(),
        "d" => word.repeat(2),
        _ => word.to_string(),
    }
}

fn capitalise(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
