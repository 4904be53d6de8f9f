//! tests/validator_tests.rs

use spadeace::{PlaintextValidator, PrintableRatioValidator};

fn mixed(printable: usize, other: u8, others: usize) -> Vec<u8> {
    let mut buf = vec![b'x'; printable];
    buf.extend(std::iter::repeat(other).take(others));
    buf
}

#[test]
fn printable_text_is_accepted() {
    let validator = PrintableRatioValidator::new();
    assert!(validator.is_plausible(b"The quick brown fox jumps over the lazy dog."));
}

#[test]
fn all_zero_is_rejected() {
    assert!(!PrintableRatioValidator::new().is_plausible(&[0u8; 64]));
}

#[test]
fn exactly_seventy_percent_is_rejected() {
    let validator = PrintableRatioValidator::new();
    assert!(!validator.is_plausible(&mixed(7, 0x01, 3)));
    assert!(!validator.is_plausible(&mixed(70, 0xFF, 30)));
}

#[test]
fn just_above_seventy_percent_is_accepted() {
    assert!(PrintableRatioValidator::new().is_plausible(&mixed(71, 0xFF, 29)));
}

#[test]
fn nulls_must_stay_below_ten_percent() {
    let validator = PrintableRatioValidator::new();
    assert!(validator.is_plausible(&mixed(91, 0x00, 9)));
    assert!(!validator.is_plausible(&mixed(90, 0x00, 10)));
}

#[test]
fn whitespace_controls_are_not_printable() {
    // Tab and newline fall outside 0x20..=0x7E.
    let validator = PrintableRatioValidator::new();
    assert!(!validator.is_plausible(&mixed(7, b'\n', 3)));
    assert!(validator.is_plausible(&mixed(8, b'\t', 2)));
}

#[test]
fn thresholds_are_adjustable() {
    let lenient = PrintableRatioValidator::new()
        .with_min_printable_ratio(0.5)
        .with_max_null_ratio(0.5);
    assert!(lenient.is_plausible(&mixed(6, 0x00, 4)));
    assert_eq!(lenient.min_printable_ratio(), 0.5);
    assert_eq!(lenient.max_null_ratio(), 0.5);
}
