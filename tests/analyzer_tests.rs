//! tests/analyzer_tests.rs

mod common;

use common::{encrypt_with_counter, random_bytes, TEST_PLAINTEXT};
use spadeace::analyzer::stats::shannon_entropy;
use spadeace::{Algorithm, FileFingerprintAnalyzer, Mode};

fn analyze(data: &[u8]) -> spadeace::AnalysisResult {
    FileFingerprintAnalyzer::new().analyze(data)
}

#[test]
fn entropy_bounds() {
    assert!(shannon_entropy(&random_bytes(4096, 7)) > 7.9);
    assert_eq!(shannon_entropy(&[0u8; 4096]), 0.0);

    let result = analyze(&[0u8; 4096]);
    assert_eq!(result.entropy, 0.0);
    assert_eq!(result.algorithm, Algorithm::Unknown);
    assert_eq!(result.file_type, "Unknown");
}

#[test]
fn zip_signature_wins_over_entropy() {
    let mut data = vec![0x50, 0x4B, 0x03, 0x04];
    data.extend(random_bytes(4092, 11));

    let result = analyze(&data);

    assert!(result.file_type.contains("ZIP"), "{}", result.file_type);
    assert_eq!(result.algorithm, Algorithm::Unknown);
    assert_eq!(result.mode, Mode::Unknown);
    assert!(result.alternatives.is_empty());
    assert!(result.entropy > 7.5);
    assert!(!result.file_type.to_lowercase().contains("encrypted"));
}

#[test]
fn other_containers_are_labelled() {
    for (magic, label) in [
        (&b"%PDF"[..], "PDF"),
        (&b"Rar!"[..], "RAR"),
        (&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C][..], "7-Zip"),
    ] {
        let mut data = magic.to_vec();
        data.extend(random_bytes(256, 3));
        let result = analyze(&data);
        assert!(result.file_type.contains(label), "{}", result.file_type);
        assert_eq!(result.algorithm, Algorithm::Unknown);
    }
}

#[test]
fn salted_envelope_means_aes() {
    let mut data = b"Salted__".to_vec();
    data.extend(random_bytes(4088, 5));

    let result = analyze(&data);

    assert_eq!(result.algorithm, Algorithm::Aes);
    assert!(result.confidence >= 0.4);
    assert!(result.confidence <= 1.0);
    assert_eq!(result.mode, Mode::Cbc);
    assert_eq!(result.key_size_bits, Some(256));
    assert_eq!(result.file_type, "OpenSSL encrypted file");
}

#[test]
fn pgp_and_der_headers_mean_aes() {
    for lead in [0xC3u8, 0x30] {
        let mut data = vec![lead];
        data.extend(random_bytes(511, u64::from(lead)));
        let result = analyze(&data);
        assert_eq!(result.algorithm, Algorithm::Aes, "lead byte {lead:#04x}");
        assert!(result.confidence >= 0.4);
    }
}

#[test]
fn repeated_blocks_are_classified_ecb() {
    let mut data = b"Salted__".to_vec();
    data.extend_from_slice(&[0x42; 8]);
    let block: Vec<u8> = (0u8..16).collect();
    for _ in 0..32 {
        data.extend_from_slice(&block);
    }
    assert_eq!(analyze(&data).mode, Mode::Ecb);
}

#[test]
fn high_entropy_without_envelope_defaults_to_aes_cbc_256() {
    // First byte cleared of envelope bits so no marker matches.
    let mut data = random_bytes(4095, 21);
    data[0] = 0x11;

    let result = analyze(&data);

    assert_eq!(result.algorithm, Algorithm::Aes);
    assert_eq!(result.mode, Mode::Cbc);
    assert_eq!(result.key_size_bits, Some(256));
    assert_eq!(result.file_type, "Generic encrypted data");
    assert!(result.confidence >= 0.3 && result.confidence <= 0.5);
    assert!(result.alternatives.iter().any(|g| g.name.contains("default guess")));
}

#[test]
fn block_alignment_adds_alternatives() {
    let mut data = random_bytes(4096, 8);
    data[0] = 0x11;

    let result = analyze(&data);
    let names: Vec<_> = result.alternatives.iter().map(|g| g.name.as_str()).collect();

    assert!(names.contains(&"AES"));
    assert!(names.contains(&"DES/3DES/Blowfish"));
    assert!(result.alternatives.iter().all(|g| !g.rationale.is_empty()));
    assert!(result.details.contains("16-byte block alignment"));
}

#[test]
fn short_and_empty_buffers() {
    let result = analyze(b"Salted__");
    assert_eq!(result.file_type, "Unknown");
    assert_eq!(result.algorithm, Algorithm::Unknown);

    let empty = analyze(&[]);
    assert_eq!(empty.confidence, 0.0);
    assert_eq!(empty.details, "Empty input");
}

#[test]
fn analysis_is_deterministic() {
    let data = random_bytes(2048, 99);
    assert_eq!(analyze(&data), analyze(&data));
}

#[test]
fn narrative_reports_every_statistic() {
    let result = analyze(&random_bytes(1024, 4));
    for needle in ["Entropy", "Chi-squared", "Index of Coincidence"] {
        assert!(result.details.contains(needle), "missing {needle}");
    }
}

#[test]
fn suggested_request_targets_the_guess() {
    let ciphertext = encrypt_with_counter(9, TEST_PLAINTEXT);
    let mut result = analyze(&ciphertext);
    result.algorithm = Algorithm::Aes;
    result.mode = Mode::Cbc;
    result.key_size_bits = Some(128);

    let request = result.suggested_request(ciphertext.clone()).expect("a request");
    assert_eq!(request.algorithm, Algorithm::Aes);
    assert_eq!(request.mode, Mode::Cbc);
    assert_eq!(request.key_size_bits, 128);
    assert_eq!(request.ciphertext, ciphertext);

    let unknown = analyze(&[0u8; 64]);
    assert!(unknown.suggested_request(vec![0u8; 64]).is_none());
}
