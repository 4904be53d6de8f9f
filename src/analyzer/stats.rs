//! src/analyzer/stats.rs
//! Byte-distribution statistics.

/// Occurrence count of every byte value.
#[must_use]
pub fn byte_histogram(data: &[u8]) -> [u64; 256] {
    let mut counts = [0u64; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }
    counts
}

/// Shannon entropy in bits per byte, in `[0, 8]`. Empty input is `0.0`.
#[must_use]
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let total = data.len() as f64;
    byte_histogram(data)
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Chi-squared of the byte frequencies against a uniform distribution,
/// scaled by the sample size.
#[must_use]
pub fn chi_squared(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let total = data.len() as f64;
    let expected = 1.0 / 256.0;
    let statistic: f64 = byte_histogram(data)
        .iter()
        .map(|&count| {
            let diff = count as f64 / total - expected;
            diff * diff / expected
        })
        .sum();
    statistic * total
}

/// Probability that two bytes drawn without replacement are equal.
/// Inputs shorter than two bytes give `0.0`.
#[must_use]
pub fn index_of_coincidence(data: &[u8]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let n = data.len() as f64;
    let pairs: f64 = byte_histogram(data)
        .iter()
        .map(|&count| count as f64 * (count as f64 - 1.0))
        .sum();
    pairs / (n * (n - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_extremes() {
        assert_eq!(shannon_entropy(&[0u8; 512]), 0.0);
        let every_byte: Vec<u8> = (0..=255).collect();
        assert!((shannon_entropy(&every_byte) - 8.0).abs() < 1e-12);
        assert_eq!(shannon_entropy(&[]), 0.0);
    }

    #[test]
    fn uniform_sample_has_zero_chi_squared() {
        let every_byte: Vec<u8> = (0..=255).collect();
        assert!(chi_squared(&every_byte).abs() < 1e-9);
    }

    #[test]
    fn constant_buffer_coincides_always() {
        assert_eq!(index_of_coincidence(&[7u8; 64]), 1.0);
        assert_eq!(index_of_coincidence(&[7u8]), 0.0);
    }
}
