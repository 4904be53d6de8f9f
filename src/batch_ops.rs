#[cfg(feature = "batch-ops")]
use rayon::prelude::*;

#[cfg(feature = "batch-ops")]
use crate::analyzer::{AnalysisResult, FileFingerprintAnalyzer};

/// Fingerprint every buffer in parallel. Results are in input order.
#[cfg(feature = "batch-ops")]
#[must_use]
pub fn analyze_batch(batch: &[&[u8]]) -> Vec<AnalysisResult> {
    let analyzer = FileFingerprintAnalyzer::new();
    batch.par_iter().map(|data| analyzer.analyze(data)).collect()
}
