//! Per-document MinHash signature computation.
//!
//! `compute_signature` consumes the n-gram sequence TextPrep produces
//! (spec.md's `compute_signature(ngrams) -> MinHashSignature`); turning raw
//! document text into that sequence — UTF-8 validation, optional NFKC,
//! character windowing — is [`crate::textprep::prepare_ngrams`]'s job, not
//! this module's.

use super::hash::murmur3_32;
use serde::{Deserialize, Serialize};

/// Parameters controlling signature size and shingle construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MinHashConfig {
    /// Character-shingle window size.
    #[serde(default = "default_ngram")]
    pub ngram: usize,
    /// Number of LSH bands.
    #[serde(default = "default_bands")]
    pub bands: usize,
    /// Rows (hash functions) per band. `bands * rows_per_band` is the
    /// total signature length.
    #[serde(default = "default_rows_per_band")]
    pub rows_per_band: usize,
    /// Whether TextPrep should NFKC-normalize a document's text before
    /// shingling (spec.md's "optional NFKC" step).
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_ngram() -> usize {
    5
}
fn default_bands() -> usize {
    20
}
fn default_rows_per_band() -> usize {
    10
}
fn default_normalize() -> bool {
    true
}

impl Default for MinHashConfig {
    fn default() -> Self {
        Self {
            ngram: default_ngram(),
            bands: default_bands(),
            rows_per_band: default_rows_per_band(),
            normalize: default_normalize(),
        }
    }
}

impl MinHashConfig {
    /// Total number of hash functions (signature length).
    pub fn num_perm(&self) -> usize {
        self.bands * self.rows_per_band
    }
}

/// A document's MinHash signature plus the configuration it was computed
/// under (needed later to re-derive band boundaries without re-threading
/// config through every call site).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinHashSignature {
    pub values: Vec<u32>,
    pub bands: usize,
    pub rows_per_band: usize,
}

impl MinHashSignature {
    /// Estimated Jaccard similarity between two signatures: the fraction of
    /// hash functions where both signatures agree.
    pub fn similarity(&self, other: &MinHashSignature) -> f64 {
        if self.values.len() != other.values.len() || self.values.is_empty() {
            return 0.0;
        }
        let matches = self
            .values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a == b)
            .count();
        matches as f64 / self.values.len() as f64
    }
}

/// Compute a document's MinHash signature from its pre-built n-gram
/// sequence (produced by [`crate::textprep::prepare_ngrams`]): for each of
/// `num_perm()` seeded hash functions, the minimum `murmur3_32` hash over
/// every n-gram. A document with an empty n-gram set (fewer than `ngram`
/// characters) gets an all-zero signature, so every such document collides
/// in every band and DedupStore treats them as a no-op class of their own
/// rather than spuriously colliding with real content.
pub fn compute_signature(ngrams: &[Vec<u8>], config: &MinHashConfig) -> MinHashSignature {
    let num_perm = config.num_perm();

    if ngrams.is_empty() {
        return MinHashSignature {
            values: vec![0u32; num_perm],
            bands: config.bands,
            rows_per_band: config.rows_per_band,
        };
    }

    let mut values = vec![u32::MAX; num_perm];
    for (seed, slot) in values.iter_mut().enumerate() {
        let mut min_hash = u32::MAX;
        for ngram in ngrams {
            let h = murmur3_32(ngram, seed as u32);
            if h < min_hash {
                min_hash = h;
            }
        }
        *slot = min_hash;
    }

    MinHashSignature {
        values,
        bands: config.bands,
        rows_per_band: config.rows_per_band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textprep::prepare_ngrams;

    fn sig_for(text: &str, config: &MinHashConfig) -> MinHashSignature {
        let ngrams = prepare_ngrams(text, config.ngram, config.normalize).unwrap();
        compute_signature(&ngrams, config)
    }

    #[test]
    fn test_signature_is_deterministic() {
        let config = MinHashConfig::default();
        let a = sig_for("the quick brown fox jumps over the lazy dog", &config);
        let b = sig_for("the quick brown fox jumps over the lazy dog", &config);
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn test_identical_documents_have_similarity_one() {
        let config = MinHashConfig::default();
        let a = sig_for("identical text content here", &config);
        let b = sig_for("identical text content here", &config);
        assert_eq!(a.similarity(&b), 1.0);
    }

    #[test]
    fn test_similarity_decreases_with_divergence() {
        let config = MinHashConfig::default();
        let a = sig_for("the quick brown fox jumps over the lazy dog", &config);
        let b = sig_for(
            "the quick brown fox jumps over the lazy dog and then some more unrelated text",
            &config,
        );
        let c = sig_for("completely unrelated content about something else entirely", &config);
        assert!(a.similarity(&b) > a.similarity(&c));
    }

    #[test]
    fn test_empty_and_short_text_yields_all_zero_signature() {
        let config = MinHashConfig::default();
        let sig = sig_for("", &config);
        assert_eq!(sig.values.len(), config.num_perm());
        assert!(sig.values.iter().all(|&v| v == 0));
        let sig2 = sig_for("hi", &config);
        assert!(sig2.values.iter().all(|&v| v == 0));
        assert_eq!(sig, MinHashSignature {
            values: vec![0; config.num_perm()],
            bands: config.bands,
            rows_per_band: config.rows_per_band,
        });
    }

    #[test]
    fn test_signature_length_matches_config() {
        let config = MinHashConfig {
            ngram: 4,
            bands: 5,
            rows_per_band: 3,
            normalize: true,
        };
        let sig = sig_for("some reasonably long sample document text", &config);
        assert_eq!(sig.values.len(), 15);
    }

    #[test]
    fn test_compute_signature_over_explicit_ngrams() {
        let config = MinHashConfig::default();
        let ngrams = vec![b"hel".to_vec(), b"ell".to_vec(), b"llo".to_vec()];
        let sig = compute_signature(&ngrams, &config);
        assert_eq!(sig.values.len(), config.num_perm());
        assert!(!sig.values.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_compute_signature_empty_ngrams_is_all_zero() {
        let config = MinHashConfig::default();
        let sig = compute_signature(&[], &config);
        assert!(sig.values.iter().all(|&v| v == 0));
    }
}
