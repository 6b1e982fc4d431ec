//! LSH bucketization: splitting a MinHash signature into per-band bucket
//! keys with a fixed byte layout.
//!
//! One byte identifies the band, followed by the low 16 bits of each row's
//! hash in that band, written big-endian (high byte then low byte). Keeping
//! this exact layout means any two independent runs that see identical
//! signatures bucket them into identical keys.

use super::signature::MinHashSignature;

/// The bucket key for one band of a document's signature: a band id plus
/// the packed low-16-bits-per-row payload that two documents must match
/// exactly to collide in that band.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketSignature {
    pub band: u8,
    pub bytes: Vec<u8>,
}

/// Split `signature` into one [`BucketSignature`] per band.
///
/// Panics if `signature.bands` exceeds 255 (the band id is a single byte);
/// callers should validate `MinHashConfig` at configuration-load time
/// rather than per-document.
pub fn bucketize(signature: &MinHashSignature) -> Vec<BucketSignature> {
    assert!(
        signature.bands <= u8::MAX as usize,
        "band count {} does not fit in a single byte",
        signature.bands
    );

    let rows = signature.rows_per_band;
    let mut out = Vec::with_capacity(signature.bands);

    for band in 0..signature.bands {
        let mut bytes = Vec::with_capacity(1 + 2 * rows);
        bytes.push(band as u8);

        let start = band * rows;
        for row in &signature.values[start..start + rows] {
            let truncated = (*row & 0xffff) as u16;
            bytes.push((truncated >> 8) as u8);
            bytes.push((truncated & 0xff) as u8);
        }

        out.push(BucketSignature {
            band: band as u8,
            bytes,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minhash::signature::MinHashConfig;

    #[test]
    fn test_bucketize_layout() {
        let sig = MinHashSignature {
            values: vec![0x0001_abcd, 0x0000_1234],
            bands: 1,
            rows_per_band: 2,
        };
        let buckets = bucketize(&sig);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].band, 0);
        // band id, then 0xabcd big-endian, then 0x1234 big-endian.
        assert_eq!(buckets[0].bytes, vec![0x00, 0xab, 0xcd, 0x12, 0x34]);
    }

    fn sig_for(text: &str, config: &MinHashConfig) -> MinHashSignature {
        let ngrams = crate::textprep::prepare_ngrams(text, config.ngram, config.normalize).unwrap();
        super::super::signature::compute_signature(&ngrams, config)
    }

    #[test]
    fn test_bucket_count_matches_bands() {
        let config = MinHashConfig::default();
        let sig = sig_for("some test document text here", &config);
        let buckets = bucketize(&sig);
        assert_eq!(buckets.len(), config.bands);
    }

    #[test]
    fn test_identical_signatures_produce_identical_buckets() {
        let config = MinHashConfig::default();
        let sig_a = sig_for("duplicate content", &config);
        let sig_b = sig_for("duplicate content", &config);
        assert_eq!(bucketize(&sig_a), bucketize(&sig_b));
    }
}
