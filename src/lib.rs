//! # corpussift — corpus-scale fuzzy and exact text deduplication
//!
//! corpussift deduplicates extremely large text corpora (tens to hundreds
//! of gigabytes of JSONL documents, typically language-model training
//! data) via three independent cores sharing a small text-preparation
//! layer:
//!
//! - [`textprep`] — UTF-8 character extraction, n-gram windowing, NFKC.
//! - [`minhash`] — MinHash signatures and LSH band/bucket dedup.
//! - [`suffix_array`] — suffix-array construction for exact-substring
//!   dedup, over raw bytes or tokenized (`u16`) corpora.
//! - [`editdistance`] — Levenshtein, Damerau-Levenshtein, LCS, and Hamming
//!   distance/similarity kernels.
//! - [`pipeline`] — thread-pool-driven fan-out gluing compressed JSONL I/O
//!   to the three cores above.
//! - [`error`] — the typed error kinds the core can return.
//!
//! ## Quick start
//!
//! ```
//! use corpussift::minhash::{compute_signature, bucketize, MinHashConfig};
//! use corpussift::textprep::prepare_ngrams;
//!
//! let config = MinHashConfig::default();
//! let ngrams = prepare_ngrams("the quick brown fox", config.ngram, config.normalize).unwrap();
//! let sig = compute_signature(&ngrams, &config);
//! let buckets = bucketize(&sig);
//! assert_eq!(buckets.len(), config.bands);
//! ```

pub mod editdistance;
pub mod error;
pub mod minhash;
pub mod pipeline;
pub mod suffix_array;
pub mod textprep;
