//! Shared types for exact-substring deduplication via suffix arrays.

use serde::{Deserialize, Serialize};

/// Hard ceiling on suffix array input length: the element type is a `u32`
/// index using its full range, so `n` must stay strictly below `2^32`
/// regardless of any configured `max_input_size`. `add_document` enforces
/// this even when a caller configures a larger limit.
pub const HARD_INPUT_LIMIT: usize = u32::MAX as usize;

/// Default ceiling on input size accepted by a single suffix array build,
/// the default cap for one safetensors-backed suffix array file. Below
/// [`HARD_INPUT_LIMIT`] so the default behaves per spec without relying on
/// the hard-limit clamp.
pub const MAX_INPUT_SIZE: usize = 4 * 1024 * 1024 * 1024 - 1; // just under 4 GiB

/// A symbol type the suffix array builder can be generic over: either raw
/// bytes (exact dedup over untokenized text) or `u16` vocabulary ids
/// (exact dedup over a tokenized corpus, vocab size bounded below 65535 so
/// a reserved id is available as an end-of-sequence sentinel).
pub trait Symbol: Copy + Ord + Send + Sync {
    /// Alphabet size, used to size the initial counting sort.
    fn alphabet_size() -> usize;
    fn rank(self) -> u32;
}

impl Symbol for u8 {
    fn alphabet_size() -> usize {
        1 << 8
    }
    fn rank(self) -> u32 {
        self as u32
    }
}

impl Symbol for u16 {
    fn alphabet_size() -> usize {
        1 << 16
    }
    fn rank(self) -> u32 {
        self as u32
    }
}

/// Configuration for a suffix array build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixArrayConfig {
    #[serde(default = "default_max_input_size")]
    pub max_input_size: usize,
    /// Whether the input is a tokenized (`u16` vocabulary id) sequence
    /// rather than raw bytes.
    #[serde(default)]
    pub tokenized: bool,
    /// Whether token ids index Unicode codepoints rather than the
    /// tokenizer's subword vocabulary. Only meaningful (and only recorded
    /// in the container metadata) when `tokenized` is set.
    #[serde(default)]
    pub use_codepoint: bool,
    /// Name of the vocabulary file the token ids were produced with
    /// (recorded in the container's metadata map, not interpreted here).
    #[serde(default)]
    pub vocab_filename: Option<String>,
}

fn default_max_input_size() -> usize {
    MAX_INPUT_SIZE
}

impl Default for SuffixArrayConfig {
    fn default() -> Self {
        Self {
            max_input_size: default_max_input_size(),
            tokenized: false,
            use_codepoint: false,
            vocab_filename: None,
        }
    }
}

/// One document's span within a concatenated multi-document text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocBoundary {
    pub doc_id: u32,
    pub start: u64,
    pub end: u64,
}
