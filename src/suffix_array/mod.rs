//! Exact-substring deduplication via suffix arrays.
//!
//! - [`builder`]: prefix-doubling suffix array construction over byte or
//!   `u16`-token sequences, plus multi-document accumulation with sentinel
//!   separators.
//! - [`simd`]: the vectorized rank-update primitives the builder uses.
//! - [`naive`]: a slow reference oracle used only by tests.
//! - [`container`]: the safetensors-style on-disk output format.
//! - [`types`]: shared configuration and document-boundary types.

pub mod builder;
pub mod container;
pub mod naive;
pub mod simd;
pub mod types;

pub use builder::{build_suffix_array, BuiltSuffixArray, SuffixArrayBuilder};
pub use container::{read_container, write_container, SuffixArrayContainer};
pub use types::{DocBoundary, Symbol, SuffixArrayConfig, MAX_INPUT_SIZE};
