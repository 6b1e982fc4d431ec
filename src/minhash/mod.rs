//! Fuzzy deduplication: MinHash signatures over character shingles,
//! LSH band/bucket candidate generation, and a concurrent store of
//! observed buckets.

pub mod bucket;
pub mod hash;
pub mod signature;
pub mod store;

pub use bucket::{bucketize, BucketSignature};
pub use signature::{compute_signature, MinHashConfig, MinHashSignature};
pub use store::{DedupStore, Observation};
