//! `DedupStore`: a concurrent, monotone-growing set of observed bucket
//! signatures, sharded by LSH band to spread lock contention across bands
//! instead of serializing every insert through one global set.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashSet;

use super::bucket::BucketSignature;
use crate::error::{Error, Result};

/// Observing a bucket signature tells the caller whether it was the first
/// (the document is provisionally original for that band) or had already
/// been seen (the document is a candidate duplicate for that band).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    FirstSeen,
    AlreadySeen,
}

pub struct DedupStore {
    shards: Vec<DashSet<Vec<u8>>>,
    max_entries: Option<usize>,
    len: AtomicUsize,
}

impl DedupStore {
    /// Create a store with one shard per band. `max_entries` caps the total
    /// number of distinct bucket signatures ever inserted; `None` means
    /// unbounded (the default — the cap exists to make `HashStoreFull`
    /// reachable in tests, not because production runs are expected to hit
    /// it).
    pub fn new(bands: usize, max_entries: Option<usize>) -> Self {
        Self {
            shards: (0..bands).map(|_| DashSet::new()).collect(),
            max_entries,
            len: AtomicUsize::new(0),
        }
    }

    /// Record that `bucket` was seen. Insertion is atomic per-key within a
    /// shard's internal map, so the first of two concurrent `observe` calls
    /// for the same key to linearize is the one that gets `FirstSeen`; the
    /// other gets `AlreadySeen`, regardless of wall-clock call order.
    pub fn observe(&self, bucket: &BucketSignature) -> Result<Observation> {
        let shard = &self.shards[bucket.band as usize];

        if shard.contains(&bucket.bytes) {
            return Ok(Observation::AlreadySeen);
        }

        if let Some(cap) = self.max_entries {
            let current = self.len.load(Ordering::Relaxed);
            if current >= cap {
                return Err(Error::HashStoreFull {
                    entries: current,
                    cap,
                });
            }
        }

        let inserted = shard.insert(bucket.bytes.clone());
        if inserted {
            self.len.fetch_add(1, Ordering::Relaxed);
            Ok(Observation::FirstSeen)
        } else {
            Ok(Observation::AlreadySeen)
        }
    }

    /// Observe every bucket produced for a document's signature; the
    /// document is a duplicate if *any* band had already been seen
    /// (standard LSH "OR of bands" candidate rule).
    pub fn observe_all<'a, I: IntoIterator<Item = &'a BucketSignature>>(
        &self,
        buckets: I,
    ) -> Result<bool> {
        let mut any_duplicate = false;
        for bucket in buckets {
            if self.observe(bucket)? == Observation::AlreadySeen {
                any_duplicate = true;
            }
        }
        Ok(any_duplicate)
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
