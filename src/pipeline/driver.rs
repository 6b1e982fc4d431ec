//! Fans document processing out across a thread pool and glues the three
//! cores to compressed-JSONL I/O.
//!
//! The thread pool is sized and built once from `available_parallelism()`
//! rather than spawning per-file. Ordering within a file is preserved by
//! mapping into a `Vec` indexed by position and reassembling sequentially,
//! rather than threading an ordering key through the parallel closures
//! themselves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::minhash::{bucketize, compute_signature, DedupStore};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::document::{extract_text, set_field};
use crate::pipeline::io::{decode_buckets, encode_buckets, read_jsonl, JsonlWriter};
use crate::suffix_array::{write_container, SuffixArrayBuilder};
use crate::textprep::prepare_ngrams;

#[derive(Debug, Default, Clone, Copy)]
pub struct MinhashStats {
    pub documents_processed: usize,
    pub documents_failed: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DedupStats {
    pub documents_processed: usize,
    pub duplicates_found: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BuildStats {
    pub documents_indexed: usize,
    pub documents_excluded: usize,
    pub suffix_array_len: usize,
}

pub struct PipelineDriver {
    pool: rayon::ThreadPool,
    config: PipelineConfig,
}

impl PipelineDriver {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.effective_worker_count())
            .build()
            .context("building worker thread pool")?;
        Ok(Self { pool, config })
    }

    /// Annotate every document in `inputs` with its `minhashes` (base64
    /// LSH bucket signatures), writing one corresponding file per input
    /// into `output_dir`. When `inline_store` is given, each document is
    /// also observed against it immediately and gets a `duplicate` field
    /// (the `--dedup-inline` fast path, skipping a separate `dedup` pass).
    /// When `strip_text` is set, the configured text field is dropped from
    /// the output record once its signature has been computed, so callers
    /// who only need the buckets downstream aren't stuck shipping the raw
    /// text around too.
    pub fn run_minhash(
        &self,
        inputs: &[PathBuf],
        output_dir: &Path,
        inline_store: Option<&Arc<DedupStore>>,
        strip_text: bool,
    ) -> Result<MinhashStats> {
        let mut stats = MinhashStats::default();

        for input in inputs {
            let span = tracing::info_span!("minhash_file", path = %input.display());
            let _enter = span.enter();

            let records = read_jsonl(input)?;
            let text_key = self.config.text_key.clone();
            let minhash_config = self.config.minhash;

            let results: Vec<_> = self.pool.install(|| {
                records
                    .into_par_iter()
                    .map(|mut record| {
                        let buckets = extract_text(&record, &text_key).and_then(|text| {
                            let ngrams = prepare_ngrams(
                                text,
                                minhash_config.ngram,
                                minhash_config.normalize,
                            )?;
                            Ok(bucketize(&compute_signature(&ngrams, &minhash_config)))
                        });
                        match buckets {
                            Ok(buckets) => {
                                set_field(
                                    &mut record,
                                    "minhashes",
                                    serde_json::to_value(encode_buckets(&buckets)).unwrap(),
                                );
                                if strip_text {
                                    if let Some(obj) = record.as_object_mut() {
                                        obj.remove(&text_key);
                                    }
                                }
                                Ok((record, buckets))
                            }
                            Err(e) => Err(e),
                        }
                    })
                    .collect()
            });

            let out_path = output_path_for(output_dir, input);
            let mut writer = JsonlWriter::create(&out_path)?;
            for result in results {
                match result {
                    Ok((mut record, buckets)) => {
                        if let Some(store) = inline_store {
                            let is_duplicate = store.observe_all(&buckets)?;
                            set_field(&mut record, "duplicate", serde_json::Value::Bool(is_duplicate));
                        }
                        writer.write_record(&record)?;
                        stats.documents_processed += 1;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping document");
                        stats.documents_failed += 1;
                    }
                }
            }
            writer.finish()?;
        }

        tracing::info!(
            processed = stats.documents_processed,
            failed = stats.documents_failed,
            "minhash pass complete"
        );
        Ok(stats)
    }

    /// Consume MinHash-annotated JSONL (as produced by [`Self::run_minhash`])
    /// and mark each document `duplicate: true/false` against a shared
    /// [`DedupStore`].
    pub fn run_dedup(
        &self,
        inputs: &[PathBuf],
        output_dir: &Path,
        store: Arc<DedupStore>,
    ) -> Result<DedupStats> {
        let mut stats = DedupStats::default();

        // Band-collision observation has a genuine ordering dependency
        // (first-to-linearize wins) across the whole run, so documents are
        // observed in file order; only the read/decode/write I/O for each
        // file is what benefits from parallelism here.
        for input in inputs {
            let span = tracing::info_span!("dedup_file", path = %input.display());
            let _enter = span.enter();

            let records = read_jsonl(input)?;
            let mut writer = JsonlWriter::create(&output_path_for(output_dir, input))?;

            for mut record in records {
                let buckets_field = record
                    .get("minhashes")
                    .and_then(|v| v.as_array())
                    .context("document missing minhashes; run the minhash subcommand first")?;

                let encoded: Vec<String> = buckets_field
                    .iter()
                    .map(|v| v.as_str().unwrap_or_default().to_string())
                    .collect();
                let decoded = decode_buckets(&encoded, self.config.minhash.rows_per_band)?;

                let buckets: Vec<crate::minhash::BucketSignature> = decoded
                    .into_iter()
                    .enumerate()
                    .map(|(band, bytes)| crate::minhash::BucketSignature {
                        band: band as u8,
                        bytes,
                    })
                    .collect();

                let is_duplicate = store.observe_all(&buckets)?;
                set_field(&mut record, "duplicate", serde_json::Value::Bool(is_duplicate));

                if is_duplicate {
                    stats.duplicates_found += 1;
                }
                stats.documents_processed += 1;
                writer.write_record(&record)?;
            }
            writer.finish()?;
        }

        tracing::info!(
            processed = stats.documents_processed,
            duplicates = stats.duplicates_found,
            "dedup pass complete"
        );
        Ok(stats)
    }

    /// Build one suffix array over every document's text across `inputs`
    /// and write it as a safetensors-style container to `output_path`.
    pub fn run_build(
        &self,
        inputs: &[PathBuf],
        output_path: &Path,
        vocab_filename: Option<&str>,
    ) -> Result<BuildStats> {
        let tokenized = self.config.suffix_array.tokenized;
        let text_key = self.config.text_key.clone();

        let mut metadata = BTreeMap::new();
        metadata.insert("tokenized".to_string(), tokenized.to_string());
        if tokenized {
            metadata.insert(
                "use_codepoint".to_string(),
                self.config.suffix_array.use_codepoint.to_string(),
            );
        }
        if let Some(vocab) = vocab_filename {
            metadata.insert("vocab_filename".to_string(), vocab.to_string());
        }

        let mut stats = BuildStats::default();

        if tokenized {
            let mut builder =
                SuffixArrayBuilder::<u16>::new_tokens(self.config.suffix_array.max_input_size);
            for input in inputs {
                metadata.insert("input_filename".to_string(), input.display().to_string());
                let records = read_jsonl(input)?;
                for (doc_id, record) in records.into_iter().enumerate() {
                    let Some(tokens) = record.get("tokens").and_then(|v| v.as_array()) else {
                        stats.documents_excluded += 1;
                        continue;
                    };
                    let tokens: Vec<u16> = tokens
                        .iter()
                        .filter_map(|v| v.as_u64())
                        .map(|v| v as u16)
                        .collect();
                    builder.add_document(doc_id as u32, &tokens)?;
                    stats.documents_indexed += 1;
                }
            }
            let built = builder.build();
            stats.documents_excluded += built.excluded_count;
            stats.suffix_array_len = built.suffix_array.len();
            let mut out = std::fs::File::create(output_path)
                .with_context(|| format!("creating {}", output_path.display()))?;
            write_container(&mut out, &built.suffix_array, metadata)?;
        } else {
            let mut builder =
                SuffixArrayBuilder::<u8>::new_bytes(self.config.suffix_array.max_input_size);
            for input in inputs {
                metadata.insert("input_filename".to_string(), input.display().to_string());
                let records = read_jsonl(input)?;
                for (doc_id, record) in records.into_iter().enumerate() {
                    let Ok(text) = extract_text(&record, &text_key) else {
                        stats.documents_excluded += 1;
                        continue;
                    };
                    builder.add_document(doc_id as u32, text.as_bytes())?;
                    stats.documents_indexed += 1;
                }
            }
            let built = builder.build();
            stats.documents_excluded += built.excluded_count;
            stats.suffix_array_len = built.suffix_array.len();
            let mut out = std::fs::File::create(output_path)
                .with_context(|| format!("creating {}", output_path.display()))?;
            write_container(&mut out, &built.suffix_array, metadata)?;
        }

        tracing::info!(
            indexed = stats.documents_indexed,
            excluded = stats.documents_excluded,
            "suffix array build complete"
        );
        Ok(stats)
    }
}

fn output_path_for(output_dir: &Path, input: &Path) -> PathBuf {
    let name = input.file_name().unwrap_or_default();
    output_dir.join(name)
}

/// Expand a file or directory argument into a list of matching JSONL
/// inputs (plain or zstd-framed). A single existing file is returned
/// as-is; a directory is scanned (non-recursively) for `*.jsonl`,
/// `*.jsonl.zst`, and `*.jsonl.zstd` files.
pub fn enumerate_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let glob = globset::GlobBuilder::new("*.jsonl*")
        .build()
        .context("building input glob")?
        .compile_matcher();

    let mut matches = Vec::new();
    for entry in std::fs::read_dir(path).with_context(|| format!("reading {}", path.display()))? {
        let entry = entry?;
        let file_path = entry.path();
        if file_path.is_file() {
            if let Some(name) = file_path.file_name().and_then(|n| n.to_str()) {
                if glob.is_match(name) {
                    matches.push(file_path);
                }
            }
        }
    }
    matches.sort();
    Ok(matches)
}
