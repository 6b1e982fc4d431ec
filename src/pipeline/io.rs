//! Compressed JSONL I/O and base64 framing for bucket signatures.
//!
//! A `.zst`/`.zstd` input or output path gets a single zstd frame wrapped
//! around a buffered reader/writer; any other extension is read/written
//! as plain text. One JSON object per line, the usual line-delimited
//! document format for corpus-scale JSONL tooling.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::minhash::BucketSignature;

fn is_zstd_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("zst") | Some("zstd")
    )
}

/// Open `path` for line-by-line reading, transparently decompressing zstd
/// frames when the extension calls for it.
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    if is_zstd_path(path) {
        let decoder = zstd::stream::Decoder::new(file)
            .with_context(|| format!("opening zstd stream {}", path.display()))?;
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// A JSONL writer that zstd-frames its output when `path`'s extension
/// calls for it. Must be `finish()`ed (or dropped only after calling it)
/// so the zstd frame is properly closed.
pub enum JsonlWriter {
    Plain(BufWriter<File>),
    Zstd(zstd::stream::Encoder<'static, BufWriter<File>>),
}

impl JsonlWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        if is_zstd_path(path) {
            let encoder = zstd::stream::Encoder::new(BufWriter::new(file), 0)
                .with_context(|| format!("creating zstd stream {}", path.display()))?;
            Ok(JsonlWriter::Zstd(encoder))
        } else {
            Ok(JsonlWriter::Plain(BufWriter::new(file)))
        }
    }

    pub fn write_record(&mut self, value: &serde_json::Value) -> Result<()> {
        let line = serde_json::to_string(value)?;
        match self {
            JsonlWriter::Plain(w) => {
                w.write_all(line.as_bytes())?;
                w.write_all(b"\n")?;
            }
            JsonlWriter::Zstd(w) => {
                w.write_all(line.as_bytes())?;
                w.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        match self {
            JsonlWriter::Plain(mut w) => {
                w.flush()?;
                Ok(())
            }
            JsonlWriter::Zstd(w) => {
                w.finish()?;
                Ok(())
            }
        }
    }
}

/// Read every JSONL record from `path` into memory, preserving line order.
/// Blank lines are skipped.
pub fn read_jsonl(path: &Path) -> Result<Vec<serde_json::Value>> {
    let reader = open_reader(path)?;
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line).with_context(|| "parsing JSONL record")?);
    }
    Ok(records)
}

/// Base64-encode each band's bucket bytes, padded (`base64::engine::general_purpose::STANDARD`).
/// Decoding accepts both padded and unpadded input.
pub fn encode_buckets(buckets: &[BucketSignature]) -> Vec<String> {
    buckets.iter().map(|b| BASE64.encode(&b.bytes)).collect()
}

/// Decode each band's base64 bucket bytes, rejecting any whose decoded
/// length doesn't match `1 + 2*rows_per_band` (one row-count byte plus a
/// 16-bit minimum hash per row) — a minhash file produced under a
/// different `rows_per_band`, or corrupted to the wrong length, is an
/// `Error::DecodeError` rather than a silently-malformed bucket key.
pub fn decode_buckets(encoded: &[String], rows_per_band: usize) -> Result<Vec<Vec<u8>>> {
    let expected_len = 1 + 2 * rows_per_band;
    encoded
        .iter()
        .map(|s| {
            let bytes = decode_base64_lenient(s)?;
            if bytes.len() != expected_len {
                return Err(crate::error::Error::DecodeError {
                    what: "bucket_signature",
                    reason: format!(
                        "expected {expected_len} bytes for rows_per_band={rows_per_band}, got {}",
                        bytes.len()
                    ),
                }
                .into());
            }
            Ok(bytes)
        })
        .collect()
}

fn decode_base64_lenient(s: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(s)
        .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(s))
        .with_context(|| "decoding base64 bucket signature")
}
