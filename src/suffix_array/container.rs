//! Safetensors-style container for a built suffix array: a small JSON
//! header (tensor name, dtype, shape, byte offsets, plus a string metadata
//! map) followed by the raw tensor bytes. This crate does not depend on a
//! third-party safetensors implementation — the format here is a
//! single-tensor special case simple enough to write and parse directly,
//! and the container is an external interface this crate produces, not a
//! library this crate wraps.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const TENSOR_NAME: &str = "suffix_array";
const DTYPE: &str = "U8";

#[derive(Debug, Serialize, Deserialize)]
struct TensorInfo {
    dtype: String,
    shape: Vec<usize>,
    data_offsets: [u64; 2],
}

/// Everything the container needs to reproduce a suffix array build:
/// the zstd-compressed little-endian `u32` suffix array, plus descriptive
/// metadata recorded alongside it.
pub struct SuffixArrayContainer {
    pub metadata: BTreeMap<String, String>,
    pub suffix_array: Vec<u32>,
}

/// Serialize `suffix_array` (as little-endian `u32`s) and zstd-compress it,
/// then write a safetensors-style container: an 8-byte little-endian
/// header length, the JSON header, then the compressed payload bytes.
pub fn write_container<W: Write>(
    writer: &mut W,
    suffix_array: &[u32],
    mut metadata: BTreeMap<String, String>,
) -> Result<()> {
    let mut raw = Vec::with_capacity(suffix_array.len() * 4);
    for &v in suffix_array {
        raw.extend_from_slice(&v.to_le_bytes());
    }

    let compressed = zstd::stream::encode_all(&raw[..], 0).map_err(|e| Error::DecodeError {
        what: "suffix array payload",
        reason: e.to_string(),
    })?;

    metadata.insert("compression".to_string(), "zstd".to_string());
    metadata.insert(
        "element_count".to_string(),
        suffix_array.len().to_string(),
    );

    let mut header = serde_json::Map::new();
    header.insert(
        "__metadata__".to_string(),
        serde_json::to_value(&metadata).unwrap(),
    );
    header.insert(
        TENSOR_NAME.to_string(),
        serde_json::to_value(TensorInfo {
            dtype: DTYPE.to_string(),
            shape: vec![compressed.len()],
            data_offsets: [0, compressed.len() as u64],
        })
        .unwrap(),
    );

    let header_bytes = serde_json::to_vec(&header).map_err(|e| Error::DecodeError {
        what: "container header",
        reason: e.to_string(),
    })?;

    writer
        .write_all(&(header_bytes.len() as u64).to_le_bytes())
        .and_then(|_| writer.write_all(&header_bytes))
        .and_then(|_| writer.write_all(&compressed))
        .map_err(|e| Error::DecodeError {
            what: "container write",
            reason: e.to_string(),
        })?;

    Ok(())
}

/// Parse a container written by [`write_container`].
pub fn read_container<R: Read>(reader: &mut R) -> Result<SuffixArrayContainer> {
    let mut len_buf = [0u8; 8];
    read_exact_mapped(reader, &mut len_buf, "header length")?;
    let header_len = u64::from_le_bytes(len_buf) as usize;

    let mut header_buf = vec![0u8; header_len];
    read_exact_mapped(reader, &mut header_buf, "header body")?;

    let header: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(&header_buf).map_err(|e| Error::DecodeError {
            what: "container header JSON",
            reason: e.to_string(),
        })?;

    let metadata: BTreeMap<String, String> = header
        .get("__metadata__")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    let tensor_info: TensorInfo = header
        .get(TENSOR_NAME)
        .ok_or_else(|| Error::DecodeError {
            what: "container tensor entry",
            reason: format!("missing \"{TENSOR_NAME}\" tensor"),
        })
        .and_then(|v| {
            serde_json::from_value(v.clone()).map_err(|e| Error::DecodeError {
                what: "tensor info",
                reason: e.to_string(),
            })
        })?;

    let payload_len = (tensor_info.data_offsets[1] - tensor_info.data_offsets[0]) as usize;
    let mut compressed = vec![0u8; payload_len];
    read_exact_mapped(reader, &mut compressed, "tensor payload")?;

    let raw = zstd::stream::decode_all(&compressed[..]).map_err(|e| Error::DecodeError {
        what: "suffix array payload",
        reason: e.to_string(),
    })?;

    if raw.len() % 4 != 0 {
        return Err(Error::DecodeError {
            what: "suffix array payload",
            reason: format!("decompressed length {} is not a multiple of 4", raw.len()),
        });
    }

    let suffix_array = raw
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok(SuffixArrayContainer {
        metadata,
        suffix_array,
    })
}

fn read_exact_mapped<R: Read>(reader: &mut R, buf: &mut [u8], what: &'static str) -> Result<()> {
    reader.read_exact(buf).map_err(|e: io::Error| Error::DecodeError {
        what,
        reason: e.to_string(),
    })
}
