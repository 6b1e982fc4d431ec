//! `corpussift` CLI: a thin argument-parsing and I/O-glob boundary around
//! the library's three dedup cores. `main.rs` owns `clap`/`anyhow`/
//! process-exit concerns; library modules stay free of CLI types.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use corpussift::editdistance;
use corpussift::minhash::DedupStore;
use corpussift::pipeline::{enumerate_inputs, PipelineConfig, PipelineDriver};

#[derive(Parser)]
#[command(name = "corpussift")]
#[command(about = "Corpus-scale fuzzy and exact text deduplication engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute MinHash/LSH bucket signatures for every document, writing
    /// a `minhashes` field into annotated JSONL.
    Minhash {
        /// Input file, or a directory of `*.jsonl`/`*.jsonl.zst` files.
        input: PathBuf,
        /// Directory to write annotated output files into.
        #[arg(long, short)]
        output: PathBuf,
        /// JSON field holding each document's text.
        #[arg(long, default_value = "text")]
        text_key: String,
        /// Number of LSH bands.
        #[arg(long, default_value_t = 20)]
        bands: usize,
        /// Rows (hash functions) per band.
        #[arg(long, default_value_t = 10)]
        rows: usize,
        /// Character-shingle window size.
        #[arg(long, default_value_t = 5)]
        ngram: usize,
        /// Also run DedupStore observation in the same pass and write
        /// `duplicate` directly, instead of requiring a separate `dedup`
        /// invocation.
        #[arg(long)]
        dedup_inline: bool,
        /// Drop the text field from the output record.
        #[arg(long)]
        strip_text: bool,
        /// Path to a JSON pipeline config file; CLI flags override it.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Consume `minhashes`-annotated JSONL and mark each document
    /// `duplicate` against a DedupStore.
    Dedup {
        input: PathBuf,
        #[arg(long, short)]
        output: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Build a suffix array over a corpus for exact-substring
    /// deduplication, writing a safetensors-style container.
    Build {
        input: PathBuf,
        #[arg(long, short)]
        output: PathBuf,
        /// JSON field holding each document's text (untokenized path).
        #[arg(long, default_value = "text")]
        text_key: String,
        /// Treat each document's `tokens` field (an array of u16 ids) as
        /// the tokenized path input instead of raw text.
        #[arg(long)]
        tokenized: bool,
        /// Vocabulary file path recorded in the container metadata
        /// (tokenized mode only).
        #[arg(long)]
        vocab: Option<String>,
        /// Record that token ids index Unicode codepoints rather than a
        /// subword vocabulary (tokenized mode only).
        #[arg(long)]
        use_codepoint: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Compare two strings with an edit-distance kernel. Ad hoc utility
    /// exposing `editdistance` directly, not part of the batch pipeline.
    Distance {
        a: String,
        b: String,
        #[arg(long, value_enum, default_value_t = Metric::Levenshtein)]
        metric: Metric,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Metric {
    Levenshtein,
    Damerau,
    Lcs,
    Hamming,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "corpussift failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Minhash {
            input,
            output,
            text_key,
            bands,
            rows,
            ngram,
            dedup_inline,
            strip_text,
            config,
        } => {
            let mut pipeline_config = load_config(config.as_deref())?;
            pipeline_config.text_key = text_key;
            pipeline_config.minhash.bands = bands;
            pipeline_config.minhash.rows_per_band = rows;
            pipeline_config.minhash.ngram = ngram;

            std::fs::create_dir_all(&output)
                .with_context(|| format!("creating output directory {}", output.display()))?;

            let inputs = enumerate_inputs(&input)?;
            let store = if dedup_inline {
                Some(Arc::new(DedupStore::new(
                    pipeline_config.minhash.bands,
                    pipeline_config.max_store_entries,
                )))
            } else {
                None
            };

            let driver = PipelineDriver::new(pipeline_config)?;
            let stats = driver.run_minhash(&inputs, &output, store.as_ref(), strip_text)?;
            tracing::info!(?stats, "minhash complete");
            println!(
                "processed {} documents ({} failed)",
                stats.documents_processed, stats.documents_failed
            );
            Ok(())
        }
        Commands::Dedup {
            input,
            output,
            config,
        } => {
            let pipeline_config = load_config(config.as_deref())?;
            std::fs::create_dir_all(&output)
                .with_context(|| format!("creating output directory {}", output.display()))?;

            let inputs = enumerate_inputs(&input)?;
            let store = Arc::new(DedupStore::new(
                pipeline_config.minhash.bands,
                pipeline_config.max_store_entries,
            ));

            let driver = PipelineDriver::new(pipeline_config)?;
            let stats = driver.run_dedup(&inputs, &output, store)?;
            println!(
                "processed {} documents, {} duplicates",
                stats.documents_processed, stats.duplicates_found
            );
            Ok(())
        }
        Commands::Build {
            input,
            output,
            text_key,
            tokenized,
            vocab,
            use_codepoint,
            config,
        } => {
            let mut pipeline_config = load_config(config.as_deref())?;
            pipeline_config.text_key = text_key;
            pipeline_config.suffix_array.tokenized = tokenized;
            pipeline_config.suffix_array.vocab_filename = vocab.clone();
            pipeline_config.suffix_array.use_codepoint = use_codepoint;

            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating output directory {}", parent.display()))?;
                }
            }

            let inputs = enumerate_inputs(&input)?;
            let driver = PipelineDriver::new(pipeline_config)?;
            let stats = driver.run_build(&inputs, &output, vocab.as_deref())?;
            println!(
                "indexed {} documents ({} excluded), suffix array length {}",
                stats.documents_indexed, stats.documents_excluded, stats.suffix_array_len
            );
            Ok(())
        }
        Commands::Distance { a, b, metric } => {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            match metric {
                Metric::Levenshtein => println!(
                    "distance={} similarity={:.4}",
                    editdistance::levenshtein(&a, &b),
                    editdistance::levenshtein_similarity(&a, &b)
                ),
                Metric::Damerau => println!(
                    "distance={} similarity={:.4}",
                    editdistance::damerau_levenshtein(&a, &b),
                    editdistance::damerau_similarity(&a, &b)
                ),
                Metric::Lcs => println!(
                    "lcs_length={} similarity={:.4}",
                    editdistance::lcs_length(&a, &b),
                    editdistance::lcs_similarity(&a, &b)
                ),
                Metric::Hamming => match editdistance::hamming(&a, &b) {
                    Ok(dist) => println!(
                        "distance={} similarity={:.4}",
                        dist,
                        editdistance::hamming_similarity(&a, &b).unwrap()
                    ),
                    Err(e) => println!("error: {e}"),
                },
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path),
        None => Ok(PipelineConfig::default()),
    }
}
