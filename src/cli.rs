use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::config::HuffpackConfig;
use crate::engine::{compress, compress_with_stats, decompress};
use crate::metrics::{MetricsCollector, RunSummary};
use crate::protocol::CodecError;
use crate::report::InspectReport;
use crate::utils::crc::ChecksumPair;
use crate::utils::io::{output_path, read_input, write_output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Compress,
    Decompress,
    Verify,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub checksums: Option<ChecksumPair>,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<FileOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub type JobResult = (PathBuf, Result<FileOutcome>);

/// Process every path independently, at most `max_parallel_jobs` at a time.
/// Results come back in the order the paths were given.
pub async fn run_batch(
    mode: Mode,
    paths: Vec<PathBuf>,
    config: Arc<HuffpackConfig>,
    metrics: Arc<MetricsCollector>,
) -> Vec<JobResult> {
    let semaphore = Arc::new(Semaphore::new(config.max_parallel_jobs));
    let mut jobs = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let config = Arc::clone(&config);
        let metrics = Arc::clone(&metrics);

        jobs.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let result = process_file(mode, &path, &config).await;
            match &result {
                Ok(outcome) => metrics.record_success(outcome.bytes_in, outcome.bytes_out),
                Err(e) => {
                    error!("{:?} failed for {}: {:#}", mode, path.display(), e);
                    metrics.record_failure();
                }
            }
            (index, path, result)
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = jobs.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => {
                error!("File job aborted: {}", e);
                metrics.record_failure();
            }
        }
    }

    results.sort_by_key(|(index, _, _)| *index);
    results.into_iter().map(|(_, path, result)| (path, result)).collect()
}

async fn process_file(mode: Mode, path: &Path, config: &HuffpackConfig) -> Result<FileOutcome> {
    let input = read_input(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;

    if mode != Mode::Decompress && input.len() > config.max_input_size {
        return Err(CodecError::InputTooLarge(input.len()))
            .with_context(|| format!("checking {}", path.display()));
    }

    let bytes_in = input.len() as u64;

    match mode {
        Mode::Compress => {
            let (artifact, stats) = tokio::task::spawn_blocking(move || compress_with_stats(&input))
                .await?
                .with_context(|| format!("compressing {}", path.display()))?;

            let target = output_path(path, &config.compressed_suffix, config.output_directory.as_deref());
            write_output(&target, &artifact)
                .await
                .with_context(|| format!("writing {}", target.display()))?;

            info!(
                "{} -> {} ({} symbols, ratio {:.3})",
                path.display(),
                target.display(),
                stats.distinct_symbols,
                stats.ratio()
            );

            Ok(FileOutcome {
                path: path.to_path_buf(),
                output: Some(target),
                bytes_in,
                bytes_out: artifact.len() as u64,
                checksums: None,
            })
        }
        Mode::Decompress => {
            let restored = tokio::task::spawn_blocking(move || decompress(&input))
                .await?
                .with_context(|| format!("decompressing {}", path.display()))?;

            let target = output_path(path, &config.decompressed_suffix, config.output_directory.as_deref());
            write_output(&target, &restored)
                .await
                .with_context(|| format!("writing {}", target.display()))?;

            info!("{} -> {} ({} bytes)", path.display(), target.display(), restored.len());

            Ok(FileOutcome {
                path: path.to_path_buf(),
                output: Some(target),
                bytes_in,
                bytes_out: restored.len() as u64,
                checksums: None,
            })
        }
        Mode::Verify => {
            let (artifact_len, checksums) = tokio::task::spawn_blocking(move || {
                let artifact = compress(&input)?;
                let restored = decompress(&artifact)?;
                Ok::<_, CodecError>((artifact.len(), ChecksumPair::compute(&input, &restored)))
            })
            .await?
            .with_context(|| format!("verifying {}", path.display()))?;

            if !checksums.matches() {
                warn!(
                    "Checksum mismatch for {}: {:08x} != {:08x}",
                    path.display(),
                    checksums.original,
                    checksums.restored
                );
                bail!("round trip mismatch for {}", path.display());
            }

            Ok(FileOutcome {
                path: path.to_path_buf(),
                output: None,
                bytes_in,
                bytes_out: artifact_len as u64,
                checksums: Some(checksums),
            })
        }
    }
}

/// Print per-file results and the run summary, then fail if any file failed
pub fn report_batch(mode: Mode, results: Vec<JobResult>, summary: RunSummary, json: bool) -> Result<()> {
    let failed = summary.files_failed;

    if json {
        let files: Vec<FileReport> = results
            .into_iter()
            .map(|(path, result)| match result {
                Ok(outcome) => FileReport { path, outcome: Some(outcome), error: None },
                Err(e) => FileReport { path, outcome: None, error: Some(format!("{:#}", e)) },
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "mode": mode,
                "files": files,
                "summary": summary,
            }))?
        );
    } else {
        for (path, result) in &results {
            match result {
                Ok(outcome) => match (&outcome.output, &outcome.checksums) {
                    (Some(output), _) => println!(
                        "✅ {} -> {} ({} -> {} bytes)",
                        path.display(),
                        output.display(),
                        outcome.bytes_in,
                        outcome.bytes_out
                    ),
                    (None, Some(checksums)) => println!(
                        "✅ {} verified (crc32 {:08x}, {} -> {} bytes)",
                        path.display(),
                        checksums.original,
                        outcome.bytes_in,
                        outcome.bytes_out
                    ),
                    (None, None) => println!("✅ {}", path.display()),
                },
                Err(e) => println!("❌ {}: {:#}", path.display(), e),
            }
        }

        println!();
        println!("📈 Summary");
        println!("==========");
        println!("Files: {} ok, {} failed", summary.files_ok, summary.files_failed);
        println!("Bytes: {} in, {} out (ratio {:.3})", summary.bytes_in, summary.bytes_out, summary.overall_ratio);
        println!("Elapsed: {} ms", summary.elapsed_ms);
    }

    if failed > 0 {
        bail!("{} file(s) failed", failed);
    }
    Ok(())
}

pub async fn run_inspect(path: &Path, json: bool) -> Result<()> {
    let input = read_input(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;

    let report = tokio::task::spawn_blocking(move || InspectReport::analyze(&input))
        .await?
        .with_context(|| format!("analyzing {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
