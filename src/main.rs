use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use muni_leads::error::util::ensure_directory;
use muni_leads::utils::logging::{create_main_progress_bar, finish_progress_bar, print_grouped_tables};
use muni_leads::{GroupedLeads, LeadsConfig, export_combined, process_upload};

/// Classify leads by municipality and region and export them grouped by
/// municipality.
#[derive(Parser, Debug)]
#[command(name = "muni-leads", version)]
#[command(about = "Group sales leads by Philippine municipality and region")]
struct Cli {
    /// Spreadsheets to process (xlsx, xlsm, xls, xlsb, ods, csv, parquet)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the exported CSV
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not print the per-municipality tables
    #[arg(short, long)]
    quiet: bool,
}

/// Export directory of every input, in input order
///
/// A single input exports straight into `output_dir`. Several inputs each get
/// a directory named after their file stem; inputs sharing a stem are told
/// apart by their 1-based position so no export overwrites another.
fn export_dirs(output_dir: &Path, inputs: &[PathBuf]) -> Vec<PathBuf> {
    if inputs.len() == 1 {
        return vec![output_dir.to_path_buf()];
    }

    let stems: Vec<String> = inputs
        .iter()
        .map(|input| {
            input
                .file_stem()
                .map_or_else(|| "upload".into(), |s| s.to_string_lossy().into_owned())
        })
        .collect();
    let mut stem_counts: FxHashMap<&str, usize> = FxHashMap::default();
    for stem in &stems {
        *stem_counts.entry(stem.as_str()).or_insert(0) += 1;
    }

    let mut taken: FxHashSet<String> = FxHashSet::default();
    stems
        .iter()
        .enumerate()
        .map(|(idx, stem)| {
            let base = if stem_counts[stem.as_str()] > 1 {
                format!("{stem}_{}", idx + 1)
            } else {
                stem.clone()
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while !taken.insert(name.clone()) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }
            output_dir.join(name)
        })
        .collect()
}

/// Process one upload and export its combined table
fn run_upload(
    input: &Path,
    dir: &Path,
    config: &LeadsConfig,
) -> muni_leads::Result<(GroupedLeads, PathBuf)> {
    let grouped = process_upload(input, config)?;
    let exported = export_combined(&grouped, dir, config)?;
    Ok((grouped, exported))
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LeadsConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => LeadsConfig::default(),
    };
    ensure_directory(&cli.output_dir).with_context(|| {
        format!("Failed to prepare output directory {}", cli.output_dir.display())
    })?;

    let start = Instant::now();
    let multiple = cli.inputs.len() > 1;
    let dirs = export_dirs(&cli.output_dir, &cli.inputs);
    let results: Vec<_> = if multiple {
        let pb = create_main_progress_bar(cli.inputs.len() as u64, Some("Processing uploads"));
        let results: Vec<_> = cli
            .inputs
            .par_iter()
            .zip(dirs.par_iter())
            .map(|(input, dir)| {
                let result = run_upload(input, dir, &config);
                pb.inc(1);
                result
            })
            .collect();
        finish_progress_bar(&pb, Some("Done"));
        results
    } else {
        cli.inputs
            .iter()
            .zip(&dirs)
            .map(|(input, dir)| run_upload(input, dir, &config))
            .collect()
    };

    let mut failures = 0;
    for (input, result) in cli.inputs.iter().zip(results) {
        match result {
            Ok((grouped, exported)) => {
                if multiple {
                    println!("== {} ==", input.display());
                }
                if !cli.quiet {
                    if let Err(e) = print_grouped_tables(&grouped) {
                        error!("Failed to render tables for {}: {e}", input.display());
                    }
                }
                println!("Combined data written to {}", exported.display());
            }
            Err(e) => {
                failures += 1;
                error!("{}: {e}", input.display());
                eprintln!("{}: {}", input.display(), e.user_message());
            }
        }
    }

    info!(
        "Processed {} uploads ({failures} failed) in {:?}",
        cli.inputs.len(),
        start.elapsed()
    );

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
