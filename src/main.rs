use anyhow::{Context, Result};
use citemap::{analyze_batch, analyze_paper, AnalysisConfig, Paper};
use clap::Parser;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Analyze in-text citations and reference lists of academic papers
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Paper JSON files, or directories searched for *.json files
    inputs: Vec<PathBuf>,
    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Worker threads for batch analysis (0 = one per core)
    #[arg(short, long)]
    workers: Option<usize>,
    /// Width of the context window around each citation
    #[arg(long)]
    context_width: Option<usize>,
    /// Emit the batch report even for a single paper
    #[arg(short, long)]
    batch: bool,
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Configure logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if args.inputs.is_empty() {
        anyhow::bail!("No input files provided. Pass at least one paper JSON file or directory.");
    }

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path).with_context(|| format!("Failed to load config {:?}", path))?,
        None => AnalysisConfig::default(),
    }
    .with_env_overrides();
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(width) = args.context_width {
        config.context_width = width;
    }
    debug!("Using config: {:?}", config);

    let mut papers = Vec::new();
    for input in &args.inputs {
        for path in json_files(input)? {
            let loaded = load_papers(&path)?;
            info!("Loaded {} papers from {:?}", loaded.len(), path);
            papers.extend(loaded);
        }
    }
    for paper in papers.iter_mut() {
        paper.ensure_citekey();
    }
    if papers.is_empty() {
        anyhow::bail!("No papers found in the given inputs.");
    }

    let output = if papers.len() == 1 && !args.batch {
        let result = analyze_paper(&papers[0], &config)?;
        for diagnostic in &result.diagnostics {
            warn!("{}", diagnostic);
        }
        serde_json::to_string_pretty(&result)?
    } else {
        let report = analyze_batch(&papers, &config)?;
        info!(
            "Processed {}/{} papers ({} failed)",
            report.summary.processed_papers, report.summary.total_papers, report.summary.failed_papers
        );
        serde_json::to_string_pretty(&report)?
    };

    // Write output to file or stdout
    if let Some(output_file) = &args.output {
        fs::write(output_file, output).with_context(|| format!("Failed to write output to {:?}", output_file))?;
        info!("Output written to {:?}", output_file);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn json_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        anyhow::bail!("Input {:?} does not exist", input);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", input))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// A file holds either one paper object or an array of them.
fn load_papers(path: &Path) -> Result<Vec<Paper>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {:?}", path))?;
    let papers = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|paper: Paper| vec![paper])
    }
    .with_context(|| format!("{:?} does not contain paper records", path))?;
    Ok(papers)
}
