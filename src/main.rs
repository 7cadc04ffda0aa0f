//! Texel CLI - inspect and extract block-compressed DDS mipmaps.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use texel_dds::{DdsDecoder, DecodeOptions, DecodedTexture};

/// Texel - DDS mipmap inspection tool
#[derive(Parser)]
#[command(name = "texel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Reject headers whose size field is not 124
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show format, dimensions and mip layout of DDS files
    Info {
        /// DDS files to inspect
        #[arg(short, long, env = "TEXEL_INPUT", required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write each mip level's compressed blocks to its own file
    Extract {
        /// Input DDS file
        #[arg(short, long, env = "TEXEL_INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let decoder = DdsDecoder::with_options(DecodeOptions::new().strict_header(cli.strict));

    match cli.command {
        Commands::Info { input, json } => {
            cmd_info(&decoder, &input, json)?;
        }
        Commands::Extract { input, output } => {
            cmd_extract(&decoder, &input, &output)?;
        }
    }

    Ok(())
}

fn cmd_info(decoder: &DdsDecoder, inputs: &[PathBuf], json: bool) -> Result<()> {
    let start = Instant::now();
    let results: Vec<_> = inputs
        .par_iter()
        .map(|path| (path, decoder.open(path)))
        .collect();
    info!(files = inputs.len(), elapsed = ?start.elapsed(), "decoded");

    let mut failures = 0;

    if json {
        let mut entries = Vec::with_capacity(results.len());
        for (path, result) in &results {
            let entry = match result {
                Ok(texture) => {
                    let summary = serde_json::to_value(texture.summary())?;
                    serde_json::json!({
                        "path": path.display().to_string(),
                        "texture": summary,
                    })
                }
                Err(e) => {
                    failures += 1;
                    serde_json::json!({
                        "path": path.display().to_string(),
                        "error": e.to_string(),
                        "kind": format!("{:?}", e.kind()),
                    })
                }
            };
            entries.push(entry);
        }
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (path, result) in &results {
            match result {
                Ok(texture) => print_texture(path, texture),
                Err(e) => {
                    eprintln!("{}: {}", path.display(), e);
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} files failed to decode", failures, inputs.len());
    }

    Ok(())
}

fn print_texture(path: &Path, texture: &DecodedTexture) {
    println!(
        "{}: {} {}x{}, {} of {} declared levels, {} payload bytes",
        path.display(),
        texture.format(),
        texture.width(),
        texture.height(),
        texture.levels().len(),
        texture.declared_mip_count(),
        texture.payload().len()
    );

    for level in texture.levels() {
        println!(
            "  mip {:>2} {:>6}x{:<6} {:>12} {:>12}",
            level.index, level.width, level.height, level.offset, level.len
        );
    }
}

fn cmd_extract(decoder: &DdsDecoder, input: &PathBuf, output: &PathBuf) -> Result<()> {
    println!("Extracting mipmaps: {} -> {}", input.display(), output.display());

    let texture = decoder
        .open(input)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("texture");

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(texture.levels().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    for (level, data) in texture.iter() {
        let file_name = format!("{}.mip{}.{}", stem, level.index, texture.format().name());
        let output_path = output.join(file_name);
        fs::write(&output_path, data)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!(
        "Extracted {} levels in {:?}",
        texture.levels().len(),
        start.elapsed()
    );

    Ok(())
}
