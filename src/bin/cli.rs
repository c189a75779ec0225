// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! DingCAD headless viewer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dingcad::render::{HeadlessBackend, ModelSummary};
use dingcad::{scene_evaluator, LoadRenderCoordinator, MeshSynthesizer, ViewerConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "dingcad")]
#[command(about = "DingCAD viewer core - load scene scripts and synthesize render meshes", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./dingcad.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a scene through the headless render loop
    Load {
        /// Scene script
        file: PathBuf,

        /// Number of frames to drive
        #[arg(short, long, default_value = "1")]
        ticks: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration, or write it to a file
    Config {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Serialize)]
struct LoadReport<'a> {
    file: &'a Path,
    status: &'a str,
    frames: usize,
    model: ModelSummary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => ViewerConfig::from_file(path)?.with_env_overrides(),
        None => ViewerConfig::load()?,
    };

    match cli.command {
        Commands::Load { file, ticks, json } => load_command(&file, ticks, json, config),
        Commands::Config { output } => config_command(&config, output.as_deref()),
        Commands::Version => {
            println!("DingCAD v{}", dingcad::version());
            Ok(())
        }
    }
}

fn load_command(file: &Path, ticks: usize, json: bool, mut config: ViewerConfig) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read scene file: {:?}", file))?;

    if config.module_root.is_none() {
        config.module_root = file.parent().map(Path::to_path_buf);
    }

    let mut coordinator = LoadRenderCoordinator::new(MeshSynthesizer::new(config.shading()))
        .with_loader(scene_evaluator(&config));
    let mut backend = HeadlessBackend::new();

    let start = std::time::Instant::now();
    coordinator.install_scene(&source);
    coordinator.mark_window_ready();
    for _ in 0..ticks.max(1) {
        coordinator.tick(&mut backend);
    }
    let elapsed = start.elapsed();

    let status = coordinator.status();
    let failed = status.starts_with("Error:");
    let summary = coordinator.active_model().summary();

    if json {
        let report = LoadReport {
            file,
            status,
            frames: backend.frames(),
            model: summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if failed {
            eprintln!("{} {}", "Failed:".red(), status);
        } else {
            println!("{} {}", "Loaded:".green(), file.display());
        }
        println!("  Status:    {}", status);
        println!("  Frames:    {}", backend.frames());
        println!("  Vertices:  {}", summary.vertex_count);
        println!("  Triangles: {}", summary.triangle_count);
        if let Some(bounds) = &summary.bounds {
            let size = bounds.size();
            println!("  Size:      {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
        }
        println!("  Time:      {:.2?}", elapsed);
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn config_command(config: &ViewerConfig, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            config.save(path)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        None => print!("{}", toml::to_string_pretty(config).context("Failed to serialize config")?),
    }
    Ok(())
}
