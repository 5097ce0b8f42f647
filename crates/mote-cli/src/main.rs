//! Mote CLI - Command-line interface for the Mote logo particle effect

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{bake, preview, simulate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mote")]
#[command(about = "Logo particle field: offline texture bake and headless previews", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file to use instead of the layered lookup
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a logo image into colour, scale and position textures
    Bake {
        /// Source logo image
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory receiving the textures
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the particle field headless and print a JSON summary
    Simulate {
        /// Number of frames to run
        #[arg(long, default_value = "600")]
        frames: u32,

        /// Fixed frame delta in seconds
        #[arg(long, default_value = "0.016666667")]
        dt: f64,

        /// Pointer position in [-1, 1] (comma-separated x,y)
        #[arg(long, value_parser = parse_vec2)]
        pointer: Option<[f32; 2]>,

        /// Scroll progress in [0, 1]
        #[arg(long, default_value = "0.0")]
        scroll: f32,

        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render one frame of the field to a PNG point splat
    Preview {
        /// Output image path
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,

        /// Animation time to render, in seconds
        #[arg(long, default_value = "0.0")]
        time: f64,

        /// Image side in pixels
        #[arg(long, default_value = "512")]
        size: u32,

        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_vec2(s: &str) -> Result<[f32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok([x, y])
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Bake {
            input,
            output,
            seed,
        } => {
            if let Some(input) = input {
                config.bake.input = input;
            }
            if let Some(output) = output {
                config.bake.output_dir = output;
            }
            config.seed = seed.unwrap_or(config.seed);
            bake::run(&config)
        }
        Commands::Simulate {
            frames,
            dt,
            pointer,
            scroll,
            seed,
        } => {
            config.seed = seed.unwrap_or(config.seed);
            simulate::run(
                &config,
                simulate::SimulateArgs {
                    frames,
                    dt,
                    pointer: pointer.unwrap_or([0.0, 0.0]),
                    scroll,
                },
            )
        }
        Commands::Preview {
            output,
            time,
            size,
            seed,
        } => {
            config.seed = seed.unwrap_or(config.seed);
            preview::run(&config, &output, time, size)
        }
    }
}
