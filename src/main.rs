// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "framebooth")]
#[command(about = "Webcam photo booth with frame overlays")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Capture a photo, composite it with the frame overlay, and save it
    Capture {
        /// Facing preference for camera selection: front or rear
        #[arg(short, long)]
        facing: Option<String>,

        /// Overlay image to composite over the photo
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Output directory (default: ~/Pictures/Framebooth)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format: jpeg or png
        #[arg(long, default_value = "jpeg")]
        format: String,

        /// JPEG quality preset: low, medium, high, maximum
        #[arg(short, long)]
        quality: Option<String>,

        /// Hand the result to the system share handler instead of saving
        #[arg(long)]
        share: bool,

        /// Read the photo from an image file instead of a camera
        #[arg(long)]
        from_file: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=framebooth=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cli::list_cameras(),
        Commands::Capture {
            facing,
            overlay,
            output,
            format,
            quality,
            share,
            from_file,
        } => cli::run_booth(cli::BoothArgs {
            facing,
            overlay,
            output,
            format,
            quality,
            share,
            from_file,
        }),
    }
}
