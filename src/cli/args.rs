//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::OutputFormat;

/// Generate covers and videos through the cover generation site
#[derive(Parser, Debug)]
#[command(name = "cover-studio")]
#[command(version, about = "Generate covers and videos from the terminal", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// How to print the generated cover
    #[arg(long, short, global = true, default_value = "json")]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an image from a description
    TextToImage {
        /// What the cover should show
        description: String,
        /// Optional JPG/PNG reference image
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Generate a video from a reference image and video
    ImageToVideo {
        /// JPG/PNG reference image
        #[arg(long)]
        image: PathBuf,
        /// MP4/WebM reference video
        #[arg(long)]
        video: PathBuf,
    },
    /// Submit a video for processing
    VideoHandling {
        /// MP4/WebM source video
        #[arg(long)]
        video: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
