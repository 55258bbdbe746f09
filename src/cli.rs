//! Command-line interface for viewcast.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Viewcast - channel statistics to view-count prediction.
#[derive(Parser)]
#[command(name = "viewcast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VIEWCAST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Predict a view count from channel statistics
    Predict {
        /// Model artifact path
        #[arg(long, env = "VIEWCAST_MODEL", default_value = "best_model.json")]
        model: PathBuf,

        /// Model column list path
        #[arg(long, env = "VIEWCAST_COLUMNS", default_value = "model_columns.json")]
        columns: PathBuf,

        /// Subscriber count
        #[arg(long)]
        subscribers: String,

        /// Uploaded video count
        #[arg(long)]
        video_count: String,

        /// Account age in years
        #[arg(long)]
        account_age: String,

        /// Posts per year
        #[arg(long)]
        post_frequency: String,

        /// Total like count
        #[arg(long)]
        like_count: String,

        /// Total comment count
        #[arg(long)]
        comment_count: String,

        /// Channel name, matching one of the known channels
        #[arg(long)]
        channel: String,
    },

    /// List channels the model was trained on
    Channels {
        /// Model column list path
        #[arg(long, env = "VIEWCAST_COLUMNS", default_value = "model_columns.json")]
        columns: PathBuf,
    },

    /// Verify the startup artifacts load cleanly
    Check {
        /// Model artifact path
        #[arg(long, env = "VIEWCAST_MODEL", default_value = "best_model.json")]
        model: PathBuf,

        /// Model column list path
        #[arg(long, env = "VIEWCAST_COLUMNS", default_value = "model_columns.json")]
        columns: PathBuf,
    },

    /// Show version information
    Version,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
