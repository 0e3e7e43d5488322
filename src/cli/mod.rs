use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// `design-eval` - Score a design file against a reference design.
#[derive(Parser, Debug)]
#[command(name = "design-eval")]
#[command(version)]
#[command(about = "Compare a candidate design against a proven reference.", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract per-screen metrics from a design file
    Extract {
        /// Design file key
        file_key: String,

        /// Only analyze frames whose name starts with this prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Ignore cached results and fetch again
        #[arg(long)]
        no_cache: bool,

        /// Where to write the frames (default: paths.extracted_frames)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Aggregate extracted frames into a reference profile
    Profile {
        /// Frames file (default: paths.extracted_frames)
        #[arg(long)]
        frames: Option<PathBuf>,

        /// Where to write the profile (default: paths.reference_profile)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Evaluate a candidate design against the reference profile
    Evaluate {
        /// Candidate design file key
        file_key: String,

        /// Reference profile (default: paths.reference_profile)
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Only analyze frames whose name starts with this prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Ignore cached results and fetch again
        #[arg(long)]
        no_cache: bool,

        /// Post the findings as comments on the candidate file
        #[arg(long)]
        post_comments: bool,
    },

    /// Inspect or clear the extraction cache
    Cache {
        #[command(subcommand)]
        cache_command: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// List cached entries and whether they are still fresh
    List,

    /// Remove one entry, or every entry when no key is given
    Clear {
        /// Cache key (file key, or `<file key>--<prefix>`)
        #[arg(long)]
        key: Option<String>,
    },
}
