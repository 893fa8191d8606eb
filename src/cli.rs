use std::path::PathBuf;

use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Directory discovery and blind SSRF fan-out", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable detailed debug logging (global)
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging (global)
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Discover paths under a base URL; only 200 responses are reported
    Dir {
        /// Target domain (e.g. example.com) or base URL
        target: String,

        /// Newline-delimited list of path segments
        #[arg(short = 'w', long, default_value = "wordlist.txt")]
        wordlist: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Substitute each internal target into an SSRF endpoint and report every attempt
    Ssrf {
        /// Endpoint template containing {TARGET}, e.g. "https://victim/ssrf?url={TARGET}"
        #[arg(short = 'e', long)]
        endpoint: String,

        /// Newline-delimited list of internal hosts/IPs
        #[arg(short = 't', long)]
        targets: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Print the table for observations saved with --jsonl
    Show {
        /// JSONL file written by a previous run
        file: PathBuf,

        /// Sort rows by target
        #[arg(long, default_value_t = false)]
        sort: bool,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Worker count (default: 50 for dir, 10 for ssrf)
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Request timeout in seconds (default: 10)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Max body bytes sampled per response (default: 1024 for dir, 2048 for ssrf)
    #[arg(long)]
    pub body_cap: Option<usize>,

    /// JSON file with timeout_secs / concurrency / body_cap; flags win over it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sort rows by target before printing
    #[arg(long, default_value_t = false)]
    pub sort: bool,

    /// Also write observations as JSONL
    #[arg(long, value_name = "FILE")]
    pub jsonl: Option<PathBuf>,

    /// Also write observations as CSV
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
