use clap::{Parser, Subcommand};
use discat::query::SortKey;
use std::path::PathBuf;

/// "0.3.1" for releases, "0.3.1@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "discat", version = get_version())]
#[command(about = "Keep track of your optical discs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog file to use instead of the configured one
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Directory holding config.json
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List discs
    #[command(alias = "ls")]
    List {
        /// Sort by name, speed or size
        #[arg(short, long)]
        sort: Option<SortKey>,

        /// Only discs with more than this many MB free
        #[arg(long, value_name = "MB")]
        min_free: Option<f64>,

        /// Only discs with an open session
        #[arg(long)]
        open: bool,
    },

    /// Add a disc
    #[command(alias = "n")]
    Add {
        /// Name of the disc
        name: String,

        /// Capacity in MB
        #[arg(short, long, default_value_t = 700.0)]
        capacity: f64,

        /// Write speed multiplier
        #[arg(short, long, default_value_t = 52)]
        speed: u32,

        /// Used space in MB
        #[arg(short, long, default_value_t = 0.0)]
        used: f64,

        /// Number of write sessions
        #[arg(long, default_value_t = 1)]
        sessions: u32,

        /// Session label ("Finalized" closes the disc)
        #[arg(long, default_value = "Data")]
        session_type: String,
    },

    /// Show one disc
    #[command(alias = "v")]
    Show { id: u64 },

    /// Delete one or more discs
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },

    /// Finalize a disc (close its session)
    Finalize { id: u64 },

    /// Reopen a finalized disc
    Reopen { id: u64 },

    /// Add a few demo discs
    Seed,
}
