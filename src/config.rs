use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://commons.wikimedia.org/w/api.php";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;
pub const DEFAULT_YEAR_CUTOFF: u32 = 1990;

/// Era and artist categories sampled when no `--source` is given.
pub const DEFAULT_SOURCES: &[&str] = &[
    "Renaissance_paintings",
    "18th-century_paintings",
    "19th-century_paintings",
    "20th-century_paintings",
    "Paintings_by_Rembrandt",
    "Paintings_by_Johannes_Vermeer",
    "Paintings_by_Vincent_van_Gogh",
    "Paintings_by_Claude_Monet",
];

#[derive(Parser, Debug)]
#[command(name = "inspiro")]
#[command(about = "Browse random public-domain paintings from Wikimedia Commons")]
pub struct Args {
    #[arg(long, env = "INSPIRO_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long = "source", help = "Commons category to sample from (repeatable)")]
    pub sources: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    #[arg(long, default_value_t = DEFAULT_YEAR_CUTOFF, help = "Only show paintings dated before this year")]
    pub year_cutoff: u32,

    #[arg(long, env = "INSPIRO_SAVE_DIR", default_value = ".")]
    pub save_dir: PathBuf,

    #[arg(long, help = "Allow the same image to be shown more than once")]
    pub allow_repeats: bool,

    #[arg(long, help = "Seed for reproducible selection")]
    pub seed: Option<u64>,

    #[arg(long, env = "INSPIRO_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, help = "Fetch one painting, print it as JSON and exit")]
    pub once: bool,

    #[arg(long, requires = "once", help = "With --once, also save the image")]
    pub save: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub sources: Vec<String>,
    pub max_attempts: u32,
    pub year_cutoff: u32,
    pub save_dir: PathBuf,
    pub allow_repeats: bool,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            year_cutoff: DEFAULT_YEAR_CUTOFF,
            save_dir: PathBuf::from("."),
            allow_repeats: false,
            seed: None,
            log_dir: None,
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        let defaults = Config::default();
        Self {
            endpoint: args.endpoint.clone(),
            sources: if args.sources.is_empty() {
                defaults.sources
            } else {
                args.sources.clone()
            },
            max_attempts: args.max_attempts,
            year_cutoff: args.year_cutoff,
            save_dir: args.save_dir.clone(),
            allow_repeats: args.allow_repeats,
            seed: args.seed,
            log_dir: args.log_dir.clone(),
        }
    }
}
