use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(version, long_version = crate::version::long_version(), about = "Clipboard history menu")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// History file path (defaults to ~/.multiclip.json)
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Number of entries to keep
    #[arg(short = 'n', long)]
    pub capacity: Option<usize>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
