use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple task list manager with local persistence.
/// Storage defaults to ~/.tasklist or a directory passed via --data-dir.
#[derive(Parser)]
#[command(name = "tl", version, about = "Task list manager")]
pub struct Cli {
    /// Directory holding the stored tasks and theme preference.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Launches the UI when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
