use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// Compress videos to 720p H.264 and hand results to the embedding page.
///
/// Each FILE is dropped onto the page in turn. Messages for the parent are
/// written to stdout (or `--output`) as JSON lines; status goes to stderr.
#[derive(Debug, Clone, Parser)]
#[command(name = "video_compressor", version, about)]
pub struct Cli {
    /// Files to drop, one per drop.
    pub files: Vec<PathBuf>,

    /// Page address; the first path segment picks the locale and the
    /// `componentId` query parameter tags outbound messages.
    #[arg(long, default_value = "http://localhost/en")]
    pub page_url: String,

    /// Locale override.
    #[arg(long)]
    pub locale: Option<String>,

    /// componentId override.
    #[arg(long)]
    pub component_id: Option<String>,

    /// RON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// ffmpeg executable.
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,

    /// Directory for compressed artifacts.
    #[arg(long)]
    pub artifact_dir: Option<PathBuf>,

    /// Directory holding `<locale>.json` message catalogs.
    #[arg(long)]
    pub messages_dir: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Write outbound messages here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Read `drop <path>...`, `cancel`, `reload` and `quit` from stdin.
    #[arg(long)]
    pub interactive: bool,

    /// Suppress the status display.
    #[arg(long)]
    pub quiet: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    pub verbose: bool,
}
