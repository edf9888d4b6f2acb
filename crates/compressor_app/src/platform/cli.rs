use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "compressor")]
#[command(version, about = "Compress PDFs and images through the Compression API")]
#[command(
    long_about = "Interactive front end for the Compression API. Pick a PDF or an image, \
adjust the JPEG quality, and the compressed result is saved into the download directory."
)]
pub struct Cli {
    /// Settings file (RON). Defaults to ./compressor.ron when present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the Compression API, e.g. http://127.0.0.1:5000/api
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Directory compressed files are saved into
    #[arg(long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log debug details
    #[arg(short, long)]
    pub verbose: bool,
}
