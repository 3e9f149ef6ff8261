use clap::{Parser, ValueEnum};
use image_mirror::IoFailurePolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image-mirror")]
#[command(about = "Mirror the optimized images of an audit report into the current directory")]
#[command(version)]
pub struct Args {
    /// URL of the audit report
    #[arg(long)]
    pub url: Option<String>,

    /// URL of the website whose images are mirrored
    #[arg(long)]
    pub domain: Option<String>,

    /// JSON config file; command-line values take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Origin the optimized image links are relative to
    #[arg(long)]
    pub report_origin: Option<String>,

    /// What to do when a directory, download or write fails
    #[arg(long, value_enum)]
    pub on_io_error: Option<IoPolicyArg>,

    /// Timeout in seconds for each HTTP request
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Render the report through this WebDriver endpoint
    #[arg(long)]
    pub webdriver: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum IoPolicyArg {
    Abort,
    Skip,
}

impl From<IoPolicyArg> for IoFailurePolicy {
    fn from(arg: IoPolicyArg) -> Self {
        match arg {
            IoPolicyArg::Abort => IoFailurePolicy::Abort,
            IoPolicyArg::Skip => IoFailurePolicy::Skip,
        }
    }
}
