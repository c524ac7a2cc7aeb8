use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// photoseq – split, sequence-rename and collect experiment photos
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// No progress gauge, log lines only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Append every move/rename/copy to FILE as `op<TAB>from<TAB>to`
    #[arg(long, global = true, value_name = "FILE")]
    pub journal: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rename the images of one folder to `NNNN_<label>_<tag>`.
    Rename(RenameArgs),

    /// Split alternating top view / DEM shots into TOPVIEW/ and DEM/ and rename them.
    Split(SplitArgs),

    /// Process a whole experiment tree (<camera>/<role>/) and fill the DaVis folders.
    Experiment(ExperimentArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FolderArgs {
    /// Folder to process; a folder picker opens when omitted
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Extension of the images to pick up (case-sensitive, with dot)
    #[arg(long, value_name = "EXT", default_value = ".JPG")]
    pub ext: String,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    #[command(flatten)]
    pub folder: FolderArgs,

    /// Text placed between index and tag; asked for interactively when omitted
    #[arg(long)]
    pub label: Option<String>,

    /// Tag placed after the label (defaults to the parent folder's name)
    #[arg(long)]
    pub tag: Option<String>,

    /// Extension written on renamed files (defaults to --ext)
    #[arg(long, value_name = "EXT")]
    pub output_ext: Option<String>,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub folder: FolderArgs,

    /// Text placed between index and tag [default: min]
    #[arg(long)]
    pub label: Option<String>,

    /// Tag placed after the label (defaults to the parent folder's name)
    #[arg(long)]
    pub tag: Option<String>,

    /// Extension written on renamed files. Lower-case by default, as the
    /// lab's downstream tooling has always received them.
    #[arg(long, value_name = "EXT", default_value = ".jpg")]
    pub output_ext: String,
}

#[derive(Args, Debug)]
pub struct ExperimentArgs {
    #[command(flatten)]
    pub folder: FolderArgs,

    /// Comma-separated camera folders below the experiment root.
    #[arg(long, value_delimiter = ',', value_name = "CAMERAS")]
    pub cameras: Vec<String>,

    /// Comma-separated role folders below each camera folder.
    #[arg(long, value_delimiter = ',', value_name = "ROLES")]
    pub roles: Vec<String>,

    /// Comma-separated cameras copied into the DaVis folders.
    #[arg(long, value_delimiter = ',', value_name = "CAMERAS")]
    pub davis_cameras: Vec<String>,
}
