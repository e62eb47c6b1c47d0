//! Command line interface

use app_core::SortMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(name = "icon_gallery", version, about = "Browse, search and serve a library of SVG icons")]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "ICON_GALLERY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Print the gallery, grouped by category
    Browse(BrowseArgs),
    /// Print one icon with its SVG source
    Show(IconArgs),
    /// Copy an icon's SVG markup to the clipboard
    Copy(IconArgs),
    /// Save an icon as <name>.svg
    Download(DownloadArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Icon store root
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub bind: Option<String>,
}

/// Where gallery data comes from
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Read from a running gallery server
    #[arg(long, conflicts_with = "root")]
    pub server: Option<String>,

    /// Read the icon store directly
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only this category ("all" for every category)
    #[arg(long)]
    pub category: Option<String>,

    /// Search text
    #[arg(long, short)]
    pub query: Option<String>,

    /// Name ordering: none, asc or desc
    #[arg(long, default_value_t = SortMode::None)]
    pub sort: SortMode,
}

#[derive(Debug, Args)]
pub struct IconArgs {
    /// Icon as <category>/<name>
    pub icon: IconRef,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub icon: IconArgs,

    /// Directory to save into
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// An icon named on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRef {
    pub category: String,
    pub name: String,
}

impl FromStr for IconRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, name) = s
            .split_once('/')
            .ok_or_else(|| format!("expected <category>/<name>, got {:?}", s))?;
        let name = name.strip_suffix(app_fs::SVG_SUFFIX).unwrap_or(name);

        if !app_fs::is_safe_component(category) || !app_fs::is_safe_component(name) {
            return Err(format!("invalid icon reference {:?}", s));
        }

        Ok(Self {
            category: category.to_string(),
            name: name.to_string(),
        })
    }
}
