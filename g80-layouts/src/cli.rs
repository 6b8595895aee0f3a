use clap::Parser;
use std::path::PathBuf;

/// List keyboard layouts shared on the Glove80 layout library.
#[derive(Debug, Parser)]
#[command(name = "g80-layouts", version, about)]
pub struct Args {
    /// Comma separated list of tags to search for
    pub tags: Option<String>,

    /// Print debug statements
    #[arg(long)]
    pub debug: bool,

    /// How many layouts to show [default: 10]
    #[arg(long)]
    pub limit: Option<usize>,

    /// How many layouts to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Show layouts with the same title by the same creator
    #[arg(long)]
    pub redupe: bool,

    /// Skip layouts that fail to download instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Neither read nor write the layout cache
    #[arg(long)]
    pub no_cache: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    }
}
