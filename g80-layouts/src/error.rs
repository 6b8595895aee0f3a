use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Layouts(#[from] layout_search_client::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("Config file {} does not exist", .0.display())]
    ConfigMissing(PathBuf),
    #[error("Could not find an XDG location to put the cache file")]
    NoCacheDir,
}
