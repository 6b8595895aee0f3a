use std::io;
use std::path::PathBuf;
use utils::url;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read layout cache {}: {source}", .path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Layout cache {} is corrupt: {source}", .path.display())]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not encode layout cache: {0}")]
    CacheEncode(#[source] serde_json::Error),
    #[error("Could not write cache to disk at {}: {source}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Could not parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Whether the error came from talking to the layout service rather than
    /// from the local cache.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Url(_) | Error::Http { .. } | Error::Status { .. } | Error::Parse { .. }
        )
    }
}
