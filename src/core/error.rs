use std::path::PathBuf;
use thiserror::Error;

/// Central error type for loader resolution.
/// Every module returns `Result<T, LoaderError>`.
#[derive(Debug, Error)]
pub enum LoaderError {
    // ── Registry ────────────────────────────────────────
    #[error("Loader \"{0}\" could not be found")]
    UnknownLoader(String),

    // ── Resolution ──────────────────────────────────────
    #[error("No loader version available for game version \"{0}\"")]
    InvalidVersion(String),

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("Download of {url} stalled: no data for {secs}s")]
    DownloadStalled { url: String, secs: u64 },

    #[error("Loader API unreachable: {0}")]
    LoaderApi(String),

    // ── Decoding ────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    // ── Settings ────────────────────────────────────────
    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience alias used throughout the crate.
pub type LoaderResult<T> = Result<T, LoaderError>;

impl LoaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoaderError::Io {
            path: path.into(),
            source,
        }
    }
}

// The external launcher receives errors as plain strings.
impl serde::Serialize for LoaderError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
