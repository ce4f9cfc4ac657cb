use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Response};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::error::{LoaderError, LoaderResult};
use crate::core::settings::LoaderSettings;

const PART_SUFFIX: &str = ".part";

type SlotTable = Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>;

/// Streaming artifact downloader.
///
/// Bytes go straight from the response stream to disk, chunk by chunk, so an
/// artifact is never held in memory. Concurrent downloads to the same
/// destination through one downloader are serialized.
pub struct ArtifactDownloader {
    client: Client,
    /// Longest allowed gap between two body chunks.
    idle_timeout: Duration,
    in_flight: SlotTable,
}

impl ArtifactDownloader {
    pub fn new(client: Client, settings: &LoaderSettings) -> Self {
        Self {
            client,
            idle_timeout: settings.download_idle_timeout(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Download `url` to `dest`.
    ///
    /// Parent directories are created as needed (idempotent). The body is
    /// written to `<dest>.part` and renamed onto `dest` once fully flushed; on
    /// any failure the `.part` file is removed and `dest` is left untouched.
    /// Waiting for the response headers counts against the idle timeout.
    /// No retry and no checksum verification.
    pub async fn download(&self, url: &str, dest: &Path) -> LoaderResult<()> {
        let slot = self.enter(dest);
        let _permit = slot.lock().await;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LoaderError::io(parent, e))?;
        }

        info!("Downloading {} -> {:?}", url, dest);
        let response = tokio::time::timeout(self.idle_timeout, self.client.get(url).send())
            .await
            .map_err(|_| self.stalled(url))??;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let part = part_path(dest)?;
        match self.write_and_commit(response, url, &part, dest).await {
            Ok(written) => {
                debug!("Downloaded {} bytes: {} -> {:?}", written, url, dest);
                Ok(())
            }
            Err(e) => {
                discard_partial(&part).await;
                Err(e)
            }
        }
    }

    async fn write_and_commit(
        &self,
        response: Response,
        url: &str,
        part: &Path,
        dest: &Path,
    ) -> LoaderResult<u64> {
        let written = self.stream_to_file(response, url, part).await?;
        tokio::fs::rename(part, dest)
            .await
            .map_err(|e| LoaderError::io(dest, e))?;
        Ok(written)
    }

    /// Pipe the response body into `path`. Whichever side fails first ends
    /// the transfer; a sink failure drops the network stream before returning.
    async fn stream_to_file(
        &self,
        response: Response,
        url: &str,
        path: &Path,
    ) -> LoaderResult<u64> {
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| LoaderError::io(path, e))?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        loop {
            let next = tokio::time::timeout(self.idle_timeout, stream.next())
                .await
                .map_err(|_| self.stalled(url))?;
            let Some(chunk) = next else { break };
            let chunk = chunk?;

            if let Err(source) = file.write_all(&chunk).await {
                drop(stream);
                debug!("Sink failed, cancelled source stream for {}", url);
                return Err(LoaderError::io(path, source));
            }
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| LoaderError::io(path, e))?;
        // Handle must be closed before the rename on Windows.
        drop(file);
        Ok(written)
    }

    /// No response headers, or no next chunk, within the idle timeout.
    fn stalled(&self, url: &str) -> LoaderError {
        LoaderError::DownloadStalled {
            url: url.to_string(),
            secs: self.idle_timeout.as_secs(),
        }
    }

    fn enter(&self, dest: &Path) -> InFlight<'_> {
        let mut table = self.in_flight.lock().unwrap_or_else(|p| p.into_inner());
        let slot = table
            .entry(dest.to_path_buf())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone();
        InFlight {
            table: &self.in_flight,
            path: dest.to_path_buf(),
            slot,
        }
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .len()
    }
}

/// Membership in the per-path lock table; evicts the entry when the last
/// caller interested in that path leaves.
struct InFlight<'a> {
    table: &'a SlotTable,
    path: PathBuf,
    slot: Arc<tokio::sync::Mutex<()>>,
}

impl InFlight<'_> {
    async fn lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.slot.lock().await
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut table = self.table.lock().unwrap_or_else(|p| p.into_inner());
        // One reference in the table, one here.
        if Arc::strong_count(&self.slot) == 2 {
            table.remove(&self.path);
        }
    }
}

fn part_path(dest: &Path) -> LoaderResult<PathBuf> {
    let file_name = dest.file_name().ok_or_else(|| {
        LoaderError::io(
            dest,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "download destination has no file name",
            ),
        )
    })?;
    let mut part_name = OsString::from(file_name);
    part_name.push(PART_SUFFIX);
    Ok(dest.with_file_name(part_name))
}

async fn discard_partial(part: &Path) {
    match tokio::fs::remove_file(part).await {
        Ok(()) => debug!("Removed partial download {:?}", part),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial download {:?}: {}", part, e),
    }
}
