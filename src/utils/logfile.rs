//! Append-only plaintext log file.
//!
//! Every `append` opens the file in append mode (creating it if needed) and
//! issues one write, so concurrent appends interleave at whole-entry
//! granularity on platforms with atomic O_APPEND writes. Nothing here ever
//! truncates the file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

use super::Console;

#[derive(Clone)]
pub struct LogFile {
    path: PathBuf,
    console: Arc<dyn Console>,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>, console: Arc<dyn Console>) -> Self {
        Self {
            path: path.into(),
            console,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `text` verbatim. Failures are reported on the console only.
    pub async fn append(&self, text: &str) {
        if let Err(e) = self.try_append(text).await {
            tracing::warn!(path = %self.path.display(), error = %e, "log append failed");
            self.console
                .print(&format!("Problem adding to {}", self.path.display()));
        }
    }

    async fn try_append(&self, text: &str) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await
    }

    pub async fn read(&self) -> std::io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}
