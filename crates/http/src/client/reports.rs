//! Dashboard counters, analytics series and CSV exports
//!
//! Counters and series are computed by the server and handed back as-is.

use super::{ClientError, PendingRequest, SessionClient};
use crate::types::ExportKind;
use bytes::Bytes;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

impl SessionClient {
    pub async fn dashboard(&self) -> Result<Value, ClientError> {
        self.execute(PendingRequest::get("/api/dashboard/")).await
    }

    pub async fn analytics(&self) -> Result<Value, ClientError> {
        self.execute(PendingRequest::get("/api/analytics/")).await
    }

    /// Download a CSV export
    pub async fn export(&self, kind: ExportKind) -> Result<Bytes, ClientError> {
        self.execute_bytes(PendingRequest::get(kind.path())).await
    }

    /// Download a CSV export into `dir` under the export's default file name
    pub async fn export_to_file(
        &self,
        kind: ExportKind,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf, ClientError> {
        let csv = self.export(kind).await?;

        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(kind.file_name());
        tokio::fs::write(&path, &csv).await?;

        info!(path = %path.display(), bytes = csv.len(), "Export saved");
        Ok(path)
    }
}
