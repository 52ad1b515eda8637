use async_trait::async_trait;
use std::path::PathBuf;

use crate::app::ports::RecordSourcePort;
use crate::domain::RawRecord;
use crate::pipeline::ingestion::read_csv_file;

/// Record source backed by a CSV file on disk.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl RecordSourcePort for CsvFileSource {
    async fn fetch_rows(&self) -> Result<Vec<RawRecord>, String> {
        let path = self.path.clone();
        // The bulk file read is the pipeline's one blocking I/O point.
        let rows = tokio::task::spawn_blocking(move || read_csv_file(&path))
            .await
            .map_err(|e| e.to_string())?
            .map_err(|e| e.to_string())?;

        crate::observability::metrics::reader::file_read(rows.len());
        Ok(rows)
    }
}
