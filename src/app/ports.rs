use async_trait::async_trait;

use crate::apis::analysis::AnalysisReport;
use crate::domain::{EmployeeExit, RawRecord};

/// Source of raw intake rows (CSV file, upload buffer, test fixture).
#[async_trait]
pub trait RecordSourcePort: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<RawRecord>, String>;
}

/// Remote aggregation service that consumes a validated record collection.
#[async_trait]
pub trait AnalysisPort: Send + Sync {
    async fn analyze(&self, records: &[EmployeeExit]) -> Result<AnalysisReport, String>;
}
