use async_trait::async_trait;

use crate::apis::analysis::{AnalysisClient, AnalysisReport};
use crate::app::ports::AnalysisPort;
use crate::domain::EmployeeExit;

/// Adapter exposing the HTTP analysis client behind the application port.
pub struct HttpAnalysisAdapter {
    client: AnalysisClient,
}

impl HttpAnalysisAdapter {
    pub fn new(client: AnalysisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnalysisPort for HttpAnalysisAdapter {
    async fn analyze(&self, records: &[EmployeeExit]) -> Result<AnalysisReport, String> {
        self.client
            .analyze(records)
            .await
            .map_err(|e| e.to_string())
    }
}
