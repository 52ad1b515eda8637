use anyhow::Result;

use crate::apis::analysis::AnalysisReport;
use crate::app::ports::{AnalysisPort, RecordSourcePort};
use crate::app::validate_use_case::ValidateUseCase;
use crate::domain::ParseResult;

/// Use case for validating a dataset and handing the resulting record
/// collection to the remote aggregation service.
pub struct AnalyzeUseCase {
    validate: ValidateUseCase,
    analysis: Box<dyn AnalysisPort>,
}

impl AnalyzeUseCase {
    pub fn new(source: Box<dyn RecordSourcePort>, analysis: Box<dyn AnalysisPort>) -> Self {
        Self {
            validate: ValidateUseCase::new(source),
            analysis,
        }
    }

    /// Validate, then analyze. Row-level validation errors do not block the
    /// analysis; the caller receives both the parse outcome and the report.
    pub async fn run(&self) -> Result<(ParseResult, AnalysisReport)> {
        let parsed = self.validate.run().await?;

        if parsed.records.is_empty() {
            anyhow::bail!("no valid records to analyze");
        }

        let report = self
            .analysis
            .analyze(&parsed.records)
            .await
            .map_err(|e| anyhow::anyhow!("analysis request failed: {}", e))?;

        Ok((parsed, report))
    }
}
