use anyhow::Result;

use crate::app::ports::RecordSourcePort;
use crate::domain::ParseResult;
use crate::error::PipelineError;
use crate::pipeline::processing::validate::validate;

/// Use case for turning one raw intake source into a validated record set.
pub struct ValidateUseCase {
    source: Box<dyn RecordSourcePort>,
}

impl ValidateUseCase {
    pub fn new(source: Box<dyn RecordSourcePort>) -> Self {
        Self { source }
    }

    /// Fetch all rows from the source and run dataset validation.
    ///
    /// Row-level problems come back inside the [`ParseResult`]; only
    /// dataset-level fatals (empty input, missing required columns) and
    /// source I/O failures surface as errors here.
    pub async fn run(&self) -> Result<ParseResult> {
        let rows = self
            .source
            .fetch_rows()
            .await
            .map_err(|e| anyhow::anyhow!("failed to read records: {}", e))?;

        match validate(&rows) {
            Ok(result) => {
                crate::observability::metrics::validate::dataset_processed(
                    result.stats.total,
                    result.stats.valid,
                    result.stats.invalid,
                );
                Ok(result)
            }
            Err(e) => {
                let reason = match &e {
                    PipelineError::EmptyFile => "empty_file",
                    PipelineError::MissingColumns { .. } => "missing_columns",
                    _ => "other",
                };
                crate::observability::metrics::validate::dataset_rejected(reason);
                Err(e.into())
            }
        }
    }
}
