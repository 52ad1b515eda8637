//! Metrics for the intake pipeline, using standard Prometheus naming
//! conventions via the `metrics` facade.
//!
//! Recording is always safe to call; the Prometheus recorder is only
//! installed when an exporter address is configured, so library consumers
//! and tests pay nothing.

use std::fmt;
use std::sync::Once;

use tracing::{info, warn};

/// Enum representing all metric names used in the system
/// This eliminates magic strings and provides compile-time safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Reader metrics
    ReaderFilesRead,
    ReaderRowsRead,

    // Validation metrics
    ValidateDatasetsProcessed,
    ValidateDatasetsRejected,
    ValidateRowsAccepted,
    ValidateRowsRejected,
    ValidateBatchSize,

    // Analysis service metrics
    AnalysisRequestsSuccess,
    AnalysisRequestsError,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ReaderFilesRead => "turnover_reader_files_read_total",
            MetricName::ReaderRowsRead => "turnover_reader_rows_read_total",
            MetricName::ValidateDatasetsProcessed => "turnover_validate_datasets_processed_total",
            MetricName::ValidateDatasetsRejected => "turnover_validate_datasets_rejected_total",
            MetricName::ValidateRowsAccepted => "turnover_validate_rows_accepted_total",
            MetricName::ValidateRowsRejected => "turnover_validate_rows_rejected_total",
            MetricName::ValidateBatchSize => "turnover_validate_batch_size",
            MetricName::AnalysisRequestsSuccess => "turnover_analysis_requests_success_total",
            MetricName::AnalysisRequestsError => "turnover_analysis_requests_error_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static INIT: Once = Once::new();

/// Install the Prometheus recorder. Idempotent; a no-op unless
/// `TURNOVER_METRICS_ADDR` names a listen address for the exporter.
pub fn init_metrics() {
    INIT.call_once(|| {
        let Ok(addr_str) = std::env::var("TURNOVER_METRICS_ADDR") else {
            return;
        };

        let Ok(addr) = addr_str.parse::<std::net::SocketAddr>() else {
            warn!("Invalid metrics addr '{}', exporter disabled", addr_str);
            return;
        };

        match metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
        {
            Ok(()) => info!("Prometheus exporter listening at http://{}/metrics", addr),
            Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
        }
    });
}

// ============================================================================
// Reader Metrics
// ============================================================================

pub mod reader {
    use super::MetricName;

    /// Record that an intake file was read, with its row count
    pub fn file_read(rows: usize) {
        ::metrics::counter!(MetricName::ReaderFilesRead.as_str()).increment(1);
        ::metrics::counter!(MetricName::ReaderRowsRead.as_str()).increment(rows as u64);
    }
}

// ============================================================================
// Validation Metrics
// ============================================================================

pub mod validate {
    use super::MetricName;

    /// Record the outcome of a full dataset validation
    pub fn dataset_processed(total: usize, valid: usize, invalid: usize) {
        ::metrics::counter!(MetricName::ValidateDatasetsProcessed.as_str()).increment(1);
        ::metrics::counter!(MetricName::ValidateRowsAccepted.as_str()).increment(valid as u64);
        ::metrics::counter!(MetricName::ValidateRowsRejected.as_str()).increment(invalid as u64);
        ::metrics::histogram!(MetricName::ValidateBatchSize.as_str()).record(total as f64);
    }

    /// Record a dataset-level rejection (empty file or missing columns)
    pub fn dataset_rejected(reason: &str) {
        ::metrics::counter!(
            MetricName::ValidateDatasetsRejected.as_str(),
            "reason" => reason.to_string()
        )
        .increment(1);
    }
}

// ============================================================================
// Analysis Service Metrics
// ============================================================================

pub mod analysis {
    use super::MetricName;

    pub fn request_success() {
        ::metrics::counter!(MetricName::AnalysisRequestsSuccess.as_str()).increment(1);
    }

    pub fn request_error() {
        ::metrics::counter!(MetricName::AnalysisRequestsError.as_str()).increment(1);
    }
}
