//! Client for the remote aggregation service.
//!
//! The service owns all statistical work (categorical distributions, monthly
//! trend series, 80/20 concentration ranking). This side only ships the
//! validated record collection and deserializes the report; no aggregation
//! happens client-side.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::AnalysisConfig;
use crate::domain::EmployeeExit;
use crate::error::{PipelineError, Result};

/// Categories the aggregation service can key its analyses on.
pub const ANALYSIS_CATEGORIES: &[&str] = &["area", "supervisor", "shift", "salary_bracket"];

/// One ranked pattern within a category: how many exits a value accounts
/// for and where it sits in the cumulative 80/20 ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPattern {
    pub category: String,
    pub value: String,
    pub exits: u64,
    pub share_pct: f64,
    pub cumulative_pct: f64,
    /// True while the cumulative share stays within the 80% concentration
    /// band — the "vital few" causes.
    pub in_critical_set: bool,
    pub turnover_index: f64,
}

/// Pareto analysis of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParetoAnalysis {
    pub category: String,
    pub patterns: Vec<CategoryPattern>,
    pub critical_set: Vec<CategoryPattern>,
    pub total_exits: u64,
}

/// One point of the monthly trend series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub exits: u64,
}

/// Simple value→count distribution entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: u64,
    pub share_pct: f64,
}

/// Full report returned by the aggregation service for one record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_exits: u64,
    pub distributions: BTreeMap<String, Vec<CategoryCount>>,
    pub monthly_trend: Vec<TrendPoint>,
    pub pareto: BTreeMap<String, ParetoAnalysis>,
    pub analyzed_at: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    records: &'a [EmployeeExit],
    categories: &'a [&'a str],
}

/// HTTP client for the aggregation service.
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a validated record collection for aggregation.
    pub async fn analyze(&self, records: &[EmployeeExit]) -> Result<AnalysisReport> {
        let url = format!("{}/api/analyze", self.base_url);
        let request = AnalyzeRequest {
            records,
            categories: ANALYSIS_CATEGORIES,
        };

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            crate::observability::metrics::analysis::request_error();
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Api {
                message: format!("analysis service returned {}: {}", status, body),
            });
        }

        let report = response.json::<AnalysisReport>().await?;
        crate::observability::metrics::analysis::request_success();
        Ok(report)
    }
}
