//! Dashboard statistics and yearly reports.

use crate::domain::aggregates::{DashboardStats, ReportSummary};
use crate::domain::dates;
use crate::domain::DomainError;
use crate::ports::InsightsApi;
use chrono::{DateTime, Datelike, Utc};
use std::sync::Arc;
use tracing::info;

pub struct InsightService {
    api: Arc<dyn InsightsApi>,
}

impl InsightService {
    pub fn new(api: Arc<dyn InsightsApi>) -> Self {
        Self { api }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, DomainError> {
        self.api.dashboard().await
    }

    pub async fn report(&self, year: i32) -> Result<ReportSummary, DomainError> {
        let report = self.api.report(year).await?;
        info!(
            year,
            revenue = %report.total_revenue,
            expenses = %report.total_expenses,
            "report loaded"
        );
        Ok(report)
    }

    /// Years offered by the report picker, oldest first.
    pub fn years(now: &DateTime<Utc>) -> [i32; 3] {
        dates::report_years(now.year())
    }
}
