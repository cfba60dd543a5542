use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analytics::funnel::{avg_time_in_stage, AvgTimeInStage, ConversionRates, FunnelTotals};
use crate::analytics::source::{RecordSource, RecordSourceError};
use crate::analytics::status::{count_by_status, StatusCounts};
use crate::analytics::weekly::{build_weekly_histogram, WeeklyHistogram};
use crate::models::application::ApplicationRecord;

/// Per-request analytics for one user. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub status_counts: StatusCounts,
    pub apps_per_week: WeeklyHistogram,
    pub conversion_rates: ConversionRates,
    pub avg_time_in_stage: AvgTimeInStage,
}

/// Derives the full summary from an already-loaded record set.
pub fn summarize(records: &[ApplicationRecord], now: DateTime<Utc>) -> AnalyticsSummary {
    let status_counts = count_by_status(records);
    let totals = FunnelTotals::from_counts(&status_counts);
    debug!(
        "Funnel totals: applied={} interviews={} offers={}",
        totals.total_applied, totals.interviews, totals.offers
    );

    AnalyticsSummary {
        apps_per_week: build_weekly_histogram(records, now),
        conversion_rates: ConversionRates::from_totals(&totals),
        avg_time_in_stage: avg_time_in_stage(records),
        status_counts,
    }
}

/// Loads `user_id`'s records and summarizes them relative to `now`.
/// Only a loader failure can fail this, and it is returned unchanged.
pub async fn compute_analytics(
    source: &dyn RecordSource,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<AnalyticsSummary, RecordSourceError> {
    let records = source.load_for_user(user_id).await?;
    let foreign = records.iter().filter(|r| r.user_id != user_id).count();
    if foreign > 0 {
        warn!("Record source returned {foreign} records not owned by user {user_id}");
    }

    let summary = summarize(&records, now);
    info!(
        "Computed analytics for user {user_id}: {} records, {} in 12-week window",
        summary.status_counts.total(),
        summary.apps_per_week.total()
    );
    Ok(summary)
}
