use std::collections::BTreeMap;

use serde::Serialize;

use crate::analytics::status::StatusCounts;
use crate::models::application::{ApplicationRecord, ApplicationStatus};

/// Stage populations of the conversion funnel.
///
/// REJECTED records are left out of every population regardless of the stage
/// they were rejected from, which inflates rates for heavily rejected users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunnelTotals {
    pub total_applied: u64,
    pub interviews: u64,
    pub offers: u64,
}

impl FunnelTotals {
    pub fn from_counts(counts: &StatusCounts) -> Self {
        let offers = counts.get(ApplicationStatus::Offer);
        let interviews = counts.get(ApplicationStatus::Interview) + offers;
        let total_applied = counts.get(ApplicationStatus::Applied)
            + counts.get(ApplicationStatus::Oa)
            + interviews;
        Self {
            total_applied,
            interviews,
            offers,
        }
    }
}

/// Conversion percentages in `[0, 100]`; exactly 0.0 when a denominator is 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRates {
    pub applied_to_interview: f64,
    pub interview_to_offer: f64,
    pub applied_to_offer: f64,
}

impl ConversionRates {
    pub fn from_totals(totals: &FunnelTotals) -> Self {
        Self {
            applied_to_interview: percentage(totals.interviews, totals.total_applied),
            interview_to_offer: percentage(totals.offers, totals.interviews),
            applied_to_offer: percentage(totals.offers, totals.total_applied),
        }
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Mean whole days from `date_applied` to `updated_at`, per status.
pub type AvgTimeInStage = BTreeMap<ApplicationStatus, f64>;

/// Averages elapsed days per status over records that have a `date_applied`.
///
/// Elapsed time is measured up to the record's last update, not the moment it
/// entered its current status. Editing an unrelated field moves `updated_at`
/// and skews the figure. Statuses with no qualifying record are omitted.
pub fn avg_time_in_stage(records: &[ApplicationRecord]) -> AvgTimeInStage {
    let mut sums: BTreeMap<ApplicationStatus, (i64, u64)> = BTreeMap::new();

    for record in records {
        let Some(applied) = record.date_applied else {
            continue;
        };
        // num_days truncates toward zero
        let days = (record.updated_at - applied).num_days();
        let entry = sums.entry(record.status).or_insert((0, 0));
        entry.0 += days;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(status, (total_days, n))| (status, total_days as f64 / n as f64))
        .collect()
}
