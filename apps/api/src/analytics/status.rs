use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::application::{ApplicationRecord, ApplicationStatus};

/// Count of records per status. Statuses with no records have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusCounts(BTreeMap<ApplicationStatus, u64>);

impl StatusCounts {
    /// Count for `status`, 0 when absent.
    pub fn get(&self, status: ApplicationStatus) -> u64 {
        self.0.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

pub fn count_by_status(records: &[ApplicationRecord]) -> StatusCounts {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.status).or_insert(0) += 1;
    }
    StatusCounts(counts)
}
