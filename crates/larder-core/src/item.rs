//! The stored item model and expiry math

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A tracked food entry with storage and expiry metadata.
///
/// Responses use snake_case field names, matching the store's columns.
/// Deserialization also accepts camelCase so callers reading a response do
/// not care which side of the naming boundary produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier, immutable for the row's lifetime.
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "storageType")]
    pub storage_type: String,
    #[serde(alias = "dateStored")]
    pub date_stored: NaiveDate,
    #[serde(alias = "useByDate")]
    pub use_by_date: NaiveDate,
    /// Derived at read time, never persisted. Absent on rows returned by
    /// insert/update/delete; negative once the use-by date has passed.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "daysLeft"
    )]
    pub days_left: Option<i64>,
}

impl Item {
    /// Attach the derived days-left field, computed against `now`.
    pub fn with_days_left(mut self, now: DateTime<Utc>) -> Self {
        self.days_left = Some(days_left(self.use_by_date, now));
        self
    }
}

/// The five user-supplied fields of a create or update request.
///
/// Request payloads use camelCase, the convention the browser-facing API
/// always spoke; snake_case is accepted as an alias so the translation
/// between the two conventions lives entirely in this type and [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "storage_type")]
    pub storage_type: String,
    #[serde(alias = "date_stored")]
    pub date_stored: NaiveDate,
    #[serde(alias = "use_by_date")]
    pub use_by_date: NaiveDate,
}

/// Whole days from `now` until midnight of `use_by`, rounded up.
///
/// Matches `ceil((use_by - now) / 1 day)`: an item due in 3 days and 12
/// hours has 4 days left, and the result goes negative once the use-by
/// date is in the past.
pub fn days_left(use_by: NaiveDate, now: DateTime<Utc>) -> i64 {
    let use_by = use_by.and_time(NaiveTime::MIN).and_utc();
    let seconds = (use_by - now).num_seconds();
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    if seconds.rem_euclid(SECONDS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}
