//! Decides whether cached exchange rates can be used without a refresh

use crate::core::repository::UpdatedTimeRepository;
use chrono::{DateTime, Datelike, Local, TimeZone};
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

/// Stored last-updated value meaning rates were never fetched.
pub const NEVER_UPDATED: i64 = 0;

/// Returns true when rates updated at `last_updated_millis` are still fresh
/// in the system's local time zone.
pub fn is_fresh(last_updated_millis: i64) -> bool {
    is_fresh_at(last_updated_millis, &Local::now())
}

/// Same rule as [`is_fresh`], evaluated against an explicit `now`.
///
/// Compares the day-of-year of both dates in `now`'s time zone. Years are
/// ignored, so a December timestamp looks fresh again in January.
pub fn is_fresh_at<Tz: TimeZone>(last_updated_millis: i64, now: &DateTime<Tz>) -> bool {
    if last_updated_millis == NEVER_UPDATED {
        return false;
    }
    let Some(updated) = DateTime::from_timestamp_millis(last_updated_millis) else {
        debug!(last_updated_millis, "Timestamp out of range, treating as stale");
        return false;
    };
    let updated = updated.with_timezone(&now.timezone());
    let day_difference = i64::from(now.ordinal()) - i64::from(updated.ordinal());
    debug!(day_difference, "Evaluated rate freshness");
    day_difference <= 1
}

/// Status of the cached rates as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateStatus {
    #[default]
    Idle,
    Fresh,
    Stale,
}

impl RateStatus {
    pub fn title(&self) -> &'static str {
        match self {
            RateStatus::Idle => "Rates",
            RateStatus::Fresh => "Fresh rates",
            RateStatus::Stale => "Rates are not fresh",
        }
    }
}

impl Display for RateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Checks the stored last-updated time against [`is_fresh`].
pub struct FreshnessValidator<R: UpdatedTimeRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UpdatedTimeRepository + ?Sized> FreshnessValidator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn validate(&self) -> bool {
        is_fresh(self.repository.get_last_updated_time().await)
    }

    pub async fn rate_status(&self) -> RateStatus {
        if self.validate().await {
            RateStatus::Fresh
        } else {
            RateStatus::Stale
        }
    }
}
