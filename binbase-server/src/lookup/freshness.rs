//! Staleness rule for cached records.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

/// Records last updated on this day (year, month, day) are refreshed on
/// their next lookup regardless of age.
///
/// Every row imported by the initial data load carries this date.
// TODO: drop this rule once no row has `updated_at` on 2024-11-27.
pub const MIGRATION_MARKER: (i32, u32, u32) = (2024, 11, 27);

/// Whether a record last updated at `updated_at` needs a refresh at `now`.
///
/// A record is stale when it was updated on the migration marker day, or
/// when `now` falls on a later calendar day than one month after the
/// update. Dates are compared in UTC. Adding a month clamps to the end of
/// shorter months (31 January + 1 month = 28/29 February).
pub fn is_stale(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let updated = updated_at.date_naive();

    if is_migration_marker(updated) {
        return true;
    }

    match updated.checked_add_months(Months::new(1)) {
        Some(due) => now.date_naive() > due,
        None => true,
    }
}

fn is_migration_marker(date: NaiveDate) -> bool {
    let (year, month, day) = MIGRATION_MARKER;
    date.year() == year && date.month() == month && date.day() == day
}
