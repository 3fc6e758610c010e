// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and calendar days.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Calendar day of a timestamp in the server's local time zone.
pub fn local_date(date: DateTime<Utc>) -> NaiveDate {
    date.with_timezone(&Local).date_naive()
}

/// Whether two timestamps fall on the same local calendar day.
pub fn same_local_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    local_date(a) == local_date(b)
}

/// UTC bounds `[start, end)` of a local calendar day.
///
/// Falls back to the earliest valid local time when midnight is skipped by a
/// DST transition.
pub fn local_day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight(day);
    let end = day
        .succ_opt()
        .map_or_else(|| start + chrono::Duration::days(1), local_midnight);
    (start, end)
}

fn local_midnight(day: NaiveDate) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
        .with_timezone(&Utc)
}
