//! Week-slug resolution: pure date arithmetic in both directions.
//!
//! The upstream publishes one page per week, addressed by a slug like
//! `jul-21-to-jul-27-2025`. "Current week" is intentionally one calendar
//! week behind `now`, matching the upstream publication cadence: pages
//! appear after the week they describe has ended.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use super::models::WeekSlug;

lazy_static! {
    static ref SLUG_RE: Regex =
        Regex::new(r"(?i)([a-z]{3})-(\d{1,2})-to-([a-z]{3})-(\d{1,2})-(\d{4})")
            .expect("valid slug regex");
    static ref YEAR_RE: Regex = Regex::new(r"-(\d{4})$").expect("valid year regex");
    static ref END_MONTH_RE: Regex =
        Regex::new(r"(?i)-to-([a-z]{3})-").expect("valid month regex");
}

/// Slug for the most recently published week: the Monday six days before
/// the start of `now`'s (Sunday-based) week, through the following Sunday.
pub fn current_week_slug(now: DateTime<Utc>) -> WeekSlug {
    let monday = publication_week_start(now, 6);
    format_slug(monday, monday + Duration::days(6))
}

/// Slug for the week before [`current_week_slug`]: anchored thirteen days
/// back instead of six.
pub fn previous_week_slug(now: DateTime<Utc>) -> WeekSlug {
    let monday = publication_week_start(now, 13);
    format_slug(monday, monday + Duration::days(6))
}

/// Start date of the slug's week.
///
/// The year comes from the slug's trailing four digits, which belong to the
/// end date; when the start month is calendar-later than the end month the
/// slug spans a year boundary and the start year is one less. Unparsable
/// slugs fall back to `now`'s date rather than erroring.
pub fn date_from_slug(slug: &WeekSlug, now: DateTime<Utc>) -> NaiveDate {
    parse_start_date(slug).unwrap_or_else(|| now.date_naive())
}

/// Trailing four-digit year of the slug, used as the upstream URL's year
/// path segment. Falls back to the current year.
pub fn year_from_slug(slug: &WeekSlug, now: DateTime<Utc>) -> i32 {
    YEAR_RE
        .captures(slug.as_str())
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or_else(|| now.year())
}

/// Zero-padded numeric end-month of the slug ("07"), used as the upstream
/// URL's month path segment. Falls back to the current month.
pub fn month_from_slug(slug: &WeekSlug, now: DateTime<Utc>) -> String {
    let month = END_MONTH_RE
        .captures(slug.as_str())
        .and_then(|caps| month_number(&caps[1]))
        .unwrap_or_else(|| now.month());
    format!("{:02}", month)
}

/// Monday anchoring the slugged week: `days_back` days before the Sunday
/// that starts `now`'s week.
fn publication_week_start(now: DateTime<Utc>, days_back: i64) -> NaiveDate {
    let today = now.date_naive();
    let sunday = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    sunday - Duration::days(days_back)
}

fn format_slug(start: NaiveDate, end: NaiveDate) -> WeekSlug {
    WeekSlug::new(format!(
        "{}-{}-to-{}-{}-{}",
        month_abbr(start),
        start.day(),
        month_abbr(end),
        end.day(),
        end.year()
    ))
}

fn month_abbr(date: NaiveDate) -> String {
    date.format("%b").to_string().to_lowercase()
}

fn parse_start_date(slug: &WeekSlug) -> Option<NaiveDate> {
    let caps = SLUG_RE.captures(slug.as_str())?;
    let start_month = month_number(&caps[1])?;
    let start_day: u32 = caps[2].parse().ok()?;
    let end_month = month_number(&caps[3])?;
    let year: i32 = caps[5].parse().ok()?;

    // Trailing year belongs to the end date; a dec-29-to-jan-4-2026 slug
    // starts in 2025.
    let start_year = if start_month > end_month { year - 1 } else { year };
    NaiveDate::from_ymd_opt(start_year, start_month, start_day)
}

fn month_number(abbr: &str) -> Option<u32> {
    match abbr.to_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}
