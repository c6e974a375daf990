//! resolves the date/time parameters of a request. a lone `time`
//! parameter may be a full ISO-8601 instant, with or without an
//! explicit offset; everything else goes through lenient parsing in
//! the graph's home timezone.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S%p", "%I:%M%p", "%I:%M %p"];

/// epoch seconds of the requested departure or arrival instant.
pub fn resolve_date_time(
    date: Option<&str>,
    time: Option<&str>,
    tz: Tz,
    now: DateTime<Utc>,
) -> i64 {
    if date.is_none() {
        if let Some(raw) = time {
            log::debug!("parsing ISO datetime {raw}");
            // an explicit offset wins outright
            if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
                return parsed.timestamp();
            }
            // without an offset, the instant is taken in the graph's
            // home timezone
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
                return local_timestamp(naive, tz, now);
            }
        }
    }
    lenient_date_time(date, time, tz, now)
}

fn lenient_date_time(date: Option<&str>, time: Option<&str>, tz: Tz, now: DateTime<Utc>) -> i64 {
    let local_now = now.with_timezone(&tz);
    let date_part = match date {
        Some(raw) => match parse_date(raw) {
            Some(parsed) => parsed,
            None => {
                log::warn!("unparseable date '{raw}', using today");
                local_now.date_naive()
            }
        },
        None => local_now.date_naive(),
    };
    let time_part = match time {
        Some(raw) => match parse_time(raw) {
            Some(parsed) => parsed,
            None => {
                log::warn!("unparseable time '{raw}', using the current time");
                local_now.time()
            }
        },
        None => local_now.time(),
    };
    local_timestamp(date_part.and_time(time_part), tz, now)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let normalized = raw.to_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
}

fn local_timestamp(naive: NaiveDateTime, tz: Tz, now: DateTime<Utc>) -> i64 {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant.timestamp(),
        // fall-back transitions: take the earlier reading
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
        // spring-forward gap: shift past it
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(instant) => instant.timestamp(),
            LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
            LocalResult::None => now.timestamp(),
        },
    }
}
