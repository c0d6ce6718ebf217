use chrono::{Datelike, NaiveDate, Weekday};

/// Whole days from `a` to `b`; negative when `b` is earlier.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// The Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as i64;
    date - chrono::Duration::days(back)
}

/// The first day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // from_ymd_opt with day 1 cannot fail for a valid year/month
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// The first day of the month after the one containing `date`.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(date + chrono::Duration::days(31))
}

/// Quarter of the year, 1 through 4.
pub fn quarter(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// ISO 8601 week number.
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Monday or the 1st of a month.
pub fn is_major_day(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon || date.day() == 1
}
