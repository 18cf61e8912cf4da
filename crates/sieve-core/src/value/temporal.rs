use std::fmt;
use time::{
    Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset,
    format_description::well_known::Rfc3339, macros::format_description,
};

///
/// YearMonth
///
/// Calendar month within a year, parsed from `YYYY-MM`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    #[must_use]
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Parse an ISO `YYYY-MM` string. A leading sign is allowed on the year.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.rsplit_once('-')?;
        if month.len() != 2 {
            return None;
        }

        let year = parse_year(year)?;
        let month = month.parse::<u8>().ok()?;
        let month = Month::try_from(month).ok()?;

        Some(Self { year, month })
    }

    /// First day of this month.
    #[must_use]
    pub fn first_day(self) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, 1).ok()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

///
/// ZonedDateTime
///
/// Offset date-time optionally tagged with a region id, as in
/// `2024-03-01T10:15:30+01:00[Europe/Paris]`. The region id is kept
/// verbatim; the offset is authoritative for comparisons.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ZonedDateTime {
    pub date_time: OffsetDateTime,
    pub zone: Option<String>,
}

impl ZonedDateTime {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (head, zone) = match s.strip_suffix(']') {
            Some(rest) => {
                let (head, zone) = rest.split_once('[')?;
                if zone.is_empty() {
                    return None;
                }
                (head, Some(zone.to_string()))
            }
            None => (s, None),
        };

        let date_time = parse_offset_date_time(head)?;

        Some(Self { date_time, zone })
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zone {
            Some(zone) => write!(f, "{}[{zone}]", self.date_time),
            None => write!(f, "{}", self.date_time),
        }
    }
}

///
/// Bucketed
///
/// Temporal operand after conversion into one of the three legacy buckets.
/// Timestamps are always expressed in UTC.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Bucketed {
    Date(Date),
    Time(Time),
    Timestamp(PrimitiveDateTime),
}

impl fmt::Display for Bucketed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{date}"),
            Self::Time(time) => write!(f, "{time}"),
            Self::Timestamp(ts) => write!(f, "{ts}"),
        }
    }
}

/// Parse an ISO `YYYY-MM-DD` string.
pub(crate) fn parse_local_date(s: &str) -> Option<Date> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).ok()
}

/// Parse an ISO local time; seconds and fractional seconds are optional.
pub(crate) fn parse_local_time(s: &str) -> Option<Time> {
    Time::parse(
        s,
        format_description!(
            "[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
        ),
    )
    .ok()
}

/// Parse an ISO local date-time separated by `T`.
pub(crate) fn parse_local_date_time(s: &str) -> Option<PrimitiveDateTime> {
    PrimitiveDateTime::parse(
        s,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
        ),
    )
    .ok()
}

/// Parse an ISO offset date-time. RFC 3339 is tried first; the fallback
/// accepts reduced precision (no seconds) and a `Z` designator.
pub(crate) fn parse_offset_date_time(s: &str) -> Option<OffsetDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(parsed);
    }

    let normalized = match s.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };

    OffsetDateTime::parse(
        &normalized,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]][offset_hour sign:mandatory]:[offset_minute]"
        ),
    )
    .ok()
}

/// Parse an instant and normalize it to UTC.
pub(crate) fn parse_instant(s: &str) -> Option<OffsetDateTime> {
    parse_offset_date_time(s).map(|parsed| parsed.to_offset(UtcOffset::UTC))
}

/// Parse a proleptic year with an optional sign, limited to the years a
/// calendar `Date` can hold.
pub(crate) fn parse_year(s: &str) -> Option<i32> {
    let digits = s.trim_start_matches(['+', '-']);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = s.parse::<i32>().ok()?;

    (Date::MIN.year()..=Date::MAX.year())
        .contains(&year)
        .then_some(year)
}
