use std::fmt;
use std::str::FromStr;
use chrono::{
    DateTime as ChronoDateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, Timelike,
    Utc,
};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Precision levels for FHIR Date values.
///
/// FHIR dates support partial precision, allowing year-only, year-month,
/// or full date specifications. This enum tracks which components are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatePrecision {
    /// Year only (YYYY)
    Year,
    /// Year and month (YYYY-MM)
    Month,
    /// Full date (YYYY-MM-DD)
    Day,
}

/// Sub-day precision shared by FHIR time, instant and time-bearing dateTime values.
///
/// A parsed value remembers how many fraction digits it was written with and
/// prints exactly that many again. Values built in code print the full width
/// of their precision unless given another digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimePrecision {
    /// Whole seconds (hh:mm:ss)
    Second,
    /// Milliseconds (hh:mm:ss.fff)
    Millisecond,
    /// Microseconds (hh:mm:ss.ffffff)
    Microsecond,
}

impl TimePrecision {
    /// Picks the precision that holds a fraction of `digits` decimal places.
    /// Nothing finer than a microsecond is held.
    pub fn from_fraction_digits(digits: usize) -> Option<Self> {
        match digits {
            0 => Some(TimePrecision::Second),
            1..=3 => Some(TimePrecision::Millisecond),
            4..=6 => Some(TimePrecision::Microsecond),
            _ => None,
        }
    }

    /// Fraction digits printed when no other count was recorded.
    pub fn fraction_width(self) -> u8 {
        match self {
            TimePrecision::Second => 0,
            TimePrecision::Millisecond => 3,
            TimePrecision::Microsecond => 6,
        }
    }
}

/// Precision levels for FHIR DateTime values.
///
/// FHIR datetimes support partial precision from year-only through
/// microseconds. Any precision carrying a time of day also carries a timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateTimePrecision {
    /// Year only (YYYY)
    Year,
    /// Year and month (YYYY-MM)
    Month,
    /// Date only (YYYY-MM-DD)
    Day,
    /// Date with time to seconds (YYYY-MM-DDThh:mm:ss)
    Second,
    /// Date with time to milliseconds
    Millisecond,
    /// Date with time to microseconds
    Microsecond,
}

impl DateTimePrecision {
    fn split(self) -> Result<DatePrecision, TimePrecision> {
        match self {
            DateTimePrecision::Year => Ok(DatePrecision::Year),
            DateTimePrecision::Month => Ok(DatePrecision::Month),
            DateTimePrecision::Day => Ok(DatePrecision::Day),
            DateTimePrecision::Second => Err(TimePrecision::Second),
            DateTimePrecision::Millisecond => Err(TimePrecision::Millisecond),
            DateTimePrecision::Microsecond => Err(TimePrecision::Microsecond),
        }
    }
}

impl From<DatePrecision> for DateTimePrecision {
    fn from(precision: DatePrecision) -> Self {
        match precision {
            DatePrecision::Year => DateTimePrecision::Year,
            DatePrecision::Month => DateTimePrecision::Month,
            DatePrecision::Day => DateTimePrecision::Day,
        }
    }
}

impl From<TimePrecision> for DateTimePrecision {
    fn from(precision: TimePrecision) -> Self {
        match precision {
            TimePrecision::Second => DateTimePrecision::Second,
            TimePrecision::Millisecond => DateTimePrecision::Millisecond,
            TimePrecision::Microsecond => DateTimePrecision::Microsecond,
        }
    }
}

/// Timezone designator of a FHIR temporal value.
///
/// `Z` and `+00:00` are kept apart so that a value re-encodes with the
/// designator it was read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeZone {
    /// The `Z` designator
    Utc,
    /// An explicit `+hh:mm` / `-hh:mm` offset
    Offset(FixedOffset),
}

impl TimeZone {
    /// Builds an offset timezone from a signed number of minutes east of UTC.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(TimeZone::Offset)
    }

    /// The chrono offset this designator stands for.
    pub fn fixed_offset(&self) -> FixedOffset {
        match self {
            TimeZone::Utc => Utc.fix(),
            TimeZone::Offset(offset) => *offset,
        }
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZone::Utc => f.write_str("Z"),
            TimeZone::Offset(offset) => {
                let seconds = offset.local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let minutes = seconds.abs() / 60;
                write!(f, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
            }
        }
    }
}

impl FromStr for TimeZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Z" {
            return Ok(TimeZone::Utc);
        }
        let invalid = || format!("Invalid FHIR timezone format: {}", s);
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
        let hours: i32 = digits(hours, 2).ok_or_else(invalid)?;
        let minutes: i32 = digits(minutes, 2).ok_or_else(invalid)?;
        if hours > 14 || minutes > 59 {
            return Err(invalid());
        }
        TimeZone::from_offset_minutes(sign * (hours * 60 + minutes)).ok_or_else(invalid)
    }
}

impl Default for PrecisionDate {
    fn default() -> Self {
        // Default to epoch date 1970-01-01
        Self::new(0, DatePrecision::Day)
    }
}

/// Precision-aware FHIR Date type.
///
/// The value is held as signed microseconds since the Unix epoch (UTC)
/// together with the precision the date was written with.
///
/// # FHIR Date Formats
/// - `YYYY` - Year only
/// - `YYYY-MM` - Year and month
/// - `YYYY-MM-DD` - Full date
///
/// FHIR dates are timezone-naive. A timezone can still be attached (for
/// instance when converting from a zoned source) but such a value is refused
/// by the JSON encoder.
///
/// # Examples
/// ```rust
/// use atrius_fhir_lib::date_time::{DatePrecision, PrecisionDate};
///
/// let birth = PrecisionDate::new(529_977_600_000_000, DatePrecision::Day);
/// assert_eq!(birth.format().as_deref(), Some("1986-10-18"));
///
/// let month = PrecisionDate::new(528_508_800_000_000, DatePrecision::Month);
/// assert_eq!(month.format().as_deref(), Some("1986-10"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrecisionDate {
    /// Microseconds since the epoch
    value_us: i64,
    /// Precision level of this date
    precision: DatePrecision,
    /// Timezone the date was taken in, if any
    timezone: Option<TimeZone>,
}

impl PrecisionDate {
    /// Creates a date from an epoch timestamp without truncating it.
    pub fn new(value_us: i64, precision: DatePrecision) -> Self {
        Self {
            value_us,
            precision,
            timezone: None,
        }
    }

    /// Creates a date whose timestamp is rounded down to the start of its
    /// year, month or day.
    ///
    /// ```rust
    /// use atrius_fhir_lib::date_time::{DatePrecision, PrecisionDate};
    ///
    /// let date = PrecisionDate::truncated(529_977_600_000_000, DatePrecision::Year).unwrap();
    /// assert_eq!(date.value_us(), 504_921_600_000_000);
    /// ```
    pub fn truncated(value_us: i64, precision: DatePrecision) -> Option<Self> {
        let date = utc_from_micros(value_us)?.date_naive();
        let start = start_of(date, precision)?;
        Some(Self::new(date_micros(start), precision))
    }

    /// Creates a year-only precision date.
    pub fn from_year(year: i32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, 1, 1)?;
        Some(Self::new(date_micros(date), DatePrecision::Year))
    }

    /// Creates a year-month precision date.
    pub fn from_year_month(year: i32, month: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self::new(date_micros(date), DatePrecision::Month))
    }

    /// Creates a full precision date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self::new(date_micros(date), DatePrecision::Day))
    }

    /// Attaches a timezone to this date.
    pub fn with_timezone(mut self, timezone: TimeZone) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Parses a FHIR date string, trying each layout in turn.
    ///
    /// The first layout that accepts the text determines the precision.
    pub fn parse(s: &str) -> Option<Self> {
        DATE_LAYOUTS.iter().find_map(|(precision, layout)| {
            layout(s).map(|date| Self::new(date_micros(date), *precision))
        })
    }

    /// Formats the date with the layout selected by its precision.
    ///
    /// Returns `None` when the timestamp lies outside chrono's range.
    pub fn format(&self) -> Option<String> {
        let date = utc_from_micros(self.value_us)?.date_naive();
        Some(format_date(date, self.precision))
    }

    pub fn value_us(&self) -> i64 {
        self.value_us
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }

    pub fn timezone(&self) -> Option<TimeZone> {
        self.timezone
    }

    /// The first instant covered by this date, in UTC.
    pub fn to_chrono(&self) -> Option<ChronoDateTime<Utc>> {
        let date = utc_from_micros(self.value_us)?.date_naive();
        let start = start_of(date, self.precision)?;
        utc_from_micros(date_micros(start))
    }
}

impl Default for PrecisionTime {
    fn default() -> Self {
        Self::new(0, TimePrecision::Second)
    }
}

/// Precision-aware FHIR Time type (a time of day, no date and no timezone).
///
/// The value is held as microseconds since midnight. Leap seconds (`:60`)
/// are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrecisionTime {
    value_us: i64,
    precision: TimePrecision,
    fraction_digits: u8,
}

impl PrecisionTime {
    pub fn new(value_us: i64, precision: TimePrecision) -> Self {
        Self {
            value_us,
            precision,
            fraction_digits: precision.fraction_width(),
        }
    }

    /// Sets the number of fraction digits printed; it must fit the precision.
    pub fn with_fraction_digits(mut self, digits: u8) -> Option<Self> {
        let precision = TimePrecision::from_fraction_digits(digits.into())?;
        (precision == self.precision).then(|| {
            self.fraction_digits = digits;
            self
        })
    }

    /// Creates a second precision time.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(Self::new(time_micros(time), TimePrecision::Second))
    }

    /// Creates a millisecond precision time.
    pub fn from_hms_milli(hour: u32, minute: u32, second: u32, millisecond: u32) -> Option<Self> {
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millisecond)?;
        Some(Self::new(time_micros(time), TimePrecision::Millisecond))
    }

    /// Parses `hh:mm:ss` with an optional fraction of up to six digits.
    pub fn parse(s: &str) -> Option<Self> {
        let time = NaiveTime::parse_from_str(s, "%H:%M:%S%.f").ok()?;
        if is_leap_second(time.nanosecond()) {
            return None;
        }
        let (precision, fraction_digits) = parse_fraction(s)?;
        Some(Self {
            value_us: time_micros(time),
            precision,
            fraction_digits,
        })
    }

    /// Prints the time, or `None` when the value is not a time of day or has
    /// sub-second digits its fraction cannot show.
    pub fn format(&self) -> Option<String> {
        let time = self.to_naive_time()?;
        let fraction = fraction_text(time.nanosecond() / 1000, self.fraction_digits)?;
        Some(format!("{}{fraction}", time.format("%H:%M:%S")))
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let seconds = u32::try_from(self.value_us.div_euclid(MICROS_PER_SECOND)).ok()?;
        let micros = u32::try_from(self.value_us.rem_euclid(MICROS_PER_SECOND)).ok()?;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, micros * 1000)
    }

    pub fn value_us(&self) -> i64 {
        self.value_us
    }

    pub fn precision(&self) -> TimePrecision {
        self.precision
    }

    pub fn fraction_digits(&self) -> u8 {
        self.fraction_digits
    }
}

impl Default for PrecisionDateTime {
    fn default() -> Self {
        Self::new(0, DateTimePrecision::Day)
    }
}

/// Precision-aware FHIR DateTime type.
///
/// # FHIR DateTime Formats
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD` - partial dates, no timezone
/// - `YYYY-MM-DDThh:mm:ss[.fff]Z` / `...+hh:mm` - full timestamps
///
/// For time-bearing precisions the value is printed in its own timezone,
/// falling back to `Z` when none was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrecisionDateTime {
    value_us: i64,
    precision: DateTimePrecision,
    timezone: Option<TimeZone>,
    fraction_digits: u8,
}

impl PrecisionDateTime {
    pub fn new(value_us: i64, precision: DateTimePrecision) -> Self {
        let fraction_digits = match precision.split() {
            Ok(_) => 0,
            Err(time_precision) => time_precision.fraction_width(),
        };
        Self {
            value_us,
            precision,
            timezone: None,
            fraction_digits,
        }
    }

    pub fn with_timezone(mut self, timezone: TimeZone) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Sets the number of fraction digits printed. Only time-bearing values
    /// take one, and it must fit the precision.
    pub fn with_fraction_digits(mut self, digits: u8) -> Option<Self> {
        let precision = TimePrecision::from_fraction_digits(digits.into())?;
        (DateTimePrecision::from(precision) == self.precision).then(|| {
            self.fraction_digits = digits;
            self
        })
    }

    /// Converts a date into a dateTime of the same precision.
    pub fn from_precision_date(date: PrecisionDate) -> Self {
        Self {
            value_us: date.value_us,
            precision: date.precision.into(),
            timezone: date.timezone,
            fraction_digits: 0,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if let Some(date) = PrecisionDate::parse(s) {
            return Some(Self::from_precision_date(date));
        }
        let stamp = parse_timestamp(s)?;
        Some(Self {
            value_us: stamp.value_us,
            precision: stamp.precision.into(),
            timezone: Some(stamp.timezone),
            fraction_digits: stamp.fraction_digits,
        })
    }

    pub fn format(&self) -> Option<String> {
        let timezone = self.timezone.unwrap_or(TimeZone::Utc);
        let local = utc_from_micros(self.value_us)?.with_timezone(&timezone.fixed_offset());
        match self.precision.split() {
            Ok(date_precision) => Some(format_date(local.date_naive(), date_precision)),
            Err(_) => format_timestamp(&local, self.fraction_digits, timezone),
        }
    }

    pub fn has_time(&self) -> bool {
        self.precision >= DateTimePrecision::Second
    }

    pub fn value_us(&self) -> i64 {
        self.value_us
    }

    pub fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    pub fn fraction_digits(&self) -> u8 {
        self.fraction_digits
    }

    pub fn timezone(&self) -> Option<TimeZone> {
        self.timezone
    }

    pub fn to_chrono(&self) -> Option<ChronoDateTime<Utc>> {
        utc_from_micros(self.value_us)
    }
}

/// FHIR instant: a full timestamp that always carries a timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrecisionInstant {
    value_us: i64,
    precision: TimePrecision,
    timezone: TimeZone,
    fraction_digits: u8,
}

impl Default for PrecisionInstant {
    fn default() -> Self {
        Self::new(0, TimePrecision::Second, TimeZone::Utc)
    }
}

impl PrecisionInstant {
    pub fn new(value_us: i64, precision: TimePrecision, timezone: TimeZone) -> Self {
        Self {
            value_us,
            precision,
            timezone,
            fraction_digits: precision.fraction_width(),
        }
    }

    /// Sets the number of fraction digits printed; it must fit the precision.
    pub fn with_fraction_digits(mut self, digits: u8) -> Option<Self> {
        let precision = TimePrecision::from_fraction_digits(digits.into())?;
        (precision == self.precision).then(|| {
            self.fraction_digits = digits;
            self
        })
    }

    /// Parses a FHIR instant. Partial dates are not instants.
    pub fn parse(s: &str) -> Option<Self> {
        let stamp = parse_timestamp(s)?;
        Some(Self {
            value_us: stamp.value_us,
            precision: stamp.precision,
            timezone: stamp.timezone,
            fraction_digits: stamp.fraction_digits,
        })
    }

    pub fn format(&self) -> Option<String> {
        let local =
            utc_from_micros(self.value_us)?.with_timezone(&self.timezone.fixed_offset());
        format_timestamp(&local, self.fraction_digits, self.timezone)
    }

    /// Views this instant as a dateTime of the same precision.
    pub fn as_datetime(&self) -> PrecisionDateTime {
        PrecisionDateTime {
            value_us: self.value_us,
            precision: self.precision.into(),
            timezone: Some(self.timezone),
            fraction_digits: self.fraction_digits,
        }
    }

    pub fn value_us(&self) -> i64 {
        self.value_us
    }

    pub fn precision(&self) -> TimePrecision {
        self.precision
    }

    pub fn fraction_digits(&self) -> u8 {
        self.fraction_digits
    }

    pub fn timezone(&self) -> TimeZone {
        self.timezone
    }

    pub fn to_chrono(&self) -> Option<ChronoDateTime<Utc>> {
        utc_from_micros(self.value_us)
    }
}

type DateLayout = fn(&str) -> Option<NaiveDate>;

const DATE_LAYOUTS: &[(DatePrecision, DateLayout)] = &[
    (DatePrecision::Year, parse_year),
    (DatePrecision::Month, parse_year_month),
    (DatePrecision::Day, parse_full_date),
];

fn parse_year(s: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(digits(s, 4)?, 1, 1)
}

fn parse_year_month(s: &str) -> Option<NaiveDate> {
    let (year, month) = s.split_once('-')?;
    NaiveDate::from_ymd_opt(digits(year, 4)?, digits(month, 2)?, 1)
}

fn parse_full_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.splitn(3, '-');
    let year = digits(parts.next()?, 4)?;
    let month = digits(parts.next()?, 2)?;
    let day = digits(parts.next()?, 2)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a fixed-width run of ASCII digits.
fn digits<T: FromStr>(s: &str, width: usize) -> Option<T> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Reads the fraction after the seconds' decimal point as a precision and
/// its digit count.
fn parse_fraction(s: &str) -> Option<(TimePrecision, u8)> {
    let digits = match s.split_once('.') {
        Some((_, rest)) => rest.bytes().take_while(u8::is_ascii_digit).count(),
        None => 0,
    };
    let precision = TimePrecision::from_fraction_digits(digits)?;
    Some((precision, u8::try_from(digits).ok()?))
}

/// chrono keeps a leap second as a nanosecond count past one second.
fn is_leap_second(nanosecond: u32) -> bool {
    nanosecond >= 1_000_000_000
}

struct Timestamp {
    value_us: i64,
    precision: TimePrecision,
    fraction_digits: u8,
    timezone: TimeZone,
}

fn parse_timestamp(s: &str) -> Option<Timestamp> {
    let parsed = ChronoDateTime::parse_from_rfc3339(s).ok()?;
    if is_leap_second(parsed.nanosecond()) {
        return None;
    }
    let (_, time) = s.split_once('T')?;
    let (precision, fraction_digits) = parse_fraction(time)?;
    let timezone = if s.ends_with('Z') {
        TimeZone::Utc
    } else {
        TimeZone::Offset(*parsed.offset())
    };
    Some(Timestamp {
        value_us: parsed.timestamp_micros(),
        precision,
        fraction_digits,
        timezone,
    })
}

fn start_of(date: NaiveDate, precision: DatePrecision) -> Option<NaiveDate> {
    match precision {
        DatePrecision::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        DatePrecision::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
        DatePrecision::Day => Some(date),
    }
}

fn format_date(date: NaiveDate, precision: DatePrecision) -> String {
    match precision {
        DatePrecision::Year => format!("{:04}", date.year()),
        DatePrecision::Month => format!("{:04}-{:02}", date.year(), date.month()),
        DatePrecision::Day => {
            format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
        }
    }
}

fn format_timestamp(
    local: &ChronoDateTime<FixedOffset>,
    fraction_digits: u8,
    timezone: TimeZone,
) -> Option<String> {
    let fraction = fraction_text(local.timestamp_subsec_micros(), fraction_digits)?;
    Some(format!("{}{fraction}{timezone}", local.format("%Y-%m-%dT%H:%M:%S")))
}

/// Prints exactly `digits` fraction digits. Non-zero digits that would be
/// cut off make the value unprintable.
fn fraction_text(subsec_micros: u32, digits: u8) -> Option<String> {
    let full = format!("{subsec_micros:06}");
    let (kept, dropped) = full.split_at(usize::from(digits).min(full.len()));
    if dropped.bytes().any(|b| b != b'0') {
        return None;
    }
    Some(if kept.is_empty() { String::new() } else { format!(".{kept}") })
}

fn utc_from_micros(value_us: i64) -> Option<ChronoDateTime<Utc>> {
    ChronoDateTime::<Utc>::from_timestamp_micros(value_us)
}

fn date_micros(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::default()).and_utc().timestamp_micros()
}

fn time_micros(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * MICROS_PER_SECOND
        + i64::from(time.nanosecond() / 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_layouts_by_precision() {
        let cases = [
            (504_921_600_000_000, DatePrecision::Year, "1986"),
            (528_508_800_000_000, DatePrecision::Month, "1986-10"),
            (529_977_600_000_000, DatePrecision::Day, "1986-10-18"),
        ];
        for (value_us, precision, text) in cases {
            let date = PrecisionDate::new(value_us, precision);
            assert_eq!(date.format().as_deref(), Some(text));
            assert_eq!(PrecisionDate::parse(text), Some(date));
        }
    }

    #[test]
    fn test_date_truncation() {
        let month = PrecisionDate::truncated(529_977_600_000_000, DatePrecision::Month).unwrap();
        assert_eq!(month.value_us(), 528_508_800_000_000);
        assert_eq!(month.format().as_deref(), Some("1986-10"));

        let untruncated = PrecisionDate::new(529_977_600_000_000, DatePrecision::Year);
        assert_eq!(
            untruncated.to_chrono().map(|dt| dt.timestamp_micros()),
            Some(504_921_600_000_000)
        );
    }

    #[test]
    fn test_date_rejects_malformed_layouts() {
        assert_eq!(PrecisionDate::parse("86"), None);
        assert_eq!(PrecisionDate::parse("1986-1"), None);
        assert_eq!(PrecisionDate::parse("1986-+1-01"), None);
        assert_eq!(PrecisionDate::parse("2019-02-30"), None);
    }

    #[test]
    fn test_datetime_timestamp_round_trip() {
        let parsed = PrecisionDateTime::parse("2017-01-01T00:00:00.123+01:00").unwrap();
        assert_eq!(parsed.precision(), DateTimePrecision::Millisecond);
        assert_eq!(parsed.value_us(), 1_483_225_200_123_000);
        assert_eq!(
            parsed.format().as_deref(),
            Some("2017-01-01T00:00:00.123+01:00")
        );

        let utc = PrecisionDateTime::parse("2017-01-01T00:00:00Z").unwrap();
        assert_eq!(utc.timezone(), Some(TimeZone::Utc));
        assert_eq!(utc.format().as_deref(), Some("2017-01-01T00:00:00Z"));
    }

    #[test]
    fn test_datetime_partial_dates() {
        let parsed = PrecisionDateTime::parse("1986-10").unwrap();
        assert_eq!(parsed.precision(), DateTimePrecision::Month);
        assert!(!parsed.has_time());
        assert_eq!(parsed.format().as_deref(), Some("1986-10"));
    }

    #[test]
    fn test_fraction_digits_kept() {
        let short = PrecisionDateTime::parse("2017-01-01T00:00:00.5Z").unwrap();
        assert_eq!(short.precision(), DateTimePrecision::Millisecond);
        assert_eq!(short.fraction_digits(), 1);
        assert_eq!(short.format().as_deref(), Some("2017-01-01T00:00:00.5Z"));

        let odd = PrecisionInstant::parse("2017-01-01T00:00:00.1234Z").unwrap();
        assert_eq!(odd.precision(), TimePrecision::Microsecond);
        assert_eq!(odd.format().as_deref(), Some("2017-01-01T00:00:00.1234Z"));

        let time = PrecisionTime::parse("09:30:00.50").unwrap();
        assert_eq!(time.format().as_deref(), Some("09:30:00.50"));
    }

    #[test]
    fn test_fraction_past_microseconds_rejected() {
        assert_eq!(PrecisionDateTime::parse("2017-01-01T00:00:00.1234567Z"), None);
        assert_eq!(PrecisionInstant::parse("2017-01-01T00:00:00.1234567Z"), None);
        assert_eq!(PrecisionTime::parse("00:00:00.1234567"), None);
    }

    #[test]
    fn test_fraction_digits_for_built_values() {
        let built =
            PrecisionInstant::new(1_483_228_800_500_000, TimePrecision::Millisecond, TimeZone::Utc);
        assert_eq!(built.format().as_deref(), Some("2017-01-01T00:00:00.500Z"));
        let short = built.with_fraction_digits(1).unwrap();
        assert_eq!(short.format().as_deref(), Some("2017-01-01T00:00:00.5Z"));
        assert_eq!(built.with_fraction_digits(4), None);

        // digits the fraction cannot show are refused rather than cut off
        let lossy = PrecisionTime::new(1_234, TimePrecision::Millisecond);
        assert_eq!(lossy.format(), None);
        assert_eq!(PrecisionDateTime::new(0, DateTimePrecision::Day).with_fraction_digits(0), None);
    }

    #[test]
    fn test_leap_second_rejected() {
        assert_eq!(PrecisionTime::parse("23:59:60"), None);
        assert_eq!(PrecisionInstant::parse("2016-12-31T23:59:60Z"), None);
        assert_eq!(PrecisionDateTime::parse("2016-12-31T23:59:60Z"), None);
        assert_eq!(PrecisionTime::new(86_400_000_000, TimePrecision::Second).format(), None);
    }

    #[test]
    fn test_time_round_trip() {
        let time = PrecisionTime::parse("13:28:17.239").unwrap();
        assert_eq!(time.precision(), TimePrecision::Millisecond);
        assert_eq!(time, PrecisionTime::from_hms_milli(13, 28, 17, 239).unwrap());
        assert_eq!(time.format().as_deref(), Some("13:28:17.239"));
        assert_eq!(PrecisionTime::parse("25:00:00"), None);
    }

    #[test]
    fn test_instant_requires_time() {
        assert_eq!(PrecisionInstant::parse("2017-01-01"), None);
        let instant = PrecisionInstant::parse("2017-01-01T10:00:00-05:30").unwrap();
        assert_eq!(instant.timezone(), TimeZone::from_offset_minutes(-330).unwrap());
        assert_eq!(instant.format().as_deref(), Some("2017-01-01T10:00:00-05:30"));
    }

    #[test]
    fn test_timezone_parsing() {
        assert_eq!("Z".parse::<TimeZone>(), Ok(TimeZone::Utc));
        assert_eq!(
            "+00:00".parse::<TimeZone>(),
            Ok(TimeZone::from_offset_minutes(0).unwrap())
        );
        assert_eq!("+00:00".parse::<TimeZone>().unwrap().to_string(), "+00:00");
        assert!("+15:00".parse::<TimeZone>().is_err());
        assert!("0100".parse::<TimeZone>().is_err());
        assert_eq!(TimeZone::from_offset_minutes(i32::MAX), None);
    }
}
