//! Durations and chrono date types.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use super::Configurable;
use crate::conversion::{ConversionInstance, ConversionResult};
use crate::converter::Converter;
use crate::shape::Shape;
use crate::tree::ConfigSection;
use crate::{BindResult, Culture, ParseFailure};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;
const FRACTION_DIGITS: usize = 9;

macro_rules! temporal_configurable {
    ($ty:ty, $default:expr, $parse:path) => {
        impl Configurable for $ty {
            fn shape() -> Shape {
                Shape::Simple
            }

            fn construct() -> Option<Self> {
                $default
            }

            fn parse(raw: &str, culture: &Culture) -> Option<Result<Self, ParseFailure>> {
                Some($parse(raw.trim(), culture))
            }

            fn convert(
                converter: &Converter,
                section: &dyn ConfigSection,
                instance: ConversionInstance<'_, Self>,
            ) -> BindResult<ConversionResult<Self>> {
                converter.convert_simple(section, instance)
            }
        }
    };
}

temporal_configurable!(Duration, Some(Duration::ZERO), duration_in);
temporal_configurable!(NaiveDate, epoch_date(), naive_date_in);
temporal_configurable!(NaiveDateTime, epoch(), naive_date_time_in);
temporal_configurable!(DateTime<Utc>, epoch().map(|value| value.and_utc()), utc_in);
temporal_configurable!(
    DateTime<FixedOffset>,
    epoch().map(|value| value.and_utc().fixed_offset()),
    fixed_offset_in
);

fn epoch_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
}

fn epoch() -> Option<NaiveDateTime> {
    epoch_date().and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn duration_in(text: &str, _culture: &Culture) -> Result<Duration, ParseFailure> {
    parse_duration(text)
}

/// Parse a duration written as `[d.]hh:mm[:ss[.fffffffff]]` or as a whole
/// number of days.
///
/// Hours must be below 24 and minutes and seconds below 60 once a day
/// component is split off. Negative durations are rejected.
///
/// # Errors
///
/// Returns a parse failure describing the malformed component.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use config_binder::parse_duration;
///
/// let parsed = parse_duration("1.23:45:56").expect("valid duration");
/// assert_eq!(parsed, Duration::from_secs(171_956));
/// assert_eq!(parse_duration("2").ok(), Some(Duration::from_secs(172_800)));
/// ```
pub fn parse_duration(raw: &str) -> Result<Duration, ParseFailure> {
    let text = raw.trim();
    if text.starts_with('-') {
        return Err(format!("negative duration '{text}' is not supported").into());
    }
    let Some((head, rest)) = text.split_once(':') else {
        let days = text.parse::<u64>()?;
        return seconds(days, 0, 0, 0, text).map(Duration::from_secs);
    };
    let (days, hours) = match head.split_once('.') {
        Some((day_part, hour_part)) => (day_part.parse::<u64>()?, hour_part.parse::<u64>()?),
        None => (0, head.parse::<u64>()?),
    };
    let (minutes, tail) = match rest.split_once(':') {
        Some((minute_part, second_part)) => (minute_part.parse::<u64>()?, Some(second_part)),
        None => (rest.parse::<u64>()?, None),
    };
    let (secs, nanos) = match tail.map(|part| part.split_once('.').unwrap_or((part, ""))) {
        None => (0, 0),
        Some((whole, fraction)) => (whole.parse::<u64>()?, fraction_nanos(fraction, text)?),
    };
    if hours >= 24 || minutes >= 60 || secs >= 60 {
        return Err(format!("duration '{text}' has an out-of-range component").into());
    }
    let total = seconds(days, hours, minutes, secs, text)?;
    Ok(Duration::new(total, nanos))
}

fn seconds(days: u64, hours: u64, minutes: u64, secs: u64, text: &str) -> Result<u64, ParseFailure> {
    days.checked_mul(SECONDS_PER_DAY)
        .and_then(|total| total.checked_add(hours * SECONDS_PER_HOUR))
        .and_then(|total| total.checked_add(minutes * SECONDS_PER_MINUTE))
        .and_then(|total| total.checked_add(secs))
        .ok_or_else(|| format!("duration '{text}' overflows").into())
}

fn fraction_nanos(fraction: &str, text: &str) -> Result<u32, ParseFailure> {
    if fraction.is_empty() {
        return Ok(0);
    }
    if fraction.len() > FRACTION_DIGITS || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("duration '{text}' has an invalid fraction").into());
    }
    Ok(format!("{fraction:0<width$}", width = FRACTION_DIGITS).parse::<u32>()?)
}

fn naive_date_in(text: &str, culture: &Culture) -> Result<NaiveDate, ParseFailure> {
    parse_naive_date(text, culture)
        .ok_or_else(|| format!("'{text}' is not a recognised date").into())
}

fn naive_date_time_in(text: &str, culture: &Culture) -> Result<NaiveDateTime, ParseFailure> {
    parse_naive_date_time(text, culture)
        .ok_or_else(|| format!("'{text}' is not a recognised date and time").into())
}

fn utc_in(text: &str, culture: &Culture) -> Result<DateTime<Utc>, ParseFailure> {
    if let Ok(parsed) = text.parse::<DateTime<Utc>>() {
        return Ok(parsed);
    }
    naive_date_time_in(text, culture).map(|value| value.and_utc())
}

fn fixed_offset_in(text: &str, culture: &Culture) -> Result<DateTime<FixedOffset>, ParseFailure> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed);
    }
    naive_date_time_in(text, culture).map(|value| value.and_utc().fixed_offset())
}

fn parse_naive_date(text: &str, culture: &Culture) -> Option<NaiveDate> {
    text.parse::<NaiveDate>().ok().or_else(|| {
        culture
            .date_formats()
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    })
}

fn parse_naive_date_time(text: &str, culture: &Culture) -> Option<NaiveDateTime> {
    text.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| {
            culture
                .date_time_formats()
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        })
        .or_else(|| parse_naive_date(text, culture).and_then(|date| date.and_hms_opt(0, 0, 0)))
}
