//! Scalar implementations: numbers, booleans, text, paths, and UUIDs.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use uuid::Uuid;

use super::Configurable;
use crate::conversion::{ConversionInstance, ConversionResult};
use crate::converter::Converter;
use crate::shape::Shape;
use crate::tree::ConfigSection;
use crate::{BindResult, Culture, ParseFailure};

/// Implement `Configurable` for scalar types with a custom parse body.
macro_rules! simple_configurable {
    ($ty:ty, $default:expr, |$raw:ident, $culture:ident| $parse:expr) => {
        impl Configurable for $ty {
            fn shape() -> Shape {
                Shape::Simple
            }

            fn construct() -> Option<Self> {
                Some($default)
            }

            fn parse($raw: &str, $culture: &Culture) -> Option<Result<Self, ParseFailure>> {
                Some($parse)
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

macro_rules! integer_configurable {
    ($($ty:ty),* $(,)?) => {
        $(
            simple_configurable!($ty, 0, |raw, _culture| {
                raw.trim().parse::<$ty>().map_err(Into::into)
            });
        )*
    };
}

macro_rules! float_configurable {
    ($($ty:ty),* $(,)?) => {
        $(
            simple_configurable!($ty, 0.0, |raw, culture| {
                culture.normalize_decimal(raw).map_or_else(
                    || Err(format!("'{raw}' uses a separator the culture does not accept").into()),
                    |text| text.parse::<$ty>().map_err(Into::into),
                )
            });
        )*
    };
}

integer_configurable!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);
float_configurable!(f32, f64);

simple_configurable!(bool, false, |raw, _culture| parse_bool(raw));
simple_configurable!(char, '\0', |raw, _culture| raw
    .parse::<char>()
    .map_err(Into::into));
simple_configurable!(String, String::new(), |raw, _culture| Ok(raw.to_owned()));
simple_configurable!(PathBuf, PathBuf::new(), |raw, _culture| Ok(PathBuf::from(raw)));
simple_configurable!(Utf8PathBuf, Utf8PathBuf::new(), |raw, _culture| Ok(
    Utf8PathBuf::from(raw)
));
simple_configurable!(Uuid, Uuid::nil(), |raw, _culture| Uuid::parse_str(raw.trim())
    .map_err(Into::into));

fn parse_bool(raw: &str) -> Result<bool, ParseFailure> {
    let text = raw.trim();
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("'{text}' is not a valid boolean").into())
    }
}
