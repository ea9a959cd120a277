//! Culture-specific conventions applied when parsing scalar strings.
//!
//! A [`Culture`] is derived from a `unic_langid` language identifier and
//! supplies the decimal separator, the digit-group separator, and the day and
//! month order used for short date forms. Configuration read from JSON is
//! culture invariant; flat key/value sources written by hand often are not.

use std::fmt;
use std::str::FromStr;

use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// Languages writing a comma as the decimal separator.
const COMMA_DECIMAL: &[&str] = &[
    "cs", "da", "de", "es", "fi", "fr", "hu", "id", "it", "nb", "nl", "nn", "no", "pl", "pt",
    "ro", "ru", "sv", "tr", "uk",
];

/// Comma-decimal languages that group digits with a dot rather than a space.
const DOT_GROUP: &[&str] = &["da", "de", "es", "id", "it", "nl", "pt", "ro", "tr"];

const DAY_FIRST_DATE_TIMES: &[&str] = &[
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
];
const DAY_FIRST_DATES: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];

const MONTH_FIRST_DATE_TIMES: &[&str] = &[
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
];
const MONTH_FIRST_DATES: &[&str] = &["%m/%d/%Y"];

/// Number and date conventions for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    id: LanguageIdentifier,
    decimal: char,
    group: char,
    day_first: bool,
}

impl Culture {
    /// The culture-invariant conventions: `.` decimals, `,` grouping and
    /// month-first short dates.
    #[must_use]
    pub fn invariant() -> Self {
        Self {
            id: LanguageIdentifier::default(),
            decimal: '.',
            group: ',',
            day_first: false,
        }
    }

    /// Derive the conventions for `id`.
    ///
    /// Unknown languages fall back to the invariant separators. Short dates
    /// are day-first for every language except undetermined and US English.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_binder::Culture;
    /// use unic_langid::langid;
    ///
    /// let de = Culture::from_langid(langid!("de-DE"));
    /// assert_eq!(de.decimal_separator(), ',');
    /// ```
    #[must_use]
    pub fn from_langid(id: LanguageIdentifier) -> Self {
        let language = id.language.as_str();
        let comma_decimal = COMMA_DECIMAL.contains(&language);
        let (decimal, group) = match (comma_decimal, DOT_GROUP.contains(&language)) {
            (false, _) => ('.', ','),
            (true, true) => (',', '.'),
            (true, false) => (',', '\u{a0}'),
        };
        let month_first = language == "und"
            || (language == "en" && id.region.is_none_or(|region| region.as_str() == "US"));
        Self {
            id,
            decimal,
            group,
            day_first: !month_first,
        }
    }

    /// The underlying language identifier.
    #[must_use]
    pub const fn langid(&self) -> &LanguageIdentifier {
        &self.id
    }

    /// Character separating integral and fractional digits.
    #[must_use]
    pub const fn decimal_separator(&self) -> char {
        self.decimal
    }

    /// Character separating digit groups.
    #[must_use]
    pub const fn group_separator(&self) -> char {
        self.group
    }

    /// Whether short dates place the day before the month.
    #[must_use]
    pub const fn day_first(&self) -> bool {
        self.day_first
    }

    /// Rewrite a culture-formatted decimal into the invariant form accepted by
    /// Rust's float parsers.
    ///
    /// Only the decimal separator is translated. Group separators are not
    /// accepted, so they are left in place for the float parser to reject.
    /// Returns `None` when a comma-decimal culture sees a `.`, which would
    /// otherwise be read as a decimal point.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_binder::Culture;
    /// use unic_langid::langid;
    ///
    /// let de = Culture::from_langid(langid!("de-DE"));
    /// assert_eq!(de.normalize_decimal("42,1").as_deref(), Some("42.1"));
    /// assert_eq!(de.normalize_decimal("1.5"), None);
    /// ```
    #[must_use]
    pub fn normalize_decimal(&self, raw: &str) -> Option<String> {
        let text = raw.trim();
        if self.decimal != '.' && text.contains('.') {
            return None;
        }
        Some(
            text.chars()
                .map(|ch| if ch == self.decimal { '.' } else { ch })
                .collect(),
        )
    }

    pub(crate) const fn date_time_formats(&self) -> &'static [&'static str] {
        if self.day_first {
            DAY_FIRST_DATE_TIMES
        } else {
            MONTH_FIRST_DATE_TIMES
        }
    }

    pub(crate) const fn date_formats(&self) -> &'static [&'static str] {
        if self.day_first {
            DAY_FIRST_DATES
        } else {
            MONTH_FIRST_DATES
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

impl From<LanguageIdentifier> for Culture {
    fn from(id: LanguageIdentifier) -> Self {
        Self::from_langid(id)
    }
}

impl FromStr for Culture {
    type Err = LanguageIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::invariant());
        }
        trimmed.parse::<LanguageIdentifier>().map(Self::from_langid)
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use rstest::rstest;

    use super::Culture;

    #[rstest]
    #[case::invariant("", " 42.5 ", Some("42.5"))]
    #[case::invariant_comma_kept("", "1,5", Some("1,5"))]
    #[case::english("en-US", "42.1", Some("42.1"))]
    #[case::german("de-DE", "42,1", Some("42.1"))]
    #[case::german_dot("de-DE", "1.5", None)]
    #[case::german_grouped("de-DE", "1.234,5", None)]
    #[case::french_space_kept("fr-FR", "1 234,5", Some("1 234.5"))]
    fn normalizes_decimals(
        #[case] culture: &str,
        #[case] raw: &str,
        #[case] expected: Option<&str>,
    ) -> Result<()> {
        let parsed: Culture = culture.parse()?;
        assert_eq!(parsed.normalize_decimal(raw).as_deref(), expected);
        Ok(())
    }

    #[rstest]
    #[case::invariant("", false)]
    #[case::us("en-US", false)]
    #[case::bare_english("en", false)]
    #[case::british("en-GB", true)]
    #[case::german("de-DE", true)]
    fn selects_date_order(#[case] culture: &str, #[case] day_first: bool) -> Result<()> {
        let parsed: Culture = culture.parse()?;
        assert_eq!(parsed.day_first(), day_first);
        Ok(())
    }

    #[rstest]
    fn rejects_malformed_identifiers() {
        assert!("not a language!".parse::<Culture>().is_err());
    }
}
