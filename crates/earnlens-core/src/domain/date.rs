use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date rendered as `YYYY-MM-DD`.
///
/// Daily bars and disclosure dates carry no time component, so the whole
/// domain keys on plain dates and joins on exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(Date);

impl IsoDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(value: Date) -> Self {
        Self(value)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }
}

impl Display for IsoDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .0
            .format(DATE_FORMAT)
            .expect("IsoDate must be formattable as YYYY-MM-DD");
        f.write_str(&rendered)
    }
}

impl From<Date> for IsoDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_renders_iso_date() {
        let parsed = IsoDate::parse("2020-04-29").expect("must parse");
        assert_eq!(parsed.to_string(), "2020-04-29");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let parsed = IsoDate::parse(" 2020-04-29 ").expect("must parse");
        assert_eq!(parsed.to_string(), "2020-04-29");
    }

    #[test]
    fn rejects_non_date_input() {
        let err = IsoDate::parse("Apr 29, 2020").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn orders_chronologically() {
        let older = IsoDate::parse("2020-04-24").expect("must parse");
        let newer = IsoDate::parse("2020-04-29").expect("must parse");
        assert!(older < newer);
    }
}
