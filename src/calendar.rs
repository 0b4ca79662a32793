use crate::core::units::DAYS_IN_MONTH;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

pub const MONTHS_IN_YEAR: usize = 12;

/// A calendar month. Variants are declared in Gregorian order, so iterating with
/// `Month::iter()` and comparing with `Ord` both follow the calendar.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Month {
    #[strum(to_string = "January", serialize = "Jan")]
    January,
    #[strum(to_string = "February", serialize = "Feb")]
    February,
    #[strum(to_string = "March", serialize = "Mar")]
    March,
    #[strum(to_string = "April", serialize = "Apr")]
    April,
    #[strum(to_string = "May")]
    May,
    #[strum(to_string = "June", serialize = "Jun")]
    June,
    #[strum(to_string = "July", serialize = "Jul")]
    July,
    #[strum(to_string = "August", serialize = "Aug")]
    August,
    #[strum(to_string = "September", serialize = "Sep")]
    September,
    #[strum(to_string = "October", serialize = "Oct")]
    October,
    #[strum(to_string = "November", serialize = "Nov")]
    November,
    #[strum(to_string = "December", serialize = "Dec")]
    December,
}

impl Month {
    /// Zero-based position in the calendar (January = 0).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Three-letter capitalised form, e.g. "Jan".
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        }
    }

    /// Number of days in the month for a non-leap year.
    pub fn days(&self) -> u32 {
        DAYS_IN_MONTH[self.index()]
    }

    /// Match a table column header such as "JAN" or "jan" against the three-letter abbreviations.
    pub fn from_column_header(header: &str) -> Option<Month> {
        let header = header.trim();
        Month::iter().find(|month| month.abbreviation().eq_ignore_ascii_case(header))
    }
}
