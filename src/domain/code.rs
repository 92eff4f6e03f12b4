use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::domain::Course;

static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{1,5})\s*([0-9]{4})$").expect("catalog code pattern is valid")
});

/// A parsed catalog code of the form `SUBJECT NNNN`.
///
/// Subjects are 1-5 ASCII letters and are normalised to uppercase. The
/// number is always four digits. By convention the first digit gives the
/// course level and one of the remaining digits encodes credit hours
/// (`CS 2413` is a 2000-level, 4 credit course).
///
/// # Examples
///
/// ```
/// use audit::domain::{code::CatalogCode, Course};
///
/// let code = CatalogCode::parse(&Course::new("cs 4323")).unwrap();
/// assert_eq!(code.subject(), "CS");
/// assert_eq!(code.level(), 4000);
/// assert_eq!(code.credit_hours(1).unwrap(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatalogCode {
    subject: String,
    number: u16,
    digits: [u8; 4],
}

impl CatalogCode {
    /// Parses a course identifier as a catalog code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the identifier is not of the form
    /// `SUBJECT NNNN`.
    pub fn parse(course: &Course) -> Result<Self, Error> {
        let captures = CODE_PATTERN
            .captures(course.as_str())
            .ok_or_else(|| Error::Malformed(course.clone()))?;

        let subject = captures[1].to_ascii_uppercase();
        let raw = &captures[2];

        let mut digits = [0u8; 4];
        for (slot, byte) in digits.iter_mut().zip(raw.bytes()) {
            *slot = byte - b'0';
        }
        let number = digits
            .iter()
            .fold(0u16, |acc, digit| acc * 10 + u16::from(*digit));

        Ok(Self {
            subject,
            number,
            digits,
        })
    }

    /// The subject prefix, uppercased.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The four digit course number.
    #[must_use]
    pub const fn number(&self) -> u16 {
        self.number
    }

    /// The course level, e.g. `4000` for `CS 4323`.
    #[must_use]
    pub const fn level(&self) -> u16 {
        self.number / 1000 * 1000
    }

    /// Credit hours, read from the digit at `digit` (0-based) of the number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CreditDigit`] if `digit` is not in `0..4`.
    pub fn credit_hours(&self, digit: usize) -> Result<u32, Error> {
        self.digits
            .get(digit)
            .map(|d| u32::from(*d))
            .ok_or(Error::CreditDigit(digit))
    }
}

impl fmt::Display for CatalogCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {:04}", self.subject, self.number)
    }
}

/// Errors that can occur while interpreting catalog codes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The course identifier is not a catalog code.
    #[error("Malformed course code '{0}': expected SUBJECT NNNN, e.g. 'CS 1323'")]
    Malformed(Course),

    /// The configured credit digit is outside the four digit number.
    #[error("Invalid credit digit {0}: course numbers have four digits (0-3)")]
    CreditDigit(usize),
}
