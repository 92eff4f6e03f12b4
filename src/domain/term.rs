use std::fmt;

use serde::Serialize;

use crate::domain::{
    Course,
    code::{self, CatalogCode},
};

/// Most credit hours a regular term should carry.
pub const MAX_HOURS: u32 = 19;

/// Most credit hours a summer term should carry.
pub const MAX_SUMMER_HOURS: u32 = 15;

/// Fewest credit hours a term with any credit should carry.
pub const MIN_HOURS: u32 = 12;

/// A named group of courses taken together, e.g. `Fall 2023`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    name: String,
    courses: Vec<Course>,
}

impl Term {
    /// A term with the given courses.
    #[must_use]
    pub fn new(name: impl Into<String>, courses: Vec<Course>) -> Self {
        Self {
            name: name.into(),
            courses,
        }
    }

    /// The term's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The courses taken this term, in order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Whether this is a summer term, which has a lower limit.
    #[must_use]
    pub fn is_summer(&self) -> bool {
        self.name
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("summer"))
    }

    /// Totals the credit hours of this term.
    ///
    /// Courses without a catalog code carry no known hours and are listed
    /// in [`Load::unrated`].
    ///
    /// # Errors
    ///
    /// Returns [`code::Error::CreditDigit`] if `credit_digit` is out of range.
    pub fn load(&self, credit_digit: usize) -> Result<Load, code::Error> {
        let mut hours = 0u32;
        let mut unrated = Vec::new();
        for course in &self.courses {
            match CatalogCode::parse(course) {
                Ok(code) => hours = hours.saturating_add(code.credit_hours(credit_digit)?),
                Err(_) => unrated.push(course.clone()),
            }
        }

        let limit = if self.is_summer() {
            MAX_SUMMER_HOURS
        } else {
            MAX_HOURS
        };
        let warning = if hours > limit {
            Some(LoadWarning::Overload { limit })
        } else if hours > 0 && hours < MIN_HOURS {
            Some(LoadWarning::Underload { minimum: MIN_HOURS })
        } else {
            None
        };

        Ok(Load {
            hours,
            unrated,
            warning,
        })
    }
}

/// The credit load of a [`Term`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Load {
    /// Credit hours of courses with a catalog code.
    pub hours: u32,
    /// Courses whose hours could not be read.
    pub unrated: Vec<Course>,
    /// Set when the load is outside the usual range.
    pub warning: Option<LoadWarning>,
}

/// Why a term's credit load stands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// More hours than the term allows.
    Overload {
        /// The limit that was exceeded.
        limit: u32,
    },
    /// Fewer hours than a full-time load.
    Underload {
        /// The minimum full-time load.
        minimum: u32,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Overload { limit } => write!(f, "over the {limit} hour limit"),
            Self::Underload { minimum } => write!(f, "under the {minimum} hour minimum"),
        }
    }
}
