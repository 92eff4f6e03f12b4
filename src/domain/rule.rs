//! Concrete requirement rules.
//!
//! Every rule implements [`Requirement`] for solving and [`Progress`] for
//! reading the result. [`Rule`] is the closed set of kinds a major
//! definition can use; the individual kinds can also be solved directly,
//! or mixed with custom requirements behind `dyn Requirement`.

use std::fmt;

mod count;
mod credits;
mod matcher;
mod single;

pub use count::CourseCount;
pub use credits::CreditHours;
pub use matcher::CourseSet;
pub use single::SingleCourse;

use crate::domain::{
    Config, Course, Requirement,
    code::{self, CatalogCode},
};
pub use crate::domain::{Fulfillment, Progress};

/// Errors a rule can report while evaluating a course.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A course the rule had to interpret could not be.
    #[error(transparent)]
    Code(#[from] code::Error),
}

/// How [`CreditHours`] reads credit hours from course codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePolicy {
    /// Whether a listed course that is not a catalog code is an error, or is
    /// ignored.
    pub strict: bool,
    /// Which digit of the course number encodes credit hours.
    pub credit_digit: usize,
}

impl Default for CodePolicy {
    fn default() -> Self {
        Self {
            strict: true,
            credit_digit: 1,
        }
    }
}

impl From<&Config> for CodePolicy {
    fn from(config: &Config) -> Self {
        Self {
            strict: config.strict_codes,
            credit_digit: config.credit_digit(),
        }
    }
}

impl CodePolicy {
    /// Parses `course`, applying the strictness policy.
    ///
    /// Returns `Ok(None)` for a malformed code when the policy is lenient.
    fn parse(self, course: &Course) -> Result<Option<CatalogCode>, Error> {
        match CatalogCode::parse(course) {
            Ok(code) => Ok(Some(code)),
            Err(e @ code::Error::Malformed(_)) if self.strict => Err(e.into()),
            Err(code::Error::Malformed(_)) => {
                tracing::trace!("ignoring malformed course code '{course}'");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// One of the built-in requirement kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A single named course.
    Course(SingleCourse),
    /// A number of distinct courses from a set.
    Count(CourseCount),
    /// A number of credit hours from a set.
    Credits(CreditHours),
}

impl Requirement for Rule {
    type Error = Error;

    fn attempt_fulfill(&mut self, course: &Course) -> Result<(), Self::Error> {
        match self {
            Self::Course(rule) => rule.attempt_fulfill(course),
            Self::Count(rule) => rule.attempt_fulfill(course),
            Self::Credits(rule) => rule.attempt_fulfill(course),
        }
    }
}

impl Progress for Rule {
    fn fulfillment(&self) -> Fulfillment {
        match self {
            Self::Course(rule) => rule.fulfillment(),
            Self::Count(rule) => rule.fulfillment(),
            Self::Credits(rule) => rule.fulfillment(),
        }
    }

    fn matched(&self) -> &[Course] {
        match self {
            Self::Course(rule) => rule.matched(),
            Self::Count(rule) => rule.matched(),
            Self::Credits(rule) => rule.matched(),
        }
    }
}

impl From<SingleCourse> for Rule {
    fn from(rule: SingleCourse) -> Self {
        Self::Course(rule)
    }
}

impl From<CourseCount> for Rule {
    fn from(rule: CourseCount) -> Self {
        Self::Count(rule)
    }
}

impl From<CreditHours> for Rule {
    fn from(rule: CreditHours) -> Self {
        Self::Credits(rule)
    }
}

impl Rule {
    /// A short name for the kind of rule.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Course(_) => "course",
            Self::Count(_) => "count",
            Self::Credits(_) => "credits",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Course(rule) => write!(f, "{}", rule.course()),
            Self::Count(rule) => write!(f, "{} of {}", rule.needed(), rule.from()),
            Self::Credits(rule) => write!(f, "{} credits from {}", rule.needed(), rule.from()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_policy_ignores_malformed_codes() {
        let policy = CodePolicy {
            strict: false,
            ..CodePolicy::default()
        };
        assert_eq!(policy.parse(&Course::new("bogus")), Ok(None));
    }

    #[test]
    fn strict_policy_rejects_malformed_codes() {
        let policy = CodePolicy::default();
        assert_eq!(
            policy.parse(&Course::new("bogus")),
            Err(Error::Code(code::Error::Malformed(Course::new("bogus"))))
        );
    }

    #[test]
    fn policy_follows_config() {
        let config: Config =
            toml::from_str("_version = \"1\"\nstrict_codes = false\ncredit_digit = 3").unwrap();
        let policy = CodePolicy::from(&config);
        assert!(!policy.strict);
        assert_eq!(policy.credit_digit, 3);
    }

    #[test]
    fn display_summarises_the_rule() {
        assert_eq!(Rule::from(SingleCourse::new("MATH 2513")).to_string(), "MATH 2513");
        assert_eq!(
            Rule::from(CourseCount::new(2, CourseSet::listed(["CS 1323", "CS 1324"])))
                .to_string(),
            "2 of CS 1323, CS 1324"
        );
        assert_eq!(
            Rule::from(CreditHours::new(12, CourseSet::subject("CS", Some(4000)))).to_string(),
            "12 credits from CS 4000+"
        );
    }

    #[test]
    fn rule_dispatches_to_its_variant() {
        let mut rule = Rule::from(SingleCourse::new("CS 1323"));
        assert_eq!(rule.kind(), "course");
        rule.attempt_fulfill(&Course::new("CS 1324")).unwrap();
        assert_eq!(rule.fulfillment(), Fulfillment::Unfulfilled);
        rule.attempt_fulfill(&Course::new("CS 1323")).unwrap();
        assert_eq!(rule.fulfillment(), Fulfillment::Fulfilled);
        assert_eq!(rule.matched(), &[Course::new("CS 1323")]);
    }
}
