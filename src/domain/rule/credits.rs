use super::{
    CodePolicy, Error, Fulfillment, Progress,
    matcher::{Applied, CourseSet},
};
use crate::domain::{Course, Requirement, code::CatalogCode};

/// Requires a number of credit hours from a [`CourseSet`].
///
/// Credit hours are read from the course number (see
/// [`CatalogCode::credit_hours`]), so every relevant course must have a
/// parseable catalog code. Subject sets only ever hold catalog codes. A
/// listed course that is not one is an error under a strict [`CodePolicy`]
/// and is skipped otherwise. Courses outside the set are never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditHours {
    needed: u32,
    from: CourseSet,
    policy: CodePolicy,
    earned: u32,
    applied: Applied,
}

impl CreditHours {
    /// A rule needing `needed` credit hours from `from`.
    #[must_use]
    pub fn new(needed: u32, from: CourseSet) -> Self {
        Self {
            needed,
            from,
            policy: CodePolicy::default(),
            earned: 0,
            applied: Applied::default(),
        }
    }

    /// Sets how course codes are interpreted.
    #[must_use]
    pub const fn with_policy(mut self, policy: CodePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The number of credit hours needed.
    #[must_use]
    pub const fn needed(&self) -> u32 {
        self.needed
    }

    /// Credit hours counted so far.
    #[must_use]
    pub const fn earned(&self) -> u32 {
        self.earned
    }

    /// The courses this rule draws from.
    #[must_use]
    pub const fn from(&self) -> &CourseSet {
        &self.from
    }

    /// The parsed code of `course` if it belongs to this rule.
    fn relevant_code(&self, course: &Course) -> Result<Option<CatalogCode>, Error> {
        if !self.from.contains(course) {
            return Ok(None);
        }
        self.policy.parse(course)
    }
}

impl Requirement for CreditHours {
    type Error = Error;

    fn attempt_fulfill(&mut self, course: &Course) -> Result<(), Self::Error> {
        if self.applied.contains(course) {
            return Ok(());
        }
        let Some(code) = self.relevant_code(course)? else {
            return Ok(());
        };
        let credits = code.credit_hours(self.policy.credit_digit)?;
        self.applied.record(course);
        self.earned = self.earned.saturating_add(credits);
        Ok(())
    }
}

impl Progress for CreditHours {
    fn fulfillment(&self) -> Fulfillment {
        Fulfillment::from_progress(self.earned, self.needed)
    }

    fn matched(&self) -> &[Course] {
        self.applied.courses()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::code;

    fn offer(rule: &mut CreditHours, courses: &[&str]) -> Result<(), Error> {
        courses
            .iter()
            .try_for_each(|c| rule.attempt_fulfill(&Course::new(*c)))
    }

    #[test]
    fn sums_credit_hours_of_matching_courses() {
        let mut rule = CreditHours::new(9, CourseSet::subject("CS", Some(4000)));
        offer(&mut rule, &["CS 4323", "CS 2413", "CS 4413"]).unwrap();
        assert_eq!(rule.earned(), 7);
        assert_eq!(
            rule.fulfillment(),
            Fulfillment::Partial {
                earned: 7,
                needed: 9
            }
        );
        offer(&mut rule, &["CS 4273"]).unwrap();
        assert_eq!(rule.fulfillment(), Fulfillment::Fulfilled);
    }

    #[test]
    fn repeated_course_is_counted_once() {
        let mut rule = CreditHours::new(6, CourseSet::listed(["ENGL 1113"]));
        offer(&mut rule, &["ENGL 1113", "ENGL 1113"]).unwrap();
        assert_eq!(rule.earned(), 1);
    }

    #[test]
    fn irrelevant_malformed_course_is_not_an_error() {
        let mut rule = CreditHours::new(3, CourseSet::listed(["CS 1323"]));
        offer(&mut rule, &["Study Abroad"]).unwrap();
        assert_eq!(rule.fulfillment(), Fulfillment::Unfulfilled);
    }

    #[test]
    fn listed_malformed_course_is_an_error_when_strict() {
        let mut rule = CreditHours::new(3, CourseSet::listed(["Study Abroad"]));
        let error = offer(&mut rule, &["Study Abroad"]).unwrap_err();
        assert_eq!(
            error,
            Error::Code(code::Error::Malformed(Course::new("Study Abroad")))
        );
        assert!(rule.matched().is_empty());
    }

    #[test]
    fn credit_digit_comes_from_policy() {
        let policy = CodePolicy {
            credit_digit: 3,
            ..CodePolicy::default()
        };
        let mut rule = CreditHours::new(4, CourseSet::subject("CS", None)).with_policy(policy);
        offer(&mut rule, &["CS 1324"]).unwrap();
        assert_eq!(rule.fulfillment(), Fulfillment::Fulfilled);
    }

    #[test]
    fn subject_set_skips_names_that_are_not_catalog_codes() {
        let mut rule = CreditHours::new(3, CourseSet::subject("CS", None));
        offer(&mut rule, &["Capstone", "CS 4323"]).unwrap();
        assert_eq!(rule.fulfillment(), Fulfillment::Fulfilled);
        assert_eq!(rule.matched(), &[Course::new("CS 4323")]);
    }

    #[test]
    fn listed_malformed_course_is_skipped_when_lenient() {
        let policy = CodePolicy {
            strict: false,
            ..CodePolicy::default()
        };
        let mut rule =
            CreditHours::new(3, CourseSet::listed(["Study Abroad", "CS 4323"])).with_policy(policy);
        offer(&mut rule, &["Study Abroad", "CS 4323"]).unwrap();
        assert_eq!(rule.earned(), 3);
        assert_eq!(rule.matched(), &[Course::new("CS 4323")]);
    }

    #[test]
    fn out_of_range_credit_digit_is_always_an_error() {
        let policy = CodePolicy {
            strict: false,
            credit_digit: 7,
        };
        let mut rule = CreditHours::new(4, CourseSet::subject("CS", None)).with_policy(policy);
        let error = offer(&mut rule, &["CS 1324"]).unwrap_err();
        assert_eq!(error, Error::Code(code::Error::CreditDigit(7)));
    }
}
