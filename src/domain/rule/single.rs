use super::{Error, Fulfillment, Progress, matcher::key};
use crate::domain::{Course, Requirement};

/// Requires one specific course.
///
/// This is an all-or-nothing rule: it is either unfulfilled or fulfilled.
/// It never reports an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleCourse {
    course: Course,
    key: String,
    taken: Option<Course>,
}

impl SingleCourse {
    /// A rule satisfied by `course`.
    pub fn new(course: impl Into<Course>) -> Self {
        let course = course.into();
        let key = key(&course);
        Self {
            course,
            key,
            taken: None,
        }
    }

    /// The required course.
    #[must_use]
    pub const fn course(&self) -> &Course {
        &self.course
    }
}

impl Requirement for SingleCourse {
    type Error = Error;

    fn attempt_fulfill(&mut self, course: &Course) -> Result<(), Self::Error> {
        if self.taken.is_none() && key(course) == self.key {
            self.taken = Some(course.clone());
        }
        Ok(())
    }
}

impl Progress for SingleCourse {
    fn fulfillment(&self) -> Fulfillment {
        if self.taken.is_some() {
            Fulfillment::Fulfilled
        } else {
            Fulfillment::Unfulfilled
        }
    }

    fn matched(&self) -> &[Course] {
        self.taken.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_courses_are_ignored() {
        let mut rule = SingleCourse::new("MATH 2924");
        rule.attempt_fulfill(&Course::new("CS 1323")).unwrap();
        rule.attempt_fulfill(&Course::new("not even a code")).unwrap();
        assert_eq!(rule.fulfillment(), Fulfillment::Unfulfilled);
        assert!(rule.matched().is_empty());
    }

    #[test]
    fn matching_course_fulfills() {
        let mut rule = SingleCourse::new("MATH 2924");
        rule.attempt_fulfill(&Course::new("math2924")).unwrap();
        assert_eq!(rule.fulfillment(), Fulfillment::Fulfilled);
        assert_eq!(rule.matched(), &[Course::new("math2924")]);
    }

    #[test]
    fn repeats_keep_the_first_match() {
        let mut rule = SingleCourse::new("MATH 2924");
        rule.attempt_fulfill(&Course::new("MATH 2924")).unwrap();
        rule.attempt_fulfill(&Course::new("MATH2924")).unwrap();
        assert_eq!(rule.matched(), &[Course::new("MATH 2924")]);
    }
}
