use super::{
    Error, Fulfillment, Progress,
    matcher::{Applied, CourseSet},
};
use crate::domain::{Course, Requirement};

/// Requires a number of distinct courses from a [`CourseSet`].
///
/// A course taken twice counts once, so replaying a transcript does not
/// inflate the count. Only membership matters, so this rule never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCount {
    needed: u32,
    from: CourseSet,
    applied: Applied,
}

impl CourseCount {
    /// A rule needing `needed` courses from `from`.
    #[must_use]
    pub fn new(needed: u32, from: CourseSet) -> Self {
        Self {
            needed,
            from,
            applied: Applied::default(),
        }
    }

    /// The number of courses needed.
    #[must_use]
    pub const fn needed(&self) -> u32 {
        self.needed
    }

    /// The courses this rule draws from.
    #[must_use]
    pub const fn from(&self) -> &CourseSet {
        &self.from
    }
}

impl Requirement for CourseCount {
    type Error = Error;

    fn attempt_fulfill(&mut self, course: &Course) -> Result<(), Self::Error> {
        if self.from.contains(course) {
            self.applied.record(course);
        }
        Ok(())
    }
}

impl Progress for CourseCount {
    fn fulfillment(&self) -> Fulfillment {
        let earned = u32::try_from(self.applied.len()).unwrap_or(u32::MAX);
        Fulfillment::from_progress(earned, self.needed)
    }

    fn matched(&self) -> &[Course] {
        self.applied.courses()
    }
}
