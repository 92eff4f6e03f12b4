//! Replays completed courses against a set of requirements.

use tracing::instrument;

use crate::domain::{Course, Requirement};

/// Drives a solve pass: every course is offered to every requirement.
///
/// The solver borrows both collections and owns neither. Requirements are
/// borrowed mutably for as long as the solver lives, so the caller reads
/// their state once the solver has been dropped.
///
/// Courses are offered in the order given, and for each course the
/// requirements are visited in the order given. Nothing is reordered,
/// deduplicated or filtered, and a course that counts towards one
/// requirement is still offered to all the others.
///
/// # Examples
///
/// ```
/// use audit::{
///     domain::rule::{CourseCount, CourseSet, Rule, SingleCourse},
///     Course, Progress, Solver,
/// };
///
/// let courses: Vec<Course> = ["CS101", "MATH201", "CS102"]
///     .into_iter()
///     .map(Course::new)
///     .collect();
///
/// let mut requirements = vec![
///     Rule::Count(CourseCount::new(
///         2,
///         CourseSet::listed(["CS101", "CS102"]),
///     )),
///     Rule::Course(SingleCourse::new("MATH201")),
/// ];
///
/// Solver::new(&courses, &mut requirements).solve().unwrap();
///
/// assert!(requirements.iter().all(|r| r.fulfillment().is_satisfied()));
/// ```
#[derive(Debug)]
pub struct Solver<'a, R> {
    courses: &'a [Course],
    requirements: &'a mut [R],
}

impl<'a, R: Requirement> Solver<'a, R> {
    /// Creates a solver over the given courses and requirements.
    #[must_use]
    pub const fn new(courses: &'a [Course], requirements: &'a mut [R]) -> Self {
        Self {
            courses,
            requirements,
        }
    }

    /// The courses that will be replayed, in order.
    #[must_use]
    pub const fn courses(&self) -> &[Course] {
        self.courses
    }

    /// The requirements courses will be offered to, in order.
    #[must_use]
    pub const fn requirements(&self) -> &[R] {
        self.requirements
    }

    /// Offers each course, in order, to each requirement, in order.
    ///
    /// Calling this again replays the same courses against requirements
    /// that already carry state from the previous pass.
    ///
    /// # Errors
    ///
    /// The first error returned by a requirement aborts the pass and is
    /// returned unchanged. Requirements already offered a course keep the
    /// state they reached; nothing is rolled back.
    #[instrument(
        level = "debug",
        skip_all,
        fields(courses = self.courses.len(), requirements = self.requirements.len())
    )]
    pub fn solve(&mut self) -> Result<(), R::Error> {
        for course in self.courses {
            for requirement in self.requirements.iter_mut() {
                requirement.attempt_fulfill(course)?;
            }
        }
        Ok(())
    }
}
