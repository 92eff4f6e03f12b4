use std::{collections::BTreeSet, fmt};

use crate::domain::{Course, code::CatalogCode};

/// The courses a rule draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseSet {
    /// An explicit list of courses.
    ///
    /// Catalog codes are compared in normalised form, so `cs1323` and
    /// `CS 1323` are the same course. Other identifiers must match exactly.
    Listed(BTreeSet<String>),

    /// Every course with the given subject, optionally at or above a level.
    Subject {
        /// Uppercase subject prefix, e.g. `CS`.
        subject: String,
        /// Lowest course level that counts, e.g. `4000`.
        min_level: Option<u16>,
    },
}

impl CourseSet {
    /// A set containing exactly the given courses.
    #[must_use]
    pub fn listed<I, C>(courses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Course>,
    {
        Self::Listed(courses.into_iter().map(|c| key(&c.into())).collect())
    }

    /// All courses in `subject`, from `min_level` up if given.
    #[must_use]
    pub fn subject(subject: impl Into<String>, min_level: Option<u16>) -> Self {
        Self::Subject {
            subject: subject.into().to_ascii_uppercase(),
            min_level,
        }
    }

    /// Whether `course` is in the set.
    ///
    /// A subject set only holds catalog codes, so any other name is simply
    /// outside it.
    pub(super) fn contains(&self, course: &Course) -> bool {
        match self {
            Self::Listed(courses) => courses.contains(&key(course)),
            Self::Subject { subject, min_level } => CatalogCode::parse(course).is_ok_and(|code| {
                code.subject() == subject && min_level.is_none_or(|level| code.level() >= level)
            }),
        }
    }
}

impl fmt::Display for CourseSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Listed(courses) => {
                for (i, course) in courses.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{course}")?;
                }
                Ok(())
            }
            Self::Subject {
                subject,
                min_level: Some(level),
            } => write!(f, "{subject} {level}+"),
            Self::Subject {
                subject,
                min_level: None,
            } => write!(f, "any {subject}"),
        }
    }
}

/// Courses already counted by a rule, in the order they were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Applied {
    keys: BTreeSet<String>,
    courses: Vec<Course>,
}

impl Applied {
    pub(super) fn contains(&self, course: &Course) -> bool {
        self.keys.contains(&key(course))
    }

    /// Records `course`, returning `false` if it was already counted.
    pub(super) fn record(&mut self, course: &Course) -> bool {
        let inserted = self.keys.insert(key(course));
        if inserted {
            self.courses.push(course.clone());
        }
        inserted
    }

    pub(super) fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub(super) fn len(&self) -> usize {
        self.courses.len()
    }
}

/// The comparison key for a course in a listed set.
pub(super) fn key(course: &Course) -> String {
    CatalogCode::parse(course).map_or_else(|_| course.to_string(), |code| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(set: &CourseSet, course: &str) -> bool {
        set.contains(&Course::new(course))
    }

    #[test]
    fn listed_courses_compare_normalised() {
        let set = CourseSet::listed(["cs1323", "Capstone"]);
        assert!(contains(&set, "CS 1323"));
        assert!(contains(&set, "CS1323"));
        assert!(contains(&set, "Capstone"));
        assert!(!contains(&set, "capstone"));
        assert!(!contains(&set, "CS 1324"));
    }

    #[test]
    fn subject_respects_minimum_level() {
        let set = CourseSet::subject("cs", Some(4000));
        assert!(contains(&set, "CS 4323"));
        assert!(contains(&set, "cs4413"));
        assert!(!contains(&set, "CS 3113"));
        assert!(!contains(&set, "MATH 4323"));
    }

    #[test]
    fn subject_never_holds_other_names() {
        let set = CourseSet::subject("CS", None);
        assert!(contains(&set, "CS 0123"));
        assert!(!contains(&set, "Capstone"));
        assert!(!contains(&set, "CS"));
        assert!(!contains(&set, ""));
    }

    #[test]
    fn display_describes_the_set() {
        assert_eq!(
            CourseSet::listed(["CS 1324", "cs1323"]).to_string(),
            "CS 1323, CS 1324"
        );
        assert_eq!(CourseSet::subject("cs", Some(4000)).to_string(), "CS 4000+");
        assert_eq!(CourseSet::subject("MATH", None).to_string(), "any MATH");
    }

    #[test]
    fn applied_courses_are_recorded_once() {
        let mut applied = Applied::default();
        assert!(applied.record(&Course::new("CS 1323")));
        assert!(!applied.record(&Course::new("cs1323")));
        assert!(applied.contains(&Course::new("CS1323")));
        assert_eq!(applied.courses(), &[Course::new("CS 1323")]);
        assert_eq!(applied.len(), 1);
    }
}
