//! Major definitions stored as YAML.
//!
//! ```yaml
//! name: Computer Science (BS)
//! requirements:
//!   - title: Programming sequence
//!     rule: count
//!     needs: 2
//!     courses: [CS 1323, CS 1324]
//!   - title: Discrete mathematics
//!     rule: course
//!     course: MATH 2513
//!   - title: Guided electives
//!     rule: credits
//!     needs: 12
//!     subject: CS
//!     min_level: 4000
//! ```

use std::{collections::HashSet, path::Path};

use non_empty_string::NonEmptyString;
use serde::Deserialize;

use super::{LoadError, read_file};
use crate::domain::{
    Config, Course, Fulfillment, Progress, Requirement, Solver,
    rule::{self, CodePolicy, CourseCount, CourseSet, CreditHours, Rule, SingleCourse},
};

/// A degree program: a name and an ordered list of requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Major {
    name: String,
    description: Option<String>,
    requirements: Vec<Entry>,
}

impl Major {
    /// Loads a major definition from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// requirement is invalid.
    pub fn load(path: &Path, config: &Config) -> Result<Self, LoadError> {
        let content = read_file(path)?;
        let major = Self::from_yaml(&content, config)?;
        tracing::debug!(
            "Loaded major '{}' with {} requirements from {}",
            major.name,
            major.requirements.len(),
            path.display()
        );
        Ok(major)
    }

    /// Parses a major definition from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid, if a requirement is invalid,
    /// or if two requirements share a title.
    pub fn from_yaml(yaml: &str, config: &Config) -> Result<Self, LoadError> {
        let file: MajorFile = serde_yaml::from_str(yaml)?;
        let policy = CodePolicy::from(config);

        let mut titles = HashSet::new();
        let requirements = file
            .requirements
            .into_iter()
            .map(|entry| {
                let entry = entry.into_entry(policy)?;
                if titles.insert(entry.title.to_string()) {
                    Ok(entry)
                } else {
                    Err(LoadError::Duplicate(entry.title.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: file.name,
            description: file.description,
            requirements,
        })
    }

    /// The name of the major.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// An optional free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The requirements, in definition order.
    #[must_use]
    pub fn requirements(&self) -> &[Entry] {
        &self.requirements
    }

    /// Runs one solve pass of `courses` over this major's requirements.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a requirement. Requirements keep
    /// whatever progress they made before the error.
    pub fn audit(&mut self, courses: &[Course]) -> Result<(), rule::Error> {
        Solver::new(courses, &mut self.requirements).solve()
    }

    /// Whether every requirement is fulfilled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.requirements
            .iter()
            .all(|entry| entry.fulfillment().is_satisfied())
    }
}

/// A titled requirement of a major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    title: NonEmptyString,
    description: Option<String>,
    rule: Rule,
}

impl Entry {
    /// The title of the requirement.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// An optional free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The rule deciding which courses count.
    #[must_use]
    pub const fn rule(&self) -> &Rule {
        &self.rule
    }
}

impl Requirement for Entry {
    type Error = rule::Error;

    fn attempt_fulfill(&mut self, course: &Course) -> Result<(), Self::Error> {
        self.rule.attempt_fulfill(course)
    }
}

impl Progress for Entry {
    fn fulfillment(&self) -> Fulfillment {
        self.rule.fulfillment()
    }

    fn matched(&self) -> &[Course] {
        self.rule.matched()
    }
}

#[derive(Debug, Deserialize)]
struct MajorFile {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    requirements: Vec<EntryFile>,
}

#[derive(Debug, Deserialize)]
struct EntryFile {
    title: String,
    #[serde(default)]
    description: Option<String>,
    rule: RuleKind,
    #[serde(default)]
    course: Option<String>,
    #[serde(default)]
    needs: Option<u32>,
    #[serde(default)]
    courses: Option<Vec<String>>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    min_level: Option<u16>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RuleKind {
    Course,
    Count,
    Credits,
}

impl EntryFile {
    fn into_entry(self, policy: CodePolicy) -> Result<Entry, LoadError> {
        let title = NonEmptyString::new(self.title).map_err(|_| LoadError::Invalid {
            title: String::new(),
            reason: "title must not be empty".to_string(),
        })?;
        let invalid = |reason: &str| LoadError::Invalid {
            title: title.to_string(),
            reason: reason.to_string(),
        };

        let rule = match self.rule {
            RuleKind::Course => {
                if self.needs.is_some() || self.courses.is_some() || self.subject.is_some() {
                    return Err(invalid("'course' rules take only a 'course' field"));
                }
                let course = self
                    .course
                    .ok_or_else(|| invalid("'course' rules need a 'course' field"))?;
                Rule::Course(SingleCourse::new(course))
            }
            RuleKind::Count | RuleKind::Credits => {
                if self.course.is_some() {
                    return Err(invalid(
                        "use 'courses' to list courses for 'count' and 'credits' rules",
                    ));
                }
                let needs = self.needs.ok_or_else(|| invalid("missing 'needs'"))?;
                let from = match (self.courses, self.subject) {
                    (Some(courses), None) => {
                        if self.min_level.is_some() {
                            return Err(invalid("'min_level' only applies to 'subject'"));
                        }
                        CourseSet::listed(courses)
                    }
                    (None, Some(subject)) => CourseSet::subject(subject, self.min_level),
                    (Some(_), Some(_)) => {
                        return Err(invalid("give either 'courses' or 'subject', not both"));
                    }
                    (None, None) => return Err(invalid("give either 'courses' or 'subject'")),
                };
                if matches!(self.rule, RuleKind::Count) {
                    Rule::Count(CourseCount::new(needs, from))
                } else {
                    Rule::Credits(CreditHours::new(needs, from).with_policy(policy))
                }
            }
        };

        Ok(Entry {
            title,
            description: self.description,
            rule,
        })
    }
}
