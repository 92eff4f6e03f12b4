use std::{fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};

/// An opaque identifier for one completed course, such as `CS 1323`.
///
/// The solver never looks inside a course. Requirement variants decide
/// what an identifier means and when two identifiers refer to the same
/// course.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Course(String);

impl Course {
    /// Creates a course identifier.
    ///
    /// Surrounding whitespace is trimmed; nothing else is validated.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.len() == code.len() {
            Self(code)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Course {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Course {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl FromStr for Course {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl AsRef<str> for Course {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Course {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let course = Course::new("  CS 1323\t");
        assert_eq!(course.as_str(), "CS 1323");
    }

    #[test]
    fn keeps_inner_text_verbatim() {
        let course = Course::from("cs   1323");
        assert_eq!(course.to_string(), "cs   1323");
    }

    #[test]
    fn empty_identifier_is_allowed() {
        let course: Course = "".parse().unwrap();
        assert!(course.is_empty());
    }
}
