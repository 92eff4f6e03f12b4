use std::{path::Path, sync::LazyLock};

use regex::Regex;

use super::{LoadError, read_file};
use crate::domain::{Course, Term};

static TERM_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s*((?i:fall|spring|summer|winter)\s+[0-9]{4})\s*$")
        .expect("term header pattern is valid")
});

/// An ordered list of completed courses.
///
/// Transcript files hold one course per line. Blank lines are skipped and
/// `#` starts a comment when it opens the line or follows whitespace, so
/// `C# 101` is a course name. Order and repeats are kept exactly as written.
///
/// A comment naming a term, such as `# Fall 2023`, starts that term. The
/// courses under it are grouped into a [`Term`] as well as kept in the flat
/// course list. Courses before the first header belong to no term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    courses: Vec<Course>,
    terms: Vec<Term>,
}

impl Transcript {
    /// Loads a transcript from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let transcript = Self::parse(&read_file(path)?);
        tracing::debug!(
            "Loaded {} courses in {} terms from {}",
            transcript.len(),
            transcript.terms().len(),
            path.display()
        );
        Ok(transcript)
    }

    /// Parses transcript text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut courses = Vec::new();
        let mut terms = Vec::new();
        let mut current: Option<(String, Vec<Course>)> = None;

        for line in text.lines() {
            let line = line.trim();
            if let Some(header) = TERM_HEADER.captures(line) {
                if let Some((name, taken)) = current.take() {
                    terms.push(Term::new(name, taken));
                }
                current = Some((header[1].to_string(), Vec::new()));
                continue;
            }

            let entry = strip_comment(line).trim();
            if entry.is_empty() {
                continue;
            }
            let course = Course::new(entry);
            if let Some((_, taken)) = &mut current {
                taken.push(course.clone());
            }
            courses.push(course);
        }
        if let Some((name, taken)) = current {
            terms.push(Term::new(name, taken));
        }

        Self { courses, terms }
    }

    /// Places `transfer` courses and terms ahead of this transcript's.
    #[must_use]
    pub fn after_transfer(self, transfer: Self) -> Self {
        let mut courses = transfer.courses;
        courses.extend(self.courses);
        let mut terms = transfer.terms;
        terms.extend(self.terms);
        Self { courses, terms }
    }

    /// The courses, in order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// The terms named in the transcript, in order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The number of courses, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the transcript has no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// Cuts `line` at the first `#` that opens it or follows whitespace.
fn strip_comment(line: &str) -> &str {
    let mut previous: Option<char> = None;
    for (i, c) in line.char_indices() {
        if c == '#' && previous.is_none_or(char::is_whitespace) {
            return &line[..i];
        }
        previous = Some(c);
    }
    line
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn names(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(Course::as_str).collect()
    }

    #[test]
    fn parse_skips_blanks_and_comments() {
        let transcript = Transcript::parse(
            "# taken at OU\nCS 1323\n\n  MATH 1914  # honors section\n# retake\nCS 1324\n",
        );
        assert_eq!(names(transcript.courses()), vec!["CS 1323", "MATH 1914", "CS 1324"]);
        assert!(transcript.terms().is_empty());
    }

    #[test]
    fn parse_keeps_order_and_repeats() {
        let transcript = Transcript::parse("CS 2413\nCS 1323\nCS 2413\n");
        assert_eq!(names(transcript.courses()), vec!["CS 2413", "CS 1323", "CS 2413"]);
    }

    #[test]
    fn hash_inside_a_name_is_kept() {
        let transcript = Transcript::parse("C# 101\nF#Programming # elective\n#CS 1323\n");
        assert_eq!(names(transcript.courses()), vec!["C# 101", "F#Programming"]);
    }

    #[test]
    fn term_headers_group_courses() {
        let transcript = Transcript::parse(
            "\
CS 1100
# Fall 2023
CS 1337
MATH 2413 # placement
# Spring 2024
# remember to request transcript
cs 2336

# summer 2024
",
        );

        assert_eq!(
            names(transcript.courses()),
            vec!["CS 1100", "CS 1337", "MATH 2413", "cs 2336"]
        );
        let terms: Vec<_> = transcript
            .terms()
            .iter()
            .map(|term| (term.name(), names(term.courses())))
            .collect();
        assert_eq!(
            terms,
            vec![
                ("Fall 2023", vec!["CS 1337", "MATH 2413"]),
                ("Spring 2024", vec!["cs 2336"]),
                ("summer 2024", vec![]),
            ]
        );
    }

    #[test]
    fn transfer_courses_and_terms_come_first() {
        let transcript = Transcript::parse("# Fall 2024\nCS 1323")
            .after_transfer(Transcript::parse("# Summer 2024\nENGL 1113"));
        assert_eq!(names(transcript.courses()), vec!["ENGL 1113", "CS 1323"]);
        let terms: Vec<_> = transcript.terms().iter().map(Term::name).collect();
        assert_eq!(terms, vec!["Summer 2024", "Fall 2024"]);
    }

    #[test]
    fn empty_text_gives_empty_transcript() {
        assert!(Transcript::parse("\n# nothing yet\n").is_empty());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"CS 1323\nCS 1324\n").unwrap();

        let transcript = Transcript::load(file.path()).unwrap();
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let error = Transcript::load(&tmp.path().join("courses.txt")).unwrap_err();
        assert!(matches!(error, LoadError::NotFound(_)));
    }
}
