use std::{io, path::PathBuf};

mod major;
mod transcript;

pub use major::{Entry, Major};
pub use transcript::Transcript;

/// Errors that can occur when loading majors or transcripts.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file was not found.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// An I/O error occurred.
    #[error("failed to read file")]
    Io(#[from] io::Error),
    /// The YAML could not be parsed.
    #[error("failed to parse major definition")]
    Yaml(#[from] serde_yaml::Error),
    /// A requirement definition is structurally valid YAML but makes no
    /// sense as a rule.
    #[error("invalid requirement '{title}': {reason}")]
    Invalid {
        /// Title of the offending requirement.
        title: String,
        /// What is wrong with it.
        reason: String,
    },
    /// Two requirements share a title.
    #[error("duplicate requirement title '{0}'")]
    Duplicate(String),
}

fn read_file(path: &std::path::Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|io_error| match io_error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(io_error),
    })
}
