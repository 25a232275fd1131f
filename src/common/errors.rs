use std::path::PathBuf;

/// Typed failures of the command-line layer.
///
/// The analysis pipeline itself never fails; these cover configuration and
/// file handling around it. `anyhow` wraps them at the top level.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// File system operation failed
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is invalid
    #[error("Config error in '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// `config set` with a key we do not know
    #[error("Unknown config key: {0}")]
    UnknownConfigKey(String),

    /// `config set` with a value that does not parse for its key
    #[error("Invalid value '{value}' for {key}")]
    InvalidConfigValue { key: String, value: String },
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ReportError::UnknownConfigKey("color".into());
        assert_eq!(e.to_string(), "Unknown config key: color");

        let e = ReportError::io(
            "/tmp/list.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(e.to_string(), "I/O error at '/tmp/list.txt': missing");
        assert!(std::error::Error::source(&e).is_some());
    }
}
