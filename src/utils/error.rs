use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("version file not found at '{}'", path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("malformed version file '{}' (line {line}): {reason}", path.display())]
    MalformedResource {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("failed to access '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("version {current} is older than the required {required}")]
    VersionTooOld { current: String, required: String },
}

impl VersionError {
    /// Maps a raw I/O failure on `path`, keeping "not found" as its own kind.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            VersionError::ResourceNotFound { path }
        } else {
            VersionError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, VersionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_message_leaves_cause_to_source() {
        let err = VersionError::Io {
            path: PathBuf::from("version.inc"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(err.to_string(), "failed to access 'version.inc'");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("disk full"));
    }

    #[test]
    fn not_found_maps_to_its_own_kind() {
        let err = VersionError::from_io(
            "version.inc",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, VersionError::ResourceNotFound { .. }));
    }
}
