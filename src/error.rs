//! Crate-level error types.
//!
//! The interaction core never fails: bad indices and degenerate gestures are
//! absorbed where they happen. Only the ambient layers (options I/O, web
//! start-up) surface errors.

use std::fmt;

/// Errors produced by the globe-orbit crate.
#[derive(Debug)]
pub enum GlobeError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Browser front-end failure (missing element, rejected listener).
    Web(String),
}

impl fmt::Display for GlobeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Web(msg) => write!(f, "web front-end error: {msg}"),
        }
    }
}

impl std::error::Error for GlobeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GlobeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err: GlobeError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn parse_errors_have_no_source() {
        let err = GlobeError::OptionsParse("bad key".into());
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "options parse error: bad key");
    }
}
