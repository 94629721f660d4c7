//! Error enum
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// input file or directory (or output directory) does not exist.
    InputNotFound(PathBuf),
    /// filename does not follow the `<stem>.<xx>-<yy>.bitext` convention.
    InvalidNamingConvention(String),
    InvalidLanguageTag(String),
    /// unexpected nesting of TMX elements.
    /// `position` is the byte offset at which the problem was detected.
    Structural { position: u64, reason: String },
    /// malformed XML syntax.
    Xml(quick_xml::Error),
    Io(std::io::Error),
    UnsupportedEncoding(String),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Serde(serde_json::Error),
    Custom(String),
}

impl Error {
    /// `true` for errors that come from a malformed document
    /// (bad XML syntax or unexpected TMX nesting).
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::Structural { .. } | Error::Xml(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputNotFound(p) => write!(f, "no such file or directory: {:?}", p),
            Error::InvalidNamingConvention(s) => write!(f, "invalid file name: {}", s),
            Error::InvalidLanguageTag(s) => write!(f, "invalid language code: {}", s),
            Error::Structural { position, reason } => {
                write!(f, "structural error at byte {}: {}", position, reason)
            }
            Error::Xml(e) => write!(f, "xml error: {}", e),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::UnsupportedEncoding(s) => write!(f, "unsupported encoding: {}", s),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "glob pattern error: {}", e),
            Error::Serde(e) => write!(f, "serde error: {}", e),
            Error::Custom(s) => f.write_str(s),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Error {
        match e {
            // keep io failures distinct from syntax errors
            quick_xml::Error::Io(e) => Error::Io(std::io::Error::new(e.kind(), e.to_string())),
            quick_xml::Error::Encoding(e) => Error::UnsupportedEncoding(e.to_string()),
            e => Error::Xml(e),
        }
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn structural_kinds() {
        let e = Error::Structural {
            position: 12,
            reason: "nested <tu>".to_string(),
        };
        assert!(e.is_structural());

        let e = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!e.is_structural());
    }

    #[test]
    fn display_mentions_position() {
        let e = Error::Structural {
            position: 42,
            reason: "tuv without language".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "structural error at byte 42: tuv without language"
        );
    }
}
