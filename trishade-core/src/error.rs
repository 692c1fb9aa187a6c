use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, LoadError>;

/// Everything that can stop a mesh description from loading
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened; nothing was parsed
    #[error("could not open mesh file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read mesh file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The description itself is malformed
    #[error("malformed mesh description '{source_name}': {error}")]
    Parse {
        source_name: String,
        #[source]
        error: ParseError,
    },
}

impl LoadError {
    /// Whether the description was structurally broken
    ///
    /// A fatal error means the data is wrong and retrying is pointless; the
    /// other variants are environmental and the caller may try another file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LoadError::Parse { .. })
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            LoadError::Parse { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// A malformed line, with its 1-based line number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("{element} data before any object declaration")]
    NoActiveMesh { element: Element },
    #[error("read {found} of {expected} fields for {element}")]
    FieldCount {
        element: Element,
        found: usize,
        expected: usize,
    },
    #[error("face index {index} does not name an element")]
    InvalidIndex { index: i64 },
    #[error("out of memory growing mesh arrays")]
    Allocation,
}

/// The kind of data line a parse error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Vertex,
    Normal,
    Face,
    Other,
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Vertex => f.write_str("vertex"),
            Element::Normal => f.write_str("normal"),
            Element::Face => f.write_str("face"),
            Element::Other => f.write_str("vertex attribute"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let open = LoadError::Open {
            path: PathBuf::from("missing.obj"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(!open.is_fatal());
        assert!(open.parse_error().is_none());

        let parse = LoadError::Parse {
            source_name: "a.obj".into(),
            error: ParseError {
                line: 3,
                kind: ParseErrorKind::NoActiveMesh {
                    element: Element::Vertex,
                },
            },
        };
        assert!(parse.is_fatal());
        assert_eq!(parse.parse_error().map(|e| e.line), Some(3));
    }

    #[test]
    fn test_messages() {
        let err = ParseError {
            line: 7,
            kind: ParseErrorKind::FieldCount {
                element: Element::Face,
                found: 1,
                expected: 4,
            },
        };
        assert_eq!(err.to_string(), "line 7: read 1 of 4 fields for face");
    }
}
