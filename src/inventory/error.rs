use std::fmt;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Express whether the error comes from what we were handed or from how we
/// were configured.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorLayer {
    /// The inventory text itself is malformed or lacks the expected shape.
    /// Retrying the same build would reproduce the identical failure, so the
    /// only remedy is a different document.
    BadInput,
    /// The document parsed fine but its contents can't be represented under
    /// the active build options (ex: a duplicate id under the reject policy).
    DataLayer,
    /// A config file or the inventory file could not be read at all.
    ConfigLayer,
}

/// Payload describing what went wrong.  The message is shown to the user
/// verbatim, so it should read as a complete sentence on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub layer: ErrorLayer,
    /// Stringified version of the lower level error.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The document has no usable root entry.  Fatal to the current build; no
    /// partial graph is produced.
    SchemaError(ErrorDetails),
    /// Propagated unchanged from the YAML/JSON parser.
    ParseError(ErrorDetails),
    /// Only produced under `DuplicateIdPolicy::Reject`.
    DuplicateId(ErrorDetails),
    Io(ErrorDetails),
}

impl GraphError {
    pub fn schema(message: impl Into<String>) -> Self {
        GraphError::SchemaError(ErrorDetails {
            layer: ErrorLayer::BadInput,
            message: message.into(),
        })
    }

    pub fn details(&self) -> &ErrorDetails {
        match self {
            GraphError::SchemaError(details)
            | GraphError::ParseError(details)
            | GraphError::DuplicateId(details)
            | GraphError::Io(details) => details,
        }
    }
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::SchemaError(d) => write!(f, "SchemaError: {}", d.message),
            GraphError::ParseError(d) => write!(f, "ParseError: {}", d.message),
            GraphError::DuplicateId(d) => write!(f, "DuplicateId: {}", d.message),
            GraphError::Io(d) => write!(f, "IoError: {}", d.message),
        }
    }
}

impl std::error::Error for GraphError {}

// Parse errors are sticky input problems.
impl From<serde_yaml::Error> for GraphError {
    fn from(err: serde_yaml::Error) -> GraphError {
        GraphError::ParseError(ErrorDetails {
            layer: ErrorLayer::BadInput,
            message: err.to_string(),
        })
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> GraphError {
        GraphError::ParseError(ErrorDetails {
            layer: ErrorLayer::BadInput,
            message: err.to_string(),
        })
    }
}

impl From<toml::de::Error> for GraphError {
    fn from(err: toml::de::Error) -> GraphError {
        GraphError::ParseError(ErrorDetails {
            layer: ErrorLayer::ConfigLayer,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> GraphError {
        GraphError::Io(ErrorDetails {
            layer: ErrorLayer::ConfigLayer,
            message: err.to_string(),
        })
    }
}
