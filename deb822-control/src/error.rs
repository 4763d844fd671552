//! Errors raised while reading a control file into package records.

/// Errors for control file parsing
#[derive(Debug)]
pub enum Error {
    /// The control file could not be lexed
    Lex(deb822_fsm::Error),

    /// A mandatory field is absent
    MissingField {
        /// The paragraph, counted from 0
        paragraph: usize,
        /// Name of the field
        field: &'static str,
    },

    /// A field has a value that cannot be interpreted
    InvalidValue {
        /// Name of the field
        field: String,
        /// The offending value
        value: String,
        /// What is wrong with it
        reason: String,
    },

    /// I/O Error
    Io(std::io::Error),
}

impl From<deb822_fsm::Error> for Error {
    fn from(e: deb822_fsm::Error) -> Self {
        Self::Lex(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::Lex(e) => write!(f, "Lexer error: {e}"),
            Self::MissingField { paragraph, field } => {
                write!(f, "Paragraph {paragraph}: missing field {field}")
            }
            Self::InvalidValue {
                field,
                value,
                reason,
            } => write!(f, "Invalid value {value:?} for field {field}: {reason}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}
