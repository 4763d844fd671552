//! Automaton-driven lexer for Debian control files.
//!
//! Every field in a deb822 file is written in one of three shapes:
//!
//! * single-line: `Source: nano`
//! * folded, a comma-separated list continued on lines that end in a comma:
//!   `Build-Depends: debhelper (>= 9),\n pkg-config`
//! * multi-line, a paragraph continued on indented lines, where a lone `.`
//!   stands for an empty line: `Description: editor\n A pico clone\n .\n More`
//!
//! This crate recognizes each shape with a small deterministic automaton (see
//! [`fsm`]) and produces an ordered list of [`Lexeme`]s, with continuation
//! markers removed.
//!
//! # Example
//!
//! ```rust
//! use deb822_fsm::Lexeme;
//!
//! let input = "Source: nano\nBuild-Depends: debhelper (>= 9),\n pkg-config\n";
//! let lexemes = deb822_fsm::parse(input).unwrap();
//! assert_eq!(
//!     lexemes[1],
//!     Lexeme::Folded {
//!         field: "Build-Depends".to_string(),
//!         values: vec!["debhelper (>= 9)".to_string(), "pkg-config".to_string()],
//!     }
//! );
//! ```

mod driver;
pub mod fsm;
pub mod lex;
mod lexeme;
mod parse;
pub mod recognizer;

pub use lexeme::{Lexeme, Shape};
pub use parse::Lexed;

/// Why a record could not be lexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    /// The field line has no colon.
    MissingColon,

    /// An indented line does not belong to any field.
    OrphanContinuation,

    /// The field has no value.
    EmptyValue,

    /// A folded value ends in a comma, and [`TrailingComma::Reject`] is set.
    TrailingComma,

    /// No shape accepted the record.
    ShapeMismatch {
        /// The last shape that was tried.
        shape: Shape,
        /// Offset within the record text where matching failed.
        offset: usize,
        /// The character that could not be matched, if any.
        found: Option<char>,
    },
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColon => f.write_str("missing colon after field name"),
            Self::OrphanContinuation => f.write_str("continuation line without a field"),
            Self::EmptyValue => f.write_str("field has no value"),
            Self::TrailingComma => f.write_str("folded value ends in a comma"),
            Self::ShapeMismatch {
                shape,
                offset,
                found: Some(c),
            } => write!(f, "unexpected {:?} at offset {} in {} value", c, offset, shape),
            Self::ShapeMismatch {
                shape,
                offset,
                found: None,
            } => write!(f, "{} value stops at offset {}", shape, offset),
        }
    }
}

/// Error type for the lexer.
#[derive(Debug)]
pub enum Error {
    /// The field name contains characters other than ASCII letters and `-`.
    InvalidFieldName {
        /// 1-based line number of the field.
        line: usize,
        /// The offending name.
        name: String,
    },

    /// The record could not be lexed as any field shape.
    MalformedRecord {
        /// 1-based line number of the field.
        line: usize,
        /// What went wrong.
        reason: Malformed,
    },

    /// IO error.
    Io(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::InvalidFieldName { line, name } => {
                write!(f, "line {}: invalid field name {:?}", line, name)
            }
            Self::MalformedRecord { line, reason } => {
                write!(f, "line {}: malformed record: {}", line, reason)
            }
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// What to do with a folded value whose last line ends in a comma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingComma {
    /// Ignore the comma.
    #[default]
    Accept,
    /// Report [`Malformed::TrailingComma`].
    Reject,
}

/// Lexer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Handling of trailing commas in folded values.
    pub trailing_comma: TrailingComma,

    /// Skip lines starting with `#`.
    pub comments: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            trailing_comma: TrailingComma::Accept,
            comments: true,
        }
    }
}

/// Lexer for deb822 documents.
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    options: Options,
}

impl Lexer {
    /// Create a lexer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lexer with the given options.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Lex a document, keeping the lexemes produced before any error.
    pub fn lex(&self, text: &str) -> Lexed {
        driver::lex(text, &self.options)
    }

    /// Lex a document.
    pub fn parse(&self, text: &str) -> Result<Vec<Lexeme>, Error> {
        self.lex(text).to_result()
    }

    /// Lex a document, grouping lexemes by paragraph.
    ///
    /// Paragraphs are separated by blank lines. Line numbers in errors refer
    /// to the whole document.
    pub fn parse_paragraphs(&self, text: &str) -> Result<Vec<Vec<Lexeme>>, Error> {
        let mut paragraphs = Vec::new();
        for (start, paragraph) in driver::paragraphs(text) {
            let lexemes = self.parse(&paragraph).map_err(|e| match e {
                Error::InvalidFieldName { line, name } => Error::InvalidFieldName {
                    line: line + start,
                    name,
                },
                Error::MalformedRecord { line, reason } => Error::MalformedRecord {
                    line: line + start,
                    reason,
                },
                e => e,
            })?;
            if !lexemes.is_empty() {
                paragraphs.push(lexemes);
            }
        }
        Ok(paragraphs)
    }

    /// Read a document from a reader and lex it.
    pub fn parse_reader<R: std::io::Read>(&self, mut r: R) -> Result<Vec<Lexeme>, Error> {
        let mut buf = String::new();
        r.read_to_string(&mut buf)?;
        self.parse(&buf)
    }
}

/// Lex a document with default options.
pub fn parse(text: &str) -> Result<Vec<Lexeme>, Error> {
    Lexer::default().parse(text)
}

/// Lex a document with default options, grouping lexemes by paragraph.
pub fn parse_paragraphs(text: &str) -> Result<Vec<Vec<Lexeme>>, Error> {
    Lexer::default().parse_paragraphs(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidFieldName {
            line: 3,
            name: "1Field".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: invalid field name \"1Field\"");

        let err = Error::MalformedRecord {
            line: 1,
            reason: Malformed::EmptyValue,
        };
        assert_eq!(err.to_string(), "line 1: malformed record: field has no value");

        let err = Error::MalformedRecord {
            line: 2,
            reason: Malformed::ShapeMismatch {
                shape: Shape::Folded,
                offset: 7,
                found: Some('!'),
            },
        };
        assert_eq!(
            err.to_string(),
            "line 2: malformed record: unexpected '!' at offset 7 in folded value"
        );

        let io_err = std::io::Error::other("test error");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("IO error: test error"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_parse() {
        let input = r#"Source: nano
Build-Depends: debhelper (>= 9),
 pkg-config,
 libncurses-dev
Description: small editor
 A pico clone
 .
 with a blank line above
"#;
        assert_eq!(
            parse(input).unwrap(),
            vec![
                Lexeme::SingleLine {
                    field: "Source".to_string(),
                    value: "nano".to_string(),
                },
                Lexeme::Folded {
                    field: "Build-Depends".to_string(),
                    values: strings(&["debhelper (>= 9)", "pkg-config", "libncurses-dev"]),
                },
                Lexeme::MultiLine {
                    field: "Description".to_string(),
                    lines: strings(&[
                        "small editor",
                        "A pico clone",
                        "",
                        "with a blank line above"
                    ]),
                },
            ]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("").unwrap(), vec![]);
        assert_eq!(parse("\n\n# only a comment\n").unwrap(), vec![]);
    }

    #[test]
    fn test_invalid_field_name() {
        assert!(matches!(
            parse("1Field: x"),
            Err(Error::InvalidFieldName { line: 1, ref name }) if name == "1Field"
        ));
        assert!(matches!(
            parse("Source: nano\nBuild_Depends: x\n"),
            Err(Error::InvalidFieldName { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_value() {
        assert!(matches!(
            parse("Source:\n"),
            Err(Error::MalformedRecord {
                line: 1,
                reason: Malformed::EmptyValue
            })
        ));
    }

    #[test]
    fn test_trailing_comma_option() {
        let input = "Depends: a,\n b,\n";
        assert_eq!(
            parse(input).unwrap(),
            vec![Lexeme::Folded {
                field: "Depends".to_string(),
                values: strings(&["a", "b"]),
            }]
        );

        let lexer = Lexer::with_options(Options {
            trailing_comma: TrailingComma::Reject,
            ..Default::default()
        });
        assert_eq!(lexer.options().trailing_comma, TrailingComma::Reject);
        assert!(matches!(
            lexer.parse(input),
            Err(Error::MalformedRecord {
                reason: Malformed::TrailingComma,
                ..
            })
        ));
    }

    #[test]
    fn test_comments_option() {
        let input = "# leading: comment\nSource: nano\n";
        assert_eq!(parse(input).unwrap().len(), 1);

        let lexer = Lexer::with_options(Options {
            comments: false,
            ..Default::default()
        });
        assert!(matches!(
            lexer.parse(input),
            Err(Error::InvalidFieldName { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_paragraphs() {
        let input = "Source: nano\nSection: editors\n\nPackage: nano\nArchitecture: any\n";
        let paragraphs = parse_paragraphs(input).unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].len(), 2);
        assert_eq!(paragraphs[1][0].field(), "Package");

        let input = "Source: nano\n\n# comment only\n\nPackage: x\nDepends:\n";
        assert!(matches!(
            parse_paragraphs(input),
            Err(Error::MalformedRecord {
                line: 6,
                reason: Malformed::EmptyValue
            })
        ));
    }

    #[test]
    fn test_parse_reader() {
        let lexemes = Lexer::new()
            .parse_reader("Package: hello\nVersion: 1.0\n".as_bytes())
            .unwrap();
        assert_eq!(lexemes.len(), 2);

        struct FailingReader;
        impl std::io::Read for FailingReader {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("test error"))
            }
        }
        assert!(matches!(
            Lexer::new().parse_reader(FailingReader),
            Err(Error::Io(_))
        ));
    }
}
