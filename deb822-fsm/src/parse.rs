//! Lexing result that keeps partial output next to the first error.

use crate::lexeme::Lexeme;
use crate::Error;

/// The result of lexing a document: the lexemes produced so far and the
/// error that stopped lexing, if any.
#[derive(Debug)]
pub struct Lexed {
    lexemes: Vec<Lexeme>,
    error: Option<Error>,
}

impl Lexed {
    pub(crate) fn new(lexemes: Vec<Lexeme>, error: Option<Error>) -> Self {
        Lexed { lexemes, error }
    }

    /// Get the lexemes; if lexing failed, these are the fields before the
    /// failing record.
    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    /// Get the error that stopped lexing
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Check if the whole document was lexed
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }

    /// Convert to a Result, discarding partial output on error
    pub fn to_result(self) -> Result<Vec<Lexeme>, Error> {
        match self.error {
            None => Ok(self.lexemes),
            Some(e) => Err(e),
        }
    }

    /// Split into the lexemes and the error.
    pub fn into_parts(self) -> (Vec<Lexeme>, Option<Error>) {
        (self.lexemes, self.error)
    }
}
