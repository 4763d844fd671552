//! Recognizers for the three value shapes of a deb822 field.
//!
//! All recognizers share the same prefix:
//!
//! ```text
//! firstFieldLetter -> fieldLetter* -> (spaces) -> colon -> (spaces) -> firstValueLetter
//! ```
//!
//! The field name is buffered and flushed into the draft when the colon (or
//! the whitespace in front of it) is reached. After that:
//!
//! * single-line values loop between a letter and a space state until the end
//!   of the line;
//! * folded values flush an item on every comma, and continue on the next
//!   line only if the line ended in a comma;
//! * multi-line values flush a line on every newline, and continue while the
//!   next physical line starts with a space. A continuation line consisting of
//!   `.` is an empty line.
use crate::fsm::{Buffer, Fsm, Guard, Match, NoTransition, StateId};
use crate::lex::{Token, TokenKind};
use crate::lexeme::{Lexeme, Shape};
use crate::TrailingComma;

/// Why a recognizer did not produce a lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizeError {
    /// The automaton found no transition for a token.
    Stalled(NoTransition),

    /// The input ended before the colon was reached.
    Truncated,

    /// No value characters followed the colon.
    Empty,

    /// A folded value ended in a comma, and trailing commas are rejected.
    TrailingComma,
}

impl std::fmt::Display for RecognizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stalled(e) => write!(f, "{}", e),
            Self::Truncated => f.write_str("input ended inside the field name"),
            Self::Empty => f.write_str("field has no value"),
            Self::TrailingComma => f.write_str("folded value ends in a comma"),
        }
    }
}

impl std::error::Error for RecognizeError {}

impl From<NoTransition> for RecognizeError {
    fn from(e: NoTransition) -> Self {
        Self::Stalled(e)
    }
}

/// A field-shape recognizer.
pub trait Recognizer {
    /// The shape this recognizer accepts.
    fn shape(&self) -> Shape;

    /// Match a field starting at the first token of `input`.
    fn recognize(&mut self, input: &[Token]) -> Result<(Lexeme, Match), RecognizeError>;

    /// Find the first field in `input`, trying each start offset in turn.
    ///
    /// Returns the start offset, the lexeme and how the match ended.
    fn find(&mut self, input: &[Token]) -> Option<(usize, Lexeme, Match)>;
}

/// Create a recognizer for `shape`.
pub fn recognizer_for(shape: Shape, trailing_comma: TrailingComma) -> Box<dyn Recognizer> {
    match shape {
        Shape::SingleLine => Box::new(SingleLineRecognizer::new()),
        Shape::Folded => Box::new(FoldedRecognizer::new(trailing_comma)),
        Shape::MultiLine => Box::new(MultiLineRecognizer::new()),
    }
}

trait Draft: Default {
    fn set_field(&mut self, field: String);
}

fn is_field_char(t: &Token) -> bool {
    t.kind == TokenKind::LETTER || t.value == '-'
}

/// Anything on a line that is not whitespace.
fn is_line_char(t: &Token) -> bool {
    !matches!(t.kind, TokenKind::SPACE | TokenKind::NEWLINE)
}

/// Anything that may appear in a folded item.
fn is_item_char(t: &Token) -> bool {
    matches!(
        t.kind,
        TokenKind::LETTER | TokenKind::OTHER | TokenKind::COLON
    )
}

/// Trim the characters that tokenize as `SPACE`, and nothing else.
fn trim_spaces(s: &str) -> &str {
    s.trim_matches([' ', '\t'])
}

fn flush_field<D: Draft>(d: &mut D, b: &mut Buffer) {
    d.set_field(b.flush());
}

const SPACE: Guard = Guard::Kind(TokenKind::SPACE);
const NEWLINE: Guard = Guard::Kind(TokenKind::NEWLINE);

/// States of the common prefix that the shapes build on.
struct Prefix {
    colon: StateId,
    after_colon_space: StateId,
    first_value_letter: StateId,
}

fn build_prefix<D: Draft>(fsm: &mut Fsm<D>, value: Guard) -> Prefix {
    let first_field_letter = fsm.initial();
    let field_letter = fsm.new_state();
    let after_field_space = fsm.new_state();
    let colon = fsm.new_state();
    let after_colon_space = fsm.new_state();
    let first_value_letter = fsm.new_state();

    let field = Guard::Custom(is_field_char);
    let colon_guard = Guard::Kind(TokenKind::COLON);

    fsm.add_buffered_transition(first_field_letter, field_letter, field);
    fsm.add_buffered_transition(field_letter, field_letter, field);
    fsm.add_transition_with(field_letter, after_field_space, SPACE, false, flush_field);
    fsm.add_transition_with(field_letter, colon, colon_guard, false, flush_field);

    fsm.add_transition(after_field_space, after_field_space, SPACE);
    fsm.add_transition(after_field_space, colon, colon_guard);

    fsm.add_transition(colon, after_colon_space, SPACE);
    fsm.add_buffered_transition(colon, first_value_letter, value);

    fsm.add_transition(after_colon_space, after_colon_space, SPACE);
    fsm.add_buffered_transition(after_colon_space, first_value_letter, value);

    Prefix {
        colon,
        after_colon_space,
        first_value_letter,
    }
}

#[derive(Debug, Default)]
struct SingleLineDraft {
    field: String,
    value: Option<String>,
}

impl Draft for SingleLineDraft {
    fn set_field(&mut self, field: String) {
        self.field = field;
    }
}

fn set_value(d: &mut SingleLineDraft, b: &mut Buffer) {
    let text = b.flush();
    if !d.field.is_empty() {
        d.value = Some(trim_spaces(&text).to_string());
    }
}

/// Recognizes `Field: value` confined to a single line.
pub struct SingleLineRecognizer {
    fsm: Fsm<SingleLineDraft>,
}

impl Default for SingleLineRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleLineRecognizer {
    /// Build the automaton.
    pub fn new() -> Self {
        let mut fsm = Fsm::new();
        let value = Guard::Custom(is_line_char);
        let prefix = build_prefix(&mut fsm, value);
        let value_letter = fsm.new_state();
        let value_space = fsm.new_state();

        for src in [prefix.first_value_letter, value_letter] {
            fsm.add_buffered_transition(src, value_letter, value);
            fsm.add_buffered_transition(src, value_space, SPACE);
        }
        fsm.add_buffered_transition(value_space, value_space, SPACE);
        fsm.add_buffered_transition(value_space, value_letter, value);

        fsm.add_final_transition(
            NEWLINE,
            Some(set_value),
            &[prefix.first_value_letter, value_letter, value_space],
        );
        fsm.on_eof(set_value);

        Self { fsm }
    }

    fn finish(&mut self) -> Result<Lexeme, RecognizeError> {
        let draft = self.fsm.take_draft();
        if draft.field.is_empty() {
            return Err(RecognizeError::Truncated);
        }
        match draft.value {
            Some(value) if !value.is_empty() => Ok(Lexeme::SingleLine {
                field: draft.field,
                value,
            }),
            _ => Err(RecognizeError::Empty),
        }
    }
}

#[derive(Debug, Default)]
struct FoldedDraft {
    field: String,
    values: Vec<String>,
    trailing_comma: bool,
}

impl Draft for FoldedDraft {
    fn set_field(&mut self, field: String) {
        self.field = field;
    }
}

fn push_item(d: &mut FoldedDraft, b: &mut Buffer) {
    let item = b.flush();
    let item = trim_spaces(&item);
    if !item.is_empty() {
        d.values.push(item.to_string());
    }
}

fn push_space(_: &mut FoldedDraft, b: &mut Buffer) {
    b.push(' ');
}

fn close_items(d: &mut FoldedDraft, b: &mut Buffer) {
    let item = b.flush();
    if d.field.is_empty() {
        return;
    }
    let item = trim_spaces(&item);
    if item.is_empty() {
        d.trailing_comma = true;
    } else {
        d.values.push(item.to_string());
    }
}

/// Recognizes a comma-separated list folded across lines.
///
/// A line ending in a comma continues on the next line, which must start
/// with a space. A field line with no value may also continue, as in
/// `Depends:\n foo,\n bar`. Runs of spaces and tabs within an item collapse
/// to one space.
pub struct FoldedRecognizer {
    fsm: Fsm<FoldedDraft>,
    trailing_comma: TrailingComma,
}

impl Default for FoldedRecognizer {
    fn default() -> Self {
        Self::new(TrailingComma::default())
    }
}

impl FoldedRecognizer {
    /// Build the automaton.
    pub fn new(trailing_comma: TrailingComma) -> Self {
        let mut fsm = Fsm::new();
        let value = Guard::Custom(is_item_char);
        let prefix = build_prefix(&mut fsm, value);
        let value_letter = fsm.new_state();
        let value_space = fsm.new_state();
        let comma = fsm.new_state();
        let fold_newline = fsm.new_state();

        for src in [prefix.first_value_letter, value_letter] {
            fsm.add_buffered_transition(src, value_letter, value);
            fsm.add_transition_with(src, value_space, SPACE, false, push_space);
        }
        fsm.add_transition(value_space, value_space, SPACE);
        fsm.add_buffered_transition(value_space, value_letter, value);

        for src in [prefix.first_value_letter, value_letter, value_space] {
            fsm.add_transition_with(
                src,
                comma,
                Guard::Kind(TokenKind::COMMA),
                false,
                push_item,
            );
        }
        fsm.add_transition(comma, comma, SPACE);
        fsm.add_transition(comma, fold_newline, NEWLINE);
        fsm.add_transition(fold_newline, comma, SPACE);
        fsm.add_transition(prefix.colon, fold_newline, NEWLINE);
        fsm.add_transition(prefix.after_colon_space, fold_newline, NEWLINE);
        fsm.add_buffered_transition(comma, value_letter, value);

        fsm.add_final_transition(
            NEWLINE,
            Some(push_item),
            &[prefix.first_value_letter, value_letter, value_space],
        );
        fsm.on_eof(close_items);

        Self {
            fsm,
            trailing_comma,
        }
    }

    fn finish(&mut self) -> Result<Lexeme, RecognizeError> {
        let draft = self.fsm.take_draft();
        if draft.field.is_empty() {
            return Err(RecognizeError::Truncated);
        }
        if draft.values.is_empty() {
            return Err(RecognizeError::Empty);
        }
        if draft.trailing_comma && self.trailing_comma == TrailingComma::Reject {
            return Err(RecognizeError::TrailingComma);
        }
        Ok(Lexeme::Folded {
            field: draft.field,
            values: draft.values,
        })
    }
}

#[derive(Debug, Default)]
struct MultiLineDraft {
    field: String,
    lines: Vec<String>,
}

impl Draft for MultiLineDraft {
    fn set_field(&mut self, field: String) {
        self.field = field;
    }
}

fn push_line(d: &mut MultiLineDraft, b: &mut Buffer) {
    let line = b.flush();
    let line = line.trim_end_matches([' ', '\t']);
    // Only continuation lines use the blank-line marker.
    if !d.lines.is_empty() && line == "." {
        d.lines.push(String::new());
    } else {
        d.lines.push(line.to_string());
    }
}

fn close_lines(d: &mut MultiLineDraft, b: &mut Buffer) {
    if !b.is_empty() && !d.field.is_empty() {
        push_line(d, b);
    }
    b.flush();
}

/// Recognizes a paragraph continued on lines starting with a space.
pub struct MultiLineRecognizer {
    fsm: Fsm<MultiLineDraft>,
}

impl Default for MultiLineRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiLineRecognizer {
    /// Build the automaton.
    pub fn new() -> Self {
        let mut fsm = Fsm::new();
        let value = Guard::Custom(is_line_char);
        let prefix = build_prefix(&mut fsm, value);
        let value_letter = fsm.new_state();
        let value_space = fsm.new_state();
        let newline = fsm.new_state();
        let new_line_space = fsm.new_state();
        let dot_new_line = fsm.new_state();

        for src in [prefix.first_value_letter, value_letter] {
            fsm.add_buffered_transition(src, value_letter, value);
            fsm.add_buffered_transition(src, value_space, SPACE);
        }
        fsm.add_buffered_transition(value_space, value_space, SPACE);
        fsm.add_buffered_transition(value_space, value_letter, value);

        // An empty first line, as in `Description:\n text`.
        for src in [
            prefix.colon,
            prefix.after_colon_space,
            prefix.first_value_letter,
            value_letter,
            value_space,
        ] {
            fsm.add_transition_with(src, newline, NEWLINE, false, push_line);
        }

        fsm.add_transition(newline, new_line_space, SPACE);
        fsm.add_final_transition(Guard::Custom(|t| t.kind != TokenKind::SPACE), None, &[newline]);

        fsm.add_buffered_transition(new_line_space, dot_new_line, Guard::Char('.'));
        fsm.add_buffered_transition(new_line_space, value_space, SPACE);
        fsm.add_buffered_transition(new_line_space, value_letter, value);

        fsm.add_transition_with(dot_new_line, newline, NEWLINE, false, push_line);
        fsm.add_buffered_transition(dot_new_line, value_space, SPACE);
        fsm.add_buffered_transition(dot_new_line, value_letter, value);

        fsm.on_eof(close_lines);

        Self { fsm }
    }

    fn finish(&mut self) -> Result<Lexeme, RecognizeError> {
        let draft = self.fsm.take_draft();
        if draft.field.is_empty() {
            return Err(RecognizeError::Truncated);
        }
        if draft.lines.iter().all(|l| l.is_empty()) {
            return Err(RecognizeError::Empty);
        }
        Ok(Lexeme::MultiLine {
            field: draft.field,
            lines: draft.lines,
        })
    }
}

macro_rules! impl_recognizer {
    ($ty:ty, $shape:expr) => {
        impl Recognizer for $ty {
            fn shape(&self) -> Shape {
                $shape
            }

            fn recognize(&mut self, input: &[Token]) -> Result<(Lexeme, Match), RecognizeError> {
                let m = self.fsm.run(input)?;
                Ok((self.finish()?, m))
            }

            fn find(&mut self, input: &[Token]) -> Option<(usize, Lexeme, Match)> {
                let mut from = 0;
                while from < input.len() {
                    let (start, m) = self.fsm.find(&input[from..])?;
                    match self.finish() {
                        Ok(lexeme) => return Some((from + start, lexeme, m)),
                        Err(_) => from += start + 1,
                    }
                }
                None
            }
        }
    };
}

impl_recognizer!(SingleLineRecognizer, Shape::SingleLine);
impl_recognizer!(FoldedRecognizer, Shape::Folded);
impl_recognizer!(MultiLineRecognizer, Shape::MultiLine);
