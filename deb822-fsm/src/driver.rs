//! Document-level driver: splits text into records and lexes each one.
use crate::lex::tokenize;
use crate::lexeme::{Lexeme, Shape};
use crate::parse::Lexed;
use crate::recognizer::{recognizer_for, RecognizeError};
use crate::{Error, Malformed, Options};

/// A field line and its continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record<'a> {
    /// 1-based line number of the field line.
    pub(crate) line: usize,
    pub(crate) lines: Vec<&'a str>,
}

impl Record<'_> {
    fn text(&self) -> String {
        self.lines.join("\n")
    }
}

fn trim_spaces(s: &str) -> &str {
    s.trim_matches([' ', '\t'])
}

fn is_blank(line: &str) -> bool {
    trim_spaces(line).is_empty()
}

fn is_continuation(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

/// Iterator over the records of a document.
///
/// Blank lines end a record and are skipped. Comment lines are skipped
/// without ending the record.
pub(crate) struct Records<'a> {
    lines: std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'a>>>,
    comments: bool,
}

impl<'a> Records<'a> {
    pub(crate) fn new(text: &'a str, comments: bool) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
            comments,
        }
    }

    fn is_comment(&self, line: &str) -> bool {
        self.comments && line.starts_with('#')
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let (line, first) = loop {
            let (i, line) = self.lines.next()?;
            let line = line.strip_suffix('\r').unwrap_or(line);
            if is_blank(line) || self.is_comment(line) {
                continue;
            }
            if is_continuation(line) {
                return Some(Err(Error::MalformedRecord {
                    line: i + 1,
                    reason: Malformed::OrphanContinuation,
                }));
            }
            break (i + 1, line);
        };

        let mut lines = vec![first];
        loop {
            let next = match self.lines.peek() {
                Some(&(_, next)) => next.strip_suffix('\r').unwrap_or(next),
                None => break,
            };
            if self.is_comment(next) {
                self.lines.next();
            } else if is_continuation(next) && !is_blank(next) {
                lines.push(next);
                self.lines.next();
            } else {
                break;
            }
        }
        Some(Ok(Record { line, lines }))
    }
}

/// Check the field name of a record's first line.
fn check_field_name(record: &Record) -> Result<(), Error> {
    let first = record.lines[0];
    let colon = first.find(':').ok_or(Error::MalformedRecord {
        line: record.line,
        reason: Malformed::MissingColon,
    })?;
    let name = first[..colon].trim_end_matches([' ', '\t']);
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return Err(Error::InvalidFieldName {
            line: record.line,
            name: first[..colon].to_string(),
        });
    }
    Ok(())
}

fn ends_with_comma(line: &str) -> bool {
    trim_spaces(line).ends_with(',')
}

/// Decide which shape to try first for a record.
///
/// A first line ending in a comma announces a folded list. So does an empty
/// first line followed by lines that all end in a comma, except possibly the
/// last. Otherwise any continuation line makes the record multi-line.
pub(crate) fn classify(record: &Record) -> Shape {
    let first = record.lines[0];
    let value = first.split_once(':').map(|(_, v)| trim_spaces(v)).unwrap_or("");
    let rest = &record.lines[1..];
    if value.ends_with(',') {
        Shape::Folded
    } else if rest.is_empty() {
        Shape::SingleLine
    } else if value.is_empty()
        && rest.iter().any(|l| ends_with_comma(l))
        && rest.iter().rev().skip(1).all(|l| ends_with_comma(l))
    {
        Shape::Folded
    } else {
        Shape::MultiLine
    }
}

/// Shapes to try, in order, after classification.
///
/// Only a record with continuation lines can fall back to multi-line.
fn candidates(shape: Shape, record: &Record) -> &'static [Shape] {
    match shape {
        Shape::Folded if record.lines.len() > 1 => &[Shape::Folded, Shape::MultiLine],
        Shape::Folded => &[Shape::Folded],
        Shape::MultiLine => &[Shape::MultiLine],
        Shape::SingleLine => &[Shape::SingleLine],
    }
}

fn lex_record(record: &Record, options: &Options) -> Result<Lexeme, Error> {
    check_field_name(record)?;
    let text = record.text();
    let tokens = tokenize(&text);
    let shape = classify(record);
    log::debug!("line {}: classified as {}", record.line, shape);

    let mut mismatch = None;
    for candidate in candidates(shape, record) {
        let mut recognizer = recognizer_for(*candidate, options.trailing_comma);
        let reason = match recognizer.recognize(&tokens) {
            Ok((lexeme, m)) if m.consumed() == tokens.len() => return Ok(lexeme),
            Ok((_, m)) => Malformed::ShapeMismatch {
                shape: *candidate,
                offset: m.consumed(),
                found: tokens.get(m.consumed()).map(|t| t.value),
            },
            Err(RecognizeError::Stalled(e)) => Malformed::ShapeMismatch {
                shape: *candidate,
                offset: e.offset,
                found: Some(e.token.value),
            },
            Err(RecognizeError::Empty) => Malformed::EmptyValue,
            Err(RecognizeError::TrailingComma) => Malformed::TrailingComma,
            Err(RecognizeError::Truncated) => Malformed::MissingColon,
        };
        if !matches!(reason, Malformed::ShapeMismatch { .. }) {
            return Err(Error::MalformedRecord {
                line: record.line,
                reason,
            });
        }
        log::debug!("line {}: not {}: {}", record.line, candidate, reason);
        mismatch = Some(reason);
    }

    Err(Error::MalformedRecord {
        line: record.line,
        reason: mismatch.unwrap_or(Malformed::EmptyValue),
    })
}

/// Lex a whole document, stopping at the first fatal error.
pub(crate) fn lex(text: &str, options: &Options) -> Lexed {
    let mut lexemes = Vec::new();
    for record in Records::new(text, options.comments) {
        match record.and_then(|r| lex_record(&r, options)) {
            Ok(lexeme) => lexemes.push(lexeme),
            Err(e) => return Lexed::new(lexemes, Some(e)),
        }
    }
    Lexed::new(lexemes, None)
}

/// Split a document into paragraphs, separated by blank lines.
///
/// Returns each paragraph's text together with the 0-based line offset it
/// starts at.
pub(crate) fn paragraphs(text: &str) -> Vec<(usize, String)> {
    let mut paragraphs = Vec::new();
    let mut current: Option<(usize, String)> = None;
    for (i, line) in text.lines().enumerate() {
        if is_blank(line) {
            if let Some(p) = current.take() {
                paragraphs.push(p);
            }
            continue;
        }
        let (_, buf) = current.get_or_insert_with(|| (i, String::new()));
        buf.push_str(line);
        buf.push('\n');
    }
    paragraphs.extend(current);
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(text: &str) -> Vec<Record<'_>> {
        Records::new(text, true).collect::<Result<_, _>>().unwrap()
    }

    #[test]
    fn test_records() {
        let text = "A: 1\nB: 2,\n 3\n\n# comment\nC: x\n y\n";
        assert_eq!(
            records(text),
            vec![
                Record {
                    line: 1,
                    lines: vec!["A: 1"]
                },
                Record {
                    line: 2,
                    lines: vec!["B: 2,", " 3"]
                },
                Record {
                    line: 6,
                    lines: vec!["C: x", " y"]
                },
            ]
        );
    }

    #[test]
    fn test_records_comment_inside_field() {
        let text = "Depends: a,\n# b,\n c\n";
        assert_eq!(
            records(text),
            vec![Record {
                line: 1,
                lines: vec!["Depends: a,", " c"]
            }]
        );
    }

    #[test]
    fn test_records_crlf() {
        let text = "A: 1\r\nB: x\r\n y\r\n";
        assert_eq!(
            records(text),
            vec![
                Record {
                    line: 1,
                    lines: vec!["A: 1"]
                },
                Record {
                    line: 2,
                    lines: vec!["B: x", " y"]
                },
            ]
        );
    }

    #[test]
    fn test_records_orphan_continuation() {
        let mut it = Records::new(" orphan\nA: 1\n", true);
        assert!(matches!(
            it.next(),
            Some(Err(Error::MalformedRecord {
                line: 1,
                reason: Malformed::OrphanContinuation
            }))
        ));

        // A blank line ends the record, so the indented line has no field.
        let mut it = Records::new("A: 1\n\n orphan\n", true);
        assert!(matches!(it.next(), Some(Ok(_))));
        assert!(matches!(
            it.next(),
            Some(Err(Error::MalformedRecord {
                line: 3,
                reason: Malformed::OrphanContinuation
            }))
        ));
    }

    #[test]
    fn test_records_comments_disabled() {
        let mut it = Records::new("#A: 1\n", false);
        let record = it.next().unwrap().unwrap();
        assert_eq!(record.lines, vec!["#A: 1"]);
    }

    #[test]
    fn test_classify() {
        let shape = |text: &str| classify(&records(text)[0]);
        assert_eq!(shape("A: x"), Shape::SingleLine);
        assert_eq!(shape("A: x, y"), Shape::SingleLine);
        assert_eq!(shape("A: x,"), Shape::Folded);
        assert_eq!(shape("A: x,\n y"), Shape::Folded);
        assert_eq!(shape("A: x\n y"), Shape::MultiLine);
        assert_eq!(shape("A:\n x,\n y"), Shape::Folded);
        assert_eq!(shape("A:\n x,\n y,"), Shape::Folded);
        assert_eq!(shape("A:\n x,"), Shape::Folded);
        assert_eq!(shape("A:\n x\n y,"), Shape::MultiLine);
        assert_eq!(shape("A:\n x\n y"), Shape::MultiLine);
        assert_eq!(shape("Files:\n abc 12 foo.tar.gz"), Shape::MultiLine);
    }

    #[test]
    fn test_wrap_and_sort_layout() {
        let record = &records("Build-Depends:\n debhelper-compat (= 13),\n pkg-config,")[0];
        let lexeme = lex_record(record, &Options::default()).unwrap();
        assert_eq!(
            lexeme,
            Lexeme::Folded {
                field: "Build-Depends".to_string(),
                values: ["debhelper-compat (= 13)", "pkg-config"].map(String::from).to_vec(),
            }
        );
    }

    #[test]
    fn test_single_line_record_does_not_fall_back() {
        for text in ["Depends: a,,", "Depends: ,"] {
            let record = &records(text)[0];
            assert!(matches!(
                lex_record(record, &Options::default()),
                Err(Error::MalformedRecord {
                    line: 1,
                    reason: Malformed::ShapeMismatch {
                        shape: Shape::Folded,
                        ..
                    }
                })
            ));
        }
    }

    #[test]
    fn test_check_field_name() {
        let check = |text: &str| check_field_name(&records(text)[0]);
        assert!(check("Build-Depends: x").is_ok());
        assert!(check("Field : x").is_ok());
        assert!(matches!(
            check("1Field: x"),
            Err(Error::InvalidFieldName { line: 1, .. })
        ));
        assert!(matches!(
            check("Field Name: x"),
            Err(Error::InvalidFieldName { .. })
        ));
        assert!(matches!(
            check(": x"),
            Err(Error::InvalidFieldName { .. })
        ));
        assert!(matches!(
            check("Field x"),
            Err(Error::MalformedRecord {
                reason: Malformed::MissingColon,
                ..
            })
        ));
    }

    #[test]
    fn test_fallback_to_multi_line() {
        let record = &records("Depends: a,\n b\n c")[0];
        let lexeme = lex_record(record, &Options::default()).unwrap();
        assert_eq!(lexeme.shape(), Shape::MultiLine);
        assert_eq!(lexeme.values(), &["a,", "b", "c"].map(String::from));
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(
            paragraphs("A: 1\nB: 2\n\n\nC: 3\n \nD: 4"),
            vec![
                (0, "A: 1\nB: 2\n".to_string()),
                (4, "C: 3\n".to_string()),
                (6, "D: 4\n".to_string()),
            ]
        );
        assert!(paragraphs("\n\n").is_empty());
    }
}
