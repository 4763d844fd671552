//! Lexemes produced by the field recognizers.

/// The physical shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Shape {
    /// The value fits on the field line.
    SingleLine,
    /// A comma-separated list, continued on lines ending in a comma.
    Folded,
    /// A paragraph continued on indented lines.
    MultiLine,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Shape::SingleLine => "single-line",
            Shape::Folded => "folded",
            Shape::MultiLine => "multi-line",
        })
    }
}

/// A recognized field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "shape", rename_all = "kebab-case")
)]
pub enum Lexeme {
    /// A field whose value fits on one line.
    SingleLine {
        /// The field name, as written.
        field: String,
        /// The trimmed value.
        value: String,
    },

    /// A comma-separated list.
    Folded {
        /// The field name, as written.
        field: String,
        /// The items in source order, trimmed.
        values: Vec<String>,
    },

    /// A paragraph spanning several lines.
    MultiLine {
        /// The field name, as written.
        field: String,
        /// One entry per line; `.` continuation lines decode to empty strings.
        lines: Vec<String>,
    },
}

impl Lexeme {
    /// The field name.
    pub fn field(&self) -> &str {
        match self {
            Lexeme::SingleLine { field, .. }
            | Lexeme::Folded { field, .. }
            | Lexeme::MultiLine { field, .. } => field,
        }
    }

    /// The shape the value was written in.
    pub fn shape(&self) -> Shape {
        match self {
            Lexeme::SingleLine { .. } => Shape::SingleLine,
            Lexeme::Folded { .. } => Shape::Folded,
            Lexeme::MultiLine { .. } => Shape::MultiLine,
        }
    }

    /// The value as a slice: one element for single-line fields, the items
    /// of a folded field, or the lines of a multi-line field.
    pub fn values(&self) -> &[String] {
        match self {
            Lexeme::SingleLine { value, .. } => std::slice::from_ref(value),
            Lexeme::Folded { values, .. } => values.as_slice(),
            Lexeme::MultiLine { lines, .. } => lines.as_slice(),
        }
    }

    /// Join the value into an owned string.
    ///
    /// Folded items are joined with `", "`, lines with `"\n"`.
    pub fn join(&self) -> String {
        match self {
            Lexeme::SingleLine { value, .. } => value.clone(),
            Lexeme::Folded { values, .. } => values.join(", "),
            Lexeme::MultiLine { lines, .. } => lines.join("\n"),
        }
    }

    /// Check if this is a single-line field.
    pub fn is_single_line(&self) -> bool {
        matches!(self, Lexeme::SingleLine { .. })
    }

    /// Check if this is a folded field.
    pub fn is_folded(&self) -> bool {
        matches!(self, Lexeme::Folded { .. })
    }

    /// Check if this is a multi-line field.
    pub fn is_multi_line(&self) -> bool {
        matches!(self, Lexeme::MultiLine { .. })
    }
}

/// Renders the field back to deb822 text, without a trailing newline.
impl std::fmt::Display for Lexeme {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Lexeme::SingleLine { field, value } => write!(f, "{}: {}", field, value),
            Lexeme::Folded { field, values } => {
                write!(f, "{}: {}", field, values.join(",\n "))?;
                // A lone item keeps its comma so it still reads as a list.
                if values.len() == 1 {
                    f.write_str(",")?;
                }
                Ok(())
            }
            Lexeme::MultiLine { field, lines } => {
                write!(f, "{}:", field)?;
                let mut lines = lines.iter();
                if let Some(first) = lines.next() {
                    if !first.is_empty() {
                        write!(f, " {}", first)?;
                    }
                }
                for line in lines {
                    if line.is_empty() {
                        f.write_str("\n .")?;
                    } else {
                        write!(f, "\n {}", line)?;
                    }
                }
                Ok(())
            }
        }
    }
}
