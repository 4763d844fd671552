//! Source and binary package paragraphs.
use crate::fields::{Description, Person, Priority};
use crate::Error;
use deb822_fsm::Lexeme;

/// Split a list-valued field into its items.
///
/// A folded value is already split. A value written on a single line (or
/// as a paragraph) is split on commas the same way.
fn list(lexeme: &Lexeme) -> Vec<String> {
    match lexeme {
        Lexeme::Folded { values, .. } => values.clone(),
        _ => lexeme
            .join()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn parse_value<T>(lexeme: &Lexeme) -> Result<T, Error>
where
    T: std::str::FromStr<Err = String>,
{
    let value = lexeme.join();
    value.parse().map_err(|reason| Error::InvalidValue {
        field: lexeme.field().to_string(),
        value,
        reason,
    })
}

/// A paragraph, looked up by case-insensitive field name.
struct Paragraph<'a> {
    index: usize,
    lexemes: &'a [Lexeme],
}

impl<'a> Paragraph<'a> {
    fn get(&self, name: &str) -> Option<&'a Lexeme> {
        self.lexemes
            .iter()
            .find(|l| l.field().eq_ignore_ascii_case(name))
    }

    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn require(&self, name: &'static str) -> Result<&'a Lexeme, Error> {
        self.get(name).ok_or(Error::MissingField {
            paragraph: self.index,
            field: name,
        })
    }

    fn string(&self, name: &str) -> Option<String> {
        self.get(name).map(Lexeme::join)
    }

    fn list(&self, name: &str) -> Vec<String> {
        self.get(name).map(list).unwrap_or_default()
    }
}

/// The source package paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePackage {
    /// Name of the source package
    pub source: String,

    /// Archive section
    pub section: Option<String>,

    /// Priority
    pub priority: Option<Priority>,

    /// Maintainer
    pub maintainer: Person,

    /// Co-maintainers
    pub uploaders: Vec<Person>,

    /// Debian policy version the package complies with
    pub standards_version: Option<String>,

    /// Build dependencies, one relation per item
    pub build_depends: Vec<String>,

    /// Whether building the binary packages needs root
    pub rules_requires_root: bool,

    /// Upstream homepage
    pub homepage: Option<String>,

    /// Git repository of the packaging
    pub vcs_git: Option<String>,

    /// Web view of the packaging repository
    pub vcs_browser: Option<String>,
}

impl SourcePackage {
    /// Build the record from the lexemes of a source paragraph.
    pub fn from_lexemes(lexemes: &[Lexeme]) -> Result<Self, Error> {
        Self::from_paragraph(&Paragraph { index: 0, lexemes })
    }

    fn from_paragraph(p: &Paragraph) -> Result<Self, Error> {
        let source = p.require("Source")?.join();
        let maintainer = parse_value::<Person>(p.require("Maintainer")?)?;
        let priority = p.get("Priority").map(parse_value::<Priority>).transpose()?;
        let uploaders = match p.get("Uploaders") {
            Some(lexeme) => list(lexeme)
                .iter()
                .map(|s| {
                    s.parse::<Person>().map_err(|reason| Error::InvalidValue {
                        field: lexeme.field().to_string(),
                        value: s.clone(),
                        reason,
                    })
                })
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };
        // Absent means the historical default: root is required.
        let rules_requires_root = p
            .string("Rules-Requires-Root")
            .map_or(true, |v| v != "no");

        Ok(Self {
            source,
            section: p.string("Section"),
            priority,
            maintainer,
            uploaders,
            standards_version: p.string("Standards-Version"),
            build_depends: p.list("Build-Depends"),
            rules_requires_root,
            homepage: p.string("Homepage"),
            vcs_git: p.string("Vcs-Git"),
            vcs_browser: p.string("Vcs-Browser"),
        })
    }
}

/// A binary package paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryPackage {
    /// Name of the binary package
    pub name: String,

    /// Architectures the package is built for
    pub architecture: Vec<String>,

    /// Dependencies
    pub depends: Vec<String>,

    /// Recommended packages
    pub recommends: Vec<String>,

    /// Suggested packages
    pub suggests: Vec<String>,

    /// Packages this one breaks
    pub breaks: Vec<String>,

    /// Conflicting packages
    pub conflicts: Vec<String>,

    /// Packages this one replaces
    pub replaces: Vec<String>,

    /// Description
    pub description: Option<Description>,
}

impl BinaryPackage {
    /// Build the record from the lexemes of a binary package paragraph.
    pub fn from_lexemes(lexemes: &[Lexeme]) -> Result<Self, Error> {
        Self::from_paragraph(&Paragraph { index: 0, lexemes })
    }

    fn from_paragraph(p: &Paragraph) -> Result<Self, Error> {
        let name = p.require("Package")?.join();
        let architecture = p
            .require("Architecture")?
            .join()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Ok(Self {
            name,
            architecture,
            depends: p.list("Depends"),
            recommends: p.list("Recommends"),
            suggests: p.list("Suggests"),
            breaks: p.list("Breaks"),
            conflicts: p.list("Conflicts"),
            replaces: p.list("Replaces"),
            description: p
                .get("Description")
                .map(|l| Description::from_lines(l.values())),
        })
    }
}

/// A parsed `debian/control` file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Control {
    /// The source paragraph
    pub source: SourcePackage,

    /// The binary package paragraphs, in file order
    pub binaries: Vec<BinaryPackage>,
}

impl Control {
    /// Build a control file from lexemes grouped by paragraph.
    ///
    /// The first paragraph is the source paragraph; every later one must be a
    /// binary package.
    pub fn from_paragraphs(paragraphs: &[Vec<Lexeme>]) -> Result<Self, Error> {
        let mut paragraphs = paragraphs
            .iter()
            .enumerate()
            .map(|(index, lexemes)| Paragraph { index, lexemes });

        let source = match paragraphs.next() {
            Some(p) => SourcePackage::from_paragraph(&p)?,
            None => {
                return Err(Error::MissingField {
                    paragraph: 0,
                    field: "Source",
                })
            }
        };

        let mut binaries = Vec::new();
        for p in paragraphs {
            if !p.has("Package") && p.has("Source") {
                log::warn!("paragraph {}: ignoring extra source paragraph", p.index);
                continue;
            }
            binaries.push(BinaryPackage::from_paragraph(&p)?);
        }
        log::debug!(
            "source {} with {} binary packages",
            source.source,
            binaries.len()
        );

        Ok(Self { source, binaries })
    }

    /// Read a control file from a reader.
    pub fn from_reader<R: std::io::Read>(mut r: R) -> Result<Self, Error> {
        let mut buf = String::new();
        r.read_to_string(&mut buf)?;
        buf.parse()
    }

    /// Look up a binary package by name.
    pub fn binary(&self, name: &str) -> Option<&BinaryPackage> {
        self.binaries.iter().find(|b| b.name == name)
    }
}

impl std::str::FromStr for Control {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let paragraphs = deb822_fsm::parse_paragraphs(s)?;
        Self::from_paragraphs(&paragraphs)
    }
}
