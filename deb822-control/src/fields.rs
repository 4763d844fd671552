//! Fields for the control file
use std::str::FromStr;

/// Priority of a package
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    /// Required
    Required,

    /// Important
    Important,

    /// Standard
    Standard,

    /// Optional
    Optional,

    /// Extra
    Extra,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Priority::Required => "required",
            Priority::Important => "important",
            Priority::Standard => "standard",
            Priority::Optional => "optional",
            Priority::Extra => "extra",
        })
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(Priority::Required),
            "important" => Ok(Priority::Important),
            "standard" => Ok(Priority::Standard),
            "optional" => Ok(Priority::Optional),
            "extra" => Ok(Priority::Extra),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

/// A person, as written in `Maintainer` and `Uploaders`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    /// Full name
    pub name: String,

    /// E-mail address, without the angle brackets
    pub email: Option<String>,
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.email {
            Some(email) if self.name.is_empty() => write!(f, "<{}>", email),
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for Person {
    type Err = String;

    /// Parse `Name <email>`; the address part is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty person".to_string());
        }
        let Some(rest) = s.strip_suffix('>') else {
            return Ok(Self {
                name: s.to_string(),
                email: None,
            });
        };
        let (name, email) = rest
            .rsplit_once('<')
            .ok_or_else(|| format!("Unbalanced angle brackets in {:?}", s))?;
        let email = email.trim();
        if email.is_empty() || email.contains(['<', '>']) {
            return Err(format!("Invalid e-mail address in {:?}", s));
        }
        Ok(Self {
            name: name.trim().to_string(),
            email: Some(email.to_string()),
        })
    }
}

/// A package description: a one-line synopsis and an extended body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Description {
    /// The first line
    pub synopsis: String,

    /// The remaining lines; empty strings are paragraph breaks.
    pub body: Vec<String>,
}

impl Description {
    /// Build a description from the lines of a field value.
    pub fn from_lines(lines: &[String]) -> Self {
        match lines.split_first() {
            Some((synopsis, body)) => Self {
                synopsis: synopsis.clone(),
                body: body.to_vec(),
            },
            None => Self::default(),
        }
    }

    /// The extended description as a single string.
    pub fn long(&self) -> String {
        self.body.join("\n")
    }
}

impl std::fmt::Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.synopsis)?;
        for line in &self.body {
            if line.is_empty() {
                f.write_str("\n .")?;
            } else {
                write!(f, "\n {}", line)?;
            }
        }
        Ok(())
    }
}
