//! Character classification for the field automata.

/// Token classes understood by the automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
#[repr(u16)]
pub enum TokenKind {
    /// A space or a tab.
    SPACE = 0,
    /// `,`
    COMMA,
    /// `\n`
    NEWLINE,
    /// `:`
    COLON,
    /// An ASCII letter.
    LETTER,
    /// Anything else, including digits and punctuation.
    OTHER,
}

/// A single classified character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// The character itself.
    pub value: char,
    /// Its class.
    pub kind: TokenKind,
}

impl Token {
    /// Classify `value` into a token.
    pub fn new(value: char) -> Self {
        Self {
            value,
            kind: classify(value),
        }
    }
}

impl From<char> for Token {
    fn from(c: char) -> Self {
        Self::new(c)
    }
}

/// Map a character to its token class.
pub fn classify(c: char) -> TokenKind {
    match c {
        ' ' | '\t' => TokenKind::SPACE,
        ',' => TokenKind::COMMA,
        '\n' => TokenKind::NEWLINE,
        ':' => TokenKind::COLON,
        'a'..='z' | 'A'..='Z' => TokenKind::LETTER,
        _ => TokenKind::OTHER,
    }
}

/// Split text into tokens, one per character.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.chars().map(Token::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(' '), TokenKind::SPACE);
        assert_eq!(classify('\t'), TokenKind::SPACE);
        assert_eq!(classify(','), TokenKind::COMMA);
        assert_eq!(classify('\n'), TokenKind::NEWLINE);
        assert_eq!(classify(':'), TokenKind::COLON);
        assert_eq!(classify('a'), TokenKind::LETTER);
        assert_eq!(classify('Z'), TokenKind::LETTER);
        assert_eq!(classify('-'), TokenKind::OTHER);
        assert_eq!(classify('9'), TokenKind::OTHER);
        assert_eq!(classify('.'), TokenKind::OTHER);
        assert_eq!(classify('\r'), TokenKind::OTHER);
        // Non-ASCII letters are not part of the field alphabet
        assert_eq!(classify('é'), TokenKind::OTHER);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Ab: 1,\n")
                .into_iter()
                .map(|t| t.kind)
                .collect::<Vec<_>>(),
            vec![
                TokenKind::LETTER,
                TokenKind::LETTER,
                TokenKind::COLON,
                TokenKind::SPACE,
                TokenKind::OTHER,
                TokenKind::COMMA,
                TokenKind::NEWLINE,
            ]
        );
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_token_from_char() {
        let t: Token = 'x'.into();
        assert_eq!(t.value, 'x');
        assert_eq!(t.kind, TokenKind::LETTER);
    }
}
