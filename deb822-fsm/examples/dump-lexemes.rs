use deb822_fsm::{Lexeme, Lexer};

pub const TEXT: &str = r#"Source: nano
Maintainer: Jordi Mallach <jordi@debian.org>
Build-Depends: debhelper (>= 9),
 pkg-config,
 libncurses-dev
Description: small, friendly text editor inspired by Pico
 GNU nano is an easy-to-use text editor.
 .
 It also implements many features missing in Pico.
"#;

pub fn main() {
    env_logger::init();

    let text = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => TEXT.to_string(),
    };

    let lexed = Lexer::new().lex(&text);
    for lexeme in lexed.lexemes() {
        match lexeme {
            Lexeme::SingleLine { field, value } => println!("{} [single-line] {}", field, value),
            Lexeme::Folded { field, values } => {
                println!("{} [folded]", field);
                for value in values {
                    println!("  - {}", value);
                }
            }
            Lexeme::MultiLine { field, lines } => {
                println!("{} [multi-line]", field);
                for line in lines {
                    println!("  | {}", line);
                }
            }
        }
    }

    if let Some(e) = lexed.error() {
        eprintln!("Failed to lex: {}", e);
        std::process::exit(1);
    }
}
