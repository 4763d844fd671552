#![no_main]

use deb822_fsm::{Lexer, Options, TrailingComma};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let lexed = Lexer::new().lex(s);

        // Rendering a lexeme and lexing it again must give it back
        for lexeme in lexed.lexemes() {
            let again = deb822_fsm::parse(&lexeme.to_string());
            assert_eq!(again.ok().as_deref(), Some(std::slice::from_ref(lexeme)));
        }

        let _ = Lexer::with_options(Options {
            trailing_comma: TrailingComma::Reject,
            comments: false,
        })
        .lex(s);
        let _ = deb822_fsm::parse_paragraphs(s);
    }
});
