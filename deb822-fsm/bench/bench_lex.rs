use criterion::{criterion_group, criterion_main, Criterion};

const CONTROL: &str = r#"Source: nano
Section: editors
Priority: optional
Maintainer: Jordi Mallach <jordi@debian.org>
Uploaders: Anibal Monsalve Salazar <anibal@debian.org>,
 Jordi Mallach <jordi@debian.org>
Build-Depends: autopoint,
 debhelper (>= 10),
 dh-autoreconf,
 gettext (>= 0.19.8.1),
 groff-base,
 libmagic-dev,
 libncursesw5-dev,
 texinfo
Standards-Version: 4.1.4
Rules-Requires-Root: no
Homepage: https://www.nano-editor.org/
Vcs-Git: https://salsa.debian.org/debian/nano.git
Vcs-Browser: https://salsa.debian.org/debian/nano

Package: nano
Architecture: any
Depends: ${shlibs:Depends}, ${misc:Depends}
Suggests: spell
Conflicts: pico
Breaks: nano-tiny (<< 2.8.6-2)
Replaces: nano-tiny (<< 2.8.6-2), pico
Description: small, friendly text editor inspired by Pico
 GNU nano is an easy-to-use text editor originally designed as a replacement
 for Pico, the ncurses-based editor from the non-free mailer package Pine.
 .
 GNU nano also implements many features missing in Pico, including:
  - undo/redo
  - line numbering
  - syntax coloring
"#;

fn lex_control_benchmark(c: &mut Criterion) {
    let text = CONTROL.repeat(50);

    c.bench_function("lex_control", |b| {
        b.iter(|| {
            let _lexemes = deb822_fsm::parse(&text).unwrap();
        });
    });

    c.bench_function("lex_control_paragraphs", |b| {
        b.iter(|| {
            let _paragraphs = deb822_fsm::parse_paragraphs(&text).unwrap();
        });
    });
}

criterion_group!(benches, lex_control_benchmark);
criterion_main!(benches);
