use deb822_control::{Control, Person, Priority};
use indoc::indoc;

const NANO: &str = indoc! {"
    Source: nano
    Section: editors
    Priority: optional
    Maintainer: Jordi Mallach <jordi@debian.org>
    Uploaders: Anibal Monsalve Salazar <anibal@debian.org>,
     Jordi Mallach <jordi@debian.org>
    Build-Depends: autopoint,
     debhelper (>= 10),
     dh-autoreconf,
     gettext (>= 0.19.8.1),
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
     GNU nano also implements many features missing in Pico.

    Package: nano-tiny
    Architecture: any
    Depends: ${shlibs:Depends},
     ${misc:Depends}
    Description: small, friendly text editor inspired by Pico - tiny build
"};

#[test]
fn test_source_package() {
    let control: Control = NANO.parse().unwrap();
    let source = &control.source;
    assert_eq!(source.source, "nano");
    assert_eq!(source.section.as_deref(), Some("editors"));
    assert_eq!(source.priority, Some(Priority::Optional));
    assert_eq!(
        source.maintainer,
        Person {
            name: "Jordi Mallach".to_string(),
            email: Some("jordi@debian.org".to_string()),
        }
    );
    assert_eq!(source.uploaders.len(), 2);
    assert_eq!(source.uploaders[0].name, "Anibal Monsalve Salazar");
    assert_eq!(source.build_depends.len(), 7);
    assert_eq!(source.build_depends[1], "debhelper (>= 10)");
    assert_eq!(source.standards_version.as_deref(), Some("4.1.4"));
    assert!(!source.rules_requires_root);
    assert_eq!(
        source.homepage.as_deref(),
        Some("https://www.nano-editor.org/")
    );
    assert_eq!(
        source.vcs_git.as_deref(),
        Some("https://salsa.debian.org/debian/nano.git")
    );
    assert_eq!(
        source.vcs_browser.as_deref(),
        Some("https://salsa.debian.org/debian/nano")
    );
}

#[test]
fn test_binary_packages() {
    let control: Control = NANO.parse().unwrap();
    assert_eq!(control.binaries.len(), 2);

    let nano = control.binary("nano").unwrap();
    assert_eq!(nano.architecture, vec!["any"]);
    assert_eq!(nano.depends, vec!["${shlibs:Depends}", "${misc:Depends}"]);
    assert_eq!(nano.suggests, vec!["spell"]);
    assert_eq!(nano.conflicts, vec!["pico"]);
    assert_eq!(nano.breaks, vec!["nano-tiny (<< 2.8.6-2)"]);
    assert_eq!(nano.replaces, vec!["nano-tiny (<< 2.8.6-2)", "pico"]);
    assert!(nano.recommends.is_empty());
    let description = nano.description.as_ref().unwrap();
    assert_eq!(
        description.synopsis,
        "small, friendly text editor inspired by Pico"
    );
    assert_eq!(description.body.len(), 4);
    assert_eq!(description.body[2], "");

    // Written folded or on one line, the list is the same.
    let tiny = control.binary("nano-tiny").unwrap();
    assert_eq!(tiny.depends, nano.depends);
    assert!(tiny.description.as_ref().unwrap().body.is_empty());
}

#[test]
fn test_from_reader() {
    let control = Control::from_reader(NANO.as_bytes()).unwrap();
    assert_eq!(control, NANO.parse::<Control>().unwrap());
}

#[test]
fn test_wrap_and_sort_layout() {
    let control: Control = indoc! {"
        Source: nano
        Maintainer: Jordi Mallach <jordi@debian.org>
        Uploaders:
         Anibal Monsalve Salazar <anibal@debian.org>,
         Jordi Mallach <jordi@debian.org>,
        Build-Depends:
         debhelper-compat (= 13),
         pkg-config,

        Package: nano
        Architecture: any
        Depends:
         ${misc:Depends},
         ${shlibs:Depends},
    "}
    .parse()
    .unwrap();
    assert_eq!(control.source.uploaders.len(), 2);
    assert_eq!(
        control.source.build_depends,
        vec!["debhelper-compat (= 13)", "pkg-config"]
    );
    assert_eq!(
        control.binaries[0].depends,
        vec!["${misc:Depends}", "${shlibs:Depends}"]
    );
}
