#![deny(missing_docs)]
//! Source and binary package records for Debian control files.
//!
//! The control file is lexed with [`deb822_fsm`]; each paragraph is then
//! mapped onto a [`SourcePackage`] or a [`BinaryPackage`].
//!
//! # Example
//!
//! ```rust
//! use deb822_control::Control;
//!
//! let control: Control = r#"Source: hello
//! Maintainer: Jane Doe <jane@example.com>
//! Build-Depends: debhelper (>= 9),
//!  pkg-config
//!
//! Package: hello
//! Architecture: any
//! Description: greet the world
//!  Prints a friendly greeting.
//! "#
//! .parse()
//! .unwrap();
//!
//! assert_eq!(control.source.source, "hello");
//! assert_eq!(control.source.maintainer.email.as_deref(), Some("jane@example.com"));
//! assert_eq!(control.source.build_depends, vec!["debhelper (>= 9)", "pkg-config"]);
//! assert_eq!(control.binaries[0].name, "hello");
//! ```

mod control;
mod error;
pub mod fields;

pub use control::{BinaryPackage, Control, SourcePackage};
pub use error::Error;
pub use fields::{Description, Person, Priority};
