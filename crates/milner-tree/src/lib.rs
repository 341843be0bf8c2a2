//! This module holds the tree that the checker consumes. It does not depend on anything of the
//! checker, only on milner-location that provides constructions to localize things in the source
//! code.
//!
//! - Abstract: a purely syntactic tree without semantic information. Whatever parses the surface
//!   language is expected to produce it, either directly or through its JSON form.
//! - Build: small constructors for writing trees by hand, mostly used by tests and builtins.

pub mod r#abstract;
pub mod build;
