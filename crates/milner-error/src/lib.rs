//! Errors produced while checking a program. Every error aborts the inference pass that raised
//! it, there is no recovery and no partial result.

use core::fmt;
use std::fmt::Display;

use milner_location::{ByteRange, Point, Range};
use thiserror::Error;

/// What went wrong. Types are stored already rendered so an error outlives the session that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A variable would have to contain itself, which is a type of infinite size.
    #[error("recursive unification: '{var}' occurs in '{typ}'")]
    RecursiveUnification { var: String, typ: String },

    /// Two type operators with different names or a different number of components. Calls with
    /// the wrong number of arguments end up here too.
    #[error("type mismatch between '{left}' and '{right}'")]
    TypeMismatch { left: String, right: String },

    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),

    #[error("cannot unify '{left}' with '{right}'")]
    Unification { left: String, right: String },

    /// An annotation names a type that does not exist.
    #[error("unknown type '{0}' in annotation")]
    UnknownType(String),
}

/// A [TypeError] together with the location of the node that was being checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: TypeError,
    pub location: ByteRange,
}

impl Error {
    pub const fn new(kind: TypeError, location: ByteRange) -> Self {
        Self { kind, location }
    }

    pub fn with_code<'a>(&'a self, code: &'a str, file_name: &'a str) -> ErrorWithCode<'a> {
        ErrorWithCode {
            err: self,
            code,
            file_name,
        }
    }
}

impl From<TypeError> for Error {
    fn from(kind: TypeError) -> Self {
        Self::new(kind, ByteRange::default())
    }
}

/// Renders an error pointing at the source text the tree came from.
pub struct ErrorWithCode<'a> {
    err: &'a Error,
    code: &'a str,
    file_name: &'a str,
}

impl<'a> Display for ErrorWithCode<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            err: Error { kind, location },
            code,
            file_name,
        } = self;

        writeln!(f, "\n[error]: {kind}\n")?;

        if location.is_empty() {
            return writeln!(f, "{:>PAD$} ┌─> {file_name}", "");
        }

        let Range(start @ Point { line, column }, end) = location.locate(code);

        writeln!(f, "{:>PAD$} ┌─> {file_name}:{start}", "")?;
        writeln!(f, "{:>PAD$} │", "")?;

        for (text, line_number) in code.lines().skip(line).zip(line..=end.line) {
            writeln!(f, "{:>PAD$} │ {}", line_number + 1, text)?;
        }

        if line == end.line {
            let size = end.column.saturating_sub(column).max(1);
            writeln!(f, "{:>PAD$} │ {:>column$}{:^>size$}", "", "", "")?;
        }

        writeln!(f, "{:>PAD$} │", "")
    }
}

const PAD: usize = 3;
