//! This crate type checks milner expressions using the Hindley-Milner type system, in the style of
//! Cardelli's algorithm: bindings are not generalized explicitly, instead every variable that is
//! not pinned by the non-generic set of the scope is instantiated again at each reference.
//!
//! ```
//! use milner_checker::{prelude, typecheck};
//! use milner_tree::build::*;
//!
//! let mut ctx = prelude::context();
//! let program = [
//!     function("id", vec![param("x")], ident("x")),
//!     call(ident("id"), vec![number(200.0)]),
//! ];
//!
//! let types = typecheck(&program, &mut ctx).unwrap();
//! assert_eq!(types[1].to_string(), "Number");
//! ```

pub mod context;
pub mod generalize;
pub mod infer;
pub mod prelude;
pub mod types;
pub mod unify;

use milner_error::Error;
use milner_tree::r#abstract::Expr;

use self::{context::Ctx, infer::Infer, types::Type};

/// Infers the type of each top-level expression in order. Functions and lets declared at the top
/// level are added to the environment of `builtins`, so later expressions, and later calls with
/// the same context, can reference them.
pub fn typecheck(nodes: &[Expr], builtins: &mut Ctx) -> Result<Vec<Type>, Error> {
    nodes.infer(builtins)
}
