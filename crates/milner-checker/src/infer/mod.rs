//! Exposes an interface to infer the type of expressions and annotations. The main construction
//! of this module is the [Infer] trait.

pub mod expr;
pub mod top_level;
pub mod typ;

/// This trait exposes a function called [Infer::infer] that tries to discover a type for a node.
/// Functions and calls are typed over the operator `->` whose last component is the result:
///
/// ```md
///    a1..an = new_hole     G, x1: a1, .., xn: an |- e => r
/// ------------------------------------------------------------
///            G |- fun f x1 .. xn = e => ->(a1, .., an, r)
///
///    G |- e1 => t1  ..  G |- en => tn     r = new_hole     G |- f => ->(t1, .., tn, r)
/// --------------------------------------------------------------------------------------
///                               G |- f e1 .. en => r
/// ```
///
/// The holes `a1..an` join the non-generic set while `e` is checked.
pub trait Infer {
    type Context<'a>;
    type Return;

    /// Infers the type of an expression.
    fn infer(self, ctx: Self::Context<'_>) -> Self::Return;
}
