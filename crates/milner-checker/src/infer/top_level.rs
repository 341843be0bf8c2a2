//! Type inference for a whole program: a sequence of top-level expressions checked in order
//! against one environment.

use milner_error::Error;
use milner_tree::r#abstract::Expr;
use tracing::debug;

use super::Infer;
use crate::{context::Ctx, types::Type};

impl Infer for &[Expr] {
    type Context<'a> = &'a mut Ctx;
    type Return = Result<Vec<Type>, Error>;

    /// Declarations of one top-level expression are visible to the next ones. The returned types
    /// are resolved, one per expression. The first error stops the whole program.
    fn infer(self, ctx: Self::Context<'_>) -> Self::Return {
        let mut types = Vec::with_capacity(self.len());

        for (index, node) in self.iter().enumerate() {
            let typ = node.infer(&mut *ctx)?;
            let typ = ctx.resolve(&typ);

            debug!(index, typ = %typ, "checked top-level expression");
            types.push(typ);
        }

        Ok(types)
    }
}
