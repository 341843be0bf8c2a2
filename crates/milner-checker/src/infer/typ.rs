//! Type inference for types on type annotations.

use milner_error::{Error, TypeError};
use milner_tree::r#abstract::Annotation;

use super::Infer;
use crate::{context::Ctx, types::*};

impl Infer for &Annotation {
    type Context<'a> = &'a Ctx;
    type Return = Result<Type, Error>;

    fn infer(self, ctx: Self::Context<'_>) -> Self::Return {
        match self {
            Annotation::Named(name) => Primitive::from_name(name)
                .map(MonoType::primitive)
                .ok_or_else(|| ctx.error(TypeError::UnknownType(name.to_owned()))),

            Annotation::Function { params, returns } => {
                let params = params
                    .iter()
                    .map(|param| param.infer(ctx))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(MonoType::arrow(params, returns.infer(ctx)?))
            }
        }
    }
}
