//! This module exposes functions like [unify] and [occurs_in_type] for unification and occurs
//! checking that are useful for the checker to check if two types are equal. Unification binds
//! variables in the session arena, so these functions produce side effects.

use milner_error::{Error, TypeError};
use tracing::debug;

use crate::{
    context::Ctx,
    types::{MonoType, Type, TypeVar},
};

/// Follows the bindings of a variable until reaching an operator or a free variable. Every
/// variable visited on the way is rebound directly to that terminal type.
pub fn prune(ctx: &Ctx, typ: &Type) -> Type {
    match &**typ {
        MonoType::Var(var) => match ctx.instance(*var) {
            Some(instance) => {
                let terminal = prune(ctx, &instance);
                ctx.fill(*var, terminal.clone());
                terminal
            }
            None => typ.clone(),
        },
        MonoType::Operator(..) => typ.clone(),
    }
}

/// Checks if a variable occurs inside a type, following bindings.
pub fn occurs_in_type(ctx: &Ctx, var: TypeVar, typ: &Type) -> bool {
    let typ = prune(ctx, typ);
    match &*typ {
        MonoType::Var(other) => *other == var,
        MonoType::Operator(_, types) => occurs_in_types(ctx, var, types),
    }
}

pub fn occurs_in_types<'a>(
    ctx: &Ctx,
    var: TypeVar,
    types: impl IntoIterator<Item = &'a Type>,
) -> bool {
    types.into_iter().any(|typ| occurs_in_type(ctx, var, typ))
}

/// Tries to make two types equal, binding free variables of both sides. It fails if the two
/// types have a different shape or if a variable would have to contain itself.
pub fn unify(ctx: &Ctx, left: &Type, right: &Type) -> Result<(), Error> {
    let left = prune(ctx, left);
    let right = prune(ctx, right);

    match (&*left, &*right) {
        (MonoType::Var(x), MonoType::Var(y)) if x == y => Ok(()),

        (MonoType::Var(var), _) => unify_hole(ctx, *var, &right),

        (MonoType::Operator(..), MonoType::Var(_)) => unify(ctx, &right, &left),

        (MonoType::Operator(name, types), MonoType::Operator(other_name, other_types)) => {
            if name != other_name || types.len() != other_types.len() {
                return Err(ctx.error(TypeError::TypeMismatch {
                    left: ctx.show(&left),
                    right: ctx.show(&right),
                }));
            }

            for (l, r) in types.iter().zip(other_types) {
                unify(ctx, l, r)?;
            }

            Ok(())
        }
    }
}

/// Binds a free variable to a type after the occurs check.
fn unify_hole(ctx: &Ctx, var: TypeVar, other: &Type) -> Result<(), Error> {
    if !ctx.knows(var) {
        return Err(ctx.error(TypeError::Unification {
            left: var.to_string(),
            right: ctx.show(other),
        }));
    }

    if occurs_in_type(ctx, var, other) {
        return Err(ctx.error(TypeError::RecursiveUnification {
            var: var.to_string(),
            typ: ctx.show(other),
        }));
    }

    debug!(
        var = %var,
        name = ?ctx.var_name(var),
        typ = %ctx.show(other),
        "binding type variable"
    );

    ctx.fill(var, other.clone());
    Ok(())
}
