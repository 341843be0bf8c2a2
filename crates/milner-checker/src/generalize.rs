//! Instantiation of polymorphic types. Every time a name is referenced its type is copied with
//! [fresh], so each use site gets variables of its own, except for the variables that are pinned
//! by the non-generic set of the scope.

use std::collections::HashMap;

use crate::{
    context::Ctx,
    types::{MonoType, Type, TypeVar},
    unify::{occurs_in_types, prune},
};

/// Variables already replaced during one [fresh] call.
pub type Mappings = HashMap<TypeVar, Type>;

/// Checks if a variable is pinned by one of the non-generic types of the scope.
pub fn is_generic(ctx: &Ctx, var: TypeVar) -> bool {
    !occurs_in_types(ctx, var, ctx.non_generic.iter())
}

/// Copies a type replacing each generic variable with a new one. Occurrences of the same variable
/// map to the same replacement, so `a -> a` becomes `b -> b` and never `b -> c`. Operators are
/// always rebuilt.
pub fn fresh(ctx: &Ctx, typ: &Type, mappings: &mut Mappings) -> Type {
    let typ = prune(ctx, typ);

    match &*typ {
        MonoType::Var(var) if is_generic(ctx, *var) => mappings
            .entry(*var)
            .or_insert_with(|| match ctx.var_name(*var) {
                Some(name) => ctx.new_named_hole(&name),
                None => ctx.new_hole(),
            })
            .clone(),

        MonoType::Var(_) => typ,

        MonoType::Operator(name, types) => MonoType::operator(
            name.clone(),
            types.iter().map(|t| fresh(ctx, t, mappings)).collect(),
        ),
    }
}

impl Ctx {
    /// Instantiates a type for one use site in the current scope.
    pub fn instantiate(&self, typ: &Type) -> Type {
        fresh(self, typ, &mut Mappings::new())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{types::Primitive, unify::unify};

    #[test]
    fn keeps_internal_relations() {
        let ctx = Ctx::new();
        let a = ctx.new_hole();
        let id = MonoType::arrow([a.clone()], a);

        let copy = ctx.instantiate(&id);
        assert_eq!(copy.to_string(), "(b -> b)");
    }

    #[test]
    fn pinned_variables_are_shared() {
        let ctx = Ctx::new();
        let a = ctx.new_hole();
        let b = ctx.new_hole();
        let scope = ctx.extend_non_generic(a.clone());

        let copy = scope.instantiate(&MonoType::arrow([a.clone()], b));
        match &*copy {
            MonoType::Operator(_, types) => {
                assert!(Rc::ptr_eq(&types[0], &a));
                assert_eq!(types[1].as_var(), Some(TypeVar(2)));
            }
            MonoType::Var(_) => panic!("expected a function type"),
        }
    }

    #[test]
    fn pinning_follows_bindings() {
        let ctx = Ctx::new();
        let (param, inner) = (ctx.new_hole(), ctx.new_hole());
        let scope = ctx.extend_non_generic(param.clone());

        unify(&ctx, &param, &MonoType::arrow([inner.clone()], inner.clone())).unwrap();

        assert!(!is_generic(&scope, TypeVar(1)));
        assert_eq!(scope.show(&scope.instantiate(&inner)), "b");
    }

    #[test]
    fn independent_instantiations_differ_in_ids_only() {
        let ctx = Ctx::new();
        let a = ctx.new_hole();
        let id = MonoType::arrow([a.clone()], a);

        let first = ctx.instantiate(&id);
        let second = ctx.instantiate(&id);

        assert_eq!(first.variables(), vec![TypeVar(1)]);
        assert_eq!(second.variables(), vec![TypeVar(2)]);
        assert_eq!(first.to_string().replace('b', "x"), second.to_string().replace('c', "x"));
    }

    #[test]
    fn operators_are_copied() {
        let ctx = Ctx::new();
        let num = MonoType::primitive(Primitive::Number);

        let copy = ctx.instantiate(&num);
        assert!(!Rc::ptr_eq(&copy, &num));
        assert_eq!(copy, num);
    }
}
