//! Builtin bindings that programs can reference without declaring them.

use crate::{
    context::Ctx,
    types::{MonoType, Primitive, Type},
};

fn prim(primitive: Primitive) -> Type {
    MonoType::primitive(primitive)
}

/// Binds the builtins in the context. Polymorphic builtins get variables of the session of the
/// context, so the prelude must be installed on the session that will use it.
pub fn install(ctx: &mut Ctx) {
    use Primitive::*;

    let binary = |operand, result| MonoType::arrow([prim(operand), prim(operand)], prim(result));

    ctx.bind("add", binary(Number, Number));
    ctx.bind("sub", binary(Number, Number));
    ctx.bind("concat", binary(String, String));
    ctx.bind("equals", binary(Number, Boolean));
    ctx.bind("length", MonoType::arrow([prim(String)], prim(Number)));
    ctx.bind("not", MonoType::arrow([prim(Boolean)], prim(Boolean)));

    let a = ctx.new_named_hole("value");
    ctx.bind("toString", MonoType::arrow([a], prim(String)));

    let a = ctx.new_named_hole("value");
    ctx.bind("identity", MonoType::arrow([a.clone()], a));

    let (a, b) = (ctx.new_named_hole("value"), ctx.new_named_hole("ignored"));
    ctx.bind("constant", MonoType::arrow([a.clone(), b], a));
}

/// A fresh session with the builtins installed.
pub fn context() -> Ctx {
    let mut ctx = Ctx::new();
    install(&mut ctx);
    ctx
}
