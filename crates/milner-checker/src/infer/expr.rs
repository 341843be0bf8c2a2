//! Type inference for expressions.
//!
//! The context is passed mutably so that `let` and named functions can bind their name for the
//! expressions that follow them. Sub-expressions are inferred in a clone of the context, so
//! nothing they bind escapes to the parent, except for the statements of a block which share the
//! scope of the block.

use milner_error::{Error, TypeError};
use milner_tree::r#abstract::*;
use tracing::{debug, trace};

use super::Infer;
use crate::{context::Ctx, types::*, unify::unify};

impl Infer for &Expr {
    type Context<'a> = &'a mut Ctx;
    type Return = Result<Type, Error>;

    fn infer(self, ctx: Self::Context<'_>) -> Self::Return {
        ctx.set_position(self.location);
        trace!(location = %self.location, "inferring {}", kind_name(&self.data));

        match &self.data {
            ExprKind::Literal { value } => Ok(MonoType::primitive(match value {
                Literal::Number(_) => Primitive::Number,
                Literal::String(_) => Primitive::String,
                Literal::Boolean(_) => Primitive::Boolean,
                Literal::Null => Primitive::Null,
                Literal::Undefined => Primitive::Undefined,
            })),

            ExprKind::Identifier { name } => match ctx.lookup(name) {
                Some(typ) => Ok(ctx.instantiate(&typ)),
                None => Err(ctx.error(TypeError::UndefinedSymbol(name.to_owned()))),
            },

            ExprKind::Call(node) => {
                let mut types = node
                    .arguments
                    .iter()
                    .map(|arg| arg.infer(&mut ctx.clone()))
                    .collect::<Result<Vec<_>, _>>()?;

                let t_ret = ctx.new_hole();
                types.push(t_ret.clone());

                let callee = node.callee.infer(&mut ctx.clone())?;
                unify(ctx, &MonoType::function(types), &callee)?;

                Ok(t_ret)
            }

            ExprKind::Function(node) => node.infer(ctx),

            ExprKind::Let(node) => {
                let value = node.init.infer(&mut ctx.clone())?;

                if let Some(annotation) = &node.annotation {
                    let expected = annotation.infer(ctx)?;
                    unify(ctx, &value, &expected)?;
                }

                ctx.bind(node.name.clone(), value.clone());
                Ok(value)
            }

            ExprKind::Block { body } => {
                let mut scope = ctx.clone();
                let mut last = MonoType::primitive(Primitive::Void);

                for statement in body {
                    last = statement.infer(&mut scope)?;
                }

                Ok(last)
            }
        }
    }
}

impl Infer for &FunctionNode {
    type Context<'a> = &'a mut Ctx;
    type Return = Result<Type, Error>;

    fn infer(self, ctx: Self::Context<'_>) -> Self::Return {
        let mut body_ctx = ctx.clone();
        let mut types = Vec::with_capacity(self.params.len() + 1);

        for param in &self.params {
            let typ = match &param.annotation {
                Some(annotation) => annotation.infer(ctx)?,
                None => {
                    let hole = ctx.new_named_hole(&param.name);
                    body_ctx = body_ctx.extend_non_generic(hole.clone());
                    hole
                }
            };
            types.push(typ);
        }

        // The function can call itself, but only monomorphically.
        let itself = self.name.as_ref().map(|name| {
            let hole = ctx.new_named_hole(name);
            body_ctx = body_ctx
                .extend_non_generic(hole.clone())
                .extend(name.clone(), hole.clone());
            hole
        });

        for (param, typ) in self.params.iter().zip(&types) {
            body_ctx.bind(param.name.clone(), typ.clone());
        }

        let t_body = self.body.infer(&mut body_ctx)?;

        if let Some(returns) = &self.returns {
            let expected = returns.infer(ctx)?;
            unify(ctx, &t_body, &expected)?;
        }

        types.push(t_body);
        let t_fun = MonoType::function(types);

        if let Some(hole) = itself {
            unify(ctx, &hole, &t_fun)?;
        }

        if let Some(name) = &self.name {
            debug!(name = %name, typ = %ctx.show(&t_fun), "declared function");
            ctx.bind(name.clone(), t_fun.clone());
        }

        Ok(t_fun)
    }
}

fn kind_name(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Function(_) => "function",
        ExprKind::Call(_) => "call",
        ExprKind::Let(_) => "let",
        ExprKind::Identifier { .. } => "identifier",
        ExprKind::Literal { .. } => "literal",
        ExprKind::Block { .. } => "block",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milner_tree::build::*;

    fn infer(ctx: &mut Ctx, expr: &Expr) -> Result<String, Error> {
        expr.infer(ctx).map(|typ| ctx.show(&typ))
    }

    fn id() -> Expr {
        function("id", vec![param("x")], ident("x"))
    }

    #[test]
    fn identity_is_polymorphic_in_its_argument() {
        let mut ctx = Ctx::new();
        assert_eq!(infer(&mut ctx, &id()).unwrap(), "(a -> a)");
    }

    #[test]
    fn annotations_fix_parameters() {
        let mut ctx = Ctx::new();
        let f = function(
            "explicitNumber",
            vec![typed_param("x", named("Number"))],
            ident("x"),
        );

        assert_eq!(infer(&mut ctx, &f).unwrap(), "(Number -> Number)");
    }

    #[test]
    fn ignored_arguments_stay_free() {
        let mut ctx = Ctx::new();
        let f = function("ignoreArg", vec![param("a")], number(100.0));

        let typ = f.infer(&mut ctx).unwrap();
        let resolved = ctx.resolve(&typ);
        let [arg, ret] = match &*resolved {
            MonoType::Operator(_, types) => [types[0].clone(), types[1].clone()],
            MonoType::Var(_) => panic!("expected a function type"),
        };

        assert_eq!(ret.to_string(), "Number");
        let var = arg.as_var().unwrap();
        assert!(!ret.variables().contains(&var));
        assert_eq!(resolved.to_string(), format!("({var} -> Number)"));
    }

    #[test]
    fn call_sites_are_instantiated_independently() {
        let mut ctx = Ctx::new();
        id().infer(&mut ctx).unwrap();

        let with_number = call(ident("id"), vec![number(200.0)]);
        let with_string = call(ident("id"), vec![string("s")]);

        assert_eq!(infer(&mut ctx, &with_number).unwrap(), "Number");
        assert_eq!(infer(&mut ctx, &with_string).unwrap(), "String");
        assert_eq!(ctx.show(&ctx.lookup("id").unwrap()), "(a -> a)");
    }

    #[test]
    fn undefined_symbols_are_named() {
        let mut ctx = Ctx::new();
        let err = infer(&mut ctx, &ident("y")).unwrap_err();
        assert_eq!(err.kind, TypeError::UndefinedSymbol("y".into()));
    }

    #[test]
    fn missing_arguments_mismatch() {
        let mut ctx = Ctx::new();
        function("first", vec![param("x"), param("y")], ident("x"))
            .infer(&mut ctx)
            .unwrap();

        let err = infer(&mut ctx, &call(ident("first"), vec![number(1.0)])).unwrap_err();
        assert!(matches!(err.kind, TypeError::TypeMismatch { .. }));
    }

    #[test]
    fn parameters_are_not_generalized_inside_the_body() {
        let mut ctx = Ctx::new();
        let apply = function(
            "twice",
            vec![param("f"), param("x")],
            call(ident("f"), vec![call(ident("f"), vec![ident("x")])]),
        );

        assert_eq!(infer(&mut ctx, &apply).unwrap(), "->((b -> b), b, b)");
    }

    #[test]
    fn parameters_do_not_leak_out_of_the_function() {
        let mut ctx = Ctx::new();
        id().infer(&mut ctx).unwrap();

        let err = infer(&mut ctx, &ident("x")).unwrap_err();
        assert_eq!(err.kind, TypeError::UndefinedSymbol("x".into()));
    }

    #[test]
    fn return_annotations_are_checked() {
        let mut ctx = Ctx::new();
        let f = returning(
            function("f", vec![param("x")], ident("x")),
            named("String"),
        );
        assert_eq!(infer(&mut ctx, &f).unwrap(), "(String -> String)");

        let g = returning(function("g", vec![], number(1.0)), named("String"));
        let err = infer(&mut ctx, &g).unwrap_err();
        assert_eq!(
            err.kind,
            TypeError::TypeMismatch {
                left: "Number".into(),
                right: "String".into(),
            }
        );
    }

    #[test]
    fn lets_bind_for_what_follows() {
        let mut ctx = Ctx::new();
        infer(&mut ctx, &let_("a", string("hello"))).unwrap();

        assert_eq!(infer(&mut ctx, &ident("a")).unwrap(), "String");
    }

    #[test]
    fn let_annotations_are_unified() {
        let mut ctx = Ctx::new();
        let err = infer(&mut ctx, &typed_let("a", named("Number"), boolean(true))).unwrap_err();
        assert!(matches!(err.kind, TypeError::TypeMismatch { .. }));
        assert!(ctx.lookup("a").is_none());
    }

    #[test]
    fn blocks_scope_their_bindings() {
        let mut ctx = Ctx::new();
        let expr = block(vec![let_("a", number(1.0)), ident("a")]);

        assert_eq!(infer(&mut ctx, &expr).unwrap(), "Number");
        assert!(ctx.lookup("a").is_none());
        assert_eq!(infer(&mut ctx, &block(vec![])).unwrap(), "Void");
    }

    #[test]
    fn named_functions_can_recurse() {
        let mut ctx = Ctx::new();
        let loop_ = function("loop", vec![param("x")], call(ident("loop"), vec![ident("x")]));

        assert_eq!(infer(&mut ctx, &loop_).unwrap(), "(a -> c)");
    }

    #[test]
    fn recursion_that_needs_an_infinite_type_fails() {
        let mut ctx = Ctx::new();
        let f = function("f", vec![param("x")], ident("f"));

        let err = infer(&mut ctx, &f).unwrap_err();
        assert!(matches!(err.kind, TypeError::RecursiveUnification { .. }));
    }

    #[test]
    fn anonymous_functions_bind_nothing() {
        let mut ctx = Ctx::new();
        let expr = call(lambda(vec![param("x")], ident("x")), vec![boolean(false)]);

        assert_eq!(infer(&mut ctx, &expr).unwrap(), "Boolean");
        assert_eq!(ctx.map.len(), 0);
    }

    #[test]
    fn let_bound_functions_stay_generic_inside_a_body() {
        let mut ctx = Ctx::new();
        let f = function(
            "f",
            vec![param("x")],
            block(vec![
                let_("g", lambda(vec![param("y")], ident("y"))),
                call(ident("g"), vec![ident("x")]),
                call(ident("g"), vec![string("s")]),
            ]),
        );

        assert_eq!(infer(&mut ctx, &f).unwrap(), "(e -> String)");
    }

    #[test]
    fn aliases_of_parameters_are_not_generic() {
        let mut ctx = Ctx::new();
        let f = function(
            "f",
            vec![param("x")],
            block(vec![
                let_("y", ident("x")),
                call(ident("y"), vec![number(1.0)]),
                call(ident("y"), vec![string("s")]),
            ]),
        );

        let err = infer(&mut ctx, &f).unwrap_err();
        assert_eq!(
            err.kind,
            TypeError::TypeMismatch {
                left: "String".into(),
                right: "Number".into(),
            }
        );
    }

    #[test]
    fn nested_functions_inherit_outer_parameters() {
        let mut ctx = Ctx::new();
        let f = function(
            "f",
            vec![param("x")],
            function("g", vec![param("y")], ident("x")),
        );

        assert_eq!(infer(&mut ctx, &f).unwrap(), "(a -> (c -> a))");
        assert!(ctx.lookup("g").is_none());
    }

    #[test]
    fn literals_map_to_primitives() {
        let mut ctx = Ctx::new();
        let cases = [
            (literal(Literal::Null), "Null"),
            (literal(Literal::Undefined), "Undefined"),
            (boolean(true), "Boolean"),
            (string("s"), "String"),
            (number(1.5), "Number"),
        ];

        for (expr, expected) in cases {
            assert_eq!(infer(&mut ctx, &expr).unwrap(), expected);
        }
        assert_eq!(ctx.variable_count(), 0);
    }

    #[test]
    fn errors_point_at_the_failing_node() {
        use milner_location::{ByteRange, Located};

        let mut ctx = Ctx::new();
        let y = Located::new(
            ByteRange::new(4, 5),
            ExprKind::Identifier {
                name: "y".to_owned(),
            },
        );
        let expr = Located::new(
            ByteRange::new(0, 6),
            ExprKind::Call(CallNode {
                callee: Box::new(ident("f")),
                arguments: vec![y],
            }),
        );

        let err = infer(&mut ctx, &expr).unwrap_err();
        assert_eq!(err.location, ByteRange::new(4, 5));
    }
}
