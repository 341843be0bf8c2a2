//! Constructors for trees written by hand. Every node built here is synthesized, so it has an
//! empty location.

use milner_location::Located;

use crate::r#abstract::*;

pub fn ident(name: &str) -> Expr {
    Located::synthesized(ExprKind::Identifier {
        name: name.to_owned(),
    })
}

pub fn literal(value: Literal) -> Expr {
    Located::synthesized(ExprKind::Literal { value })
}

pub fn number(n: f64) -> Expr {
    literal(Literal::Number(n))
}

pub fn string(s: &str) -> Expr {
    literal(Literal::String(s.to_owned()))
}

pub fn boolean(b: bool) -> Expr {
    literal(Literal::Boolean(b))
}

pub fn call(callee: Expr, arguments: Vec<Expr>) -> Expr {
    Located::synthesized(ExprKind::Call(CallNode {
        callee: Box::new(callee),
        arguments,
    }))
}

/// An unannotated parameter.
pub fn param(name: &str) -> Param {
    Param {
        name: name.to_owned(),
        annotation: None,
    }
}

pub fn typed_param(name: &str, annotation: Annotation) -> Param {
    Param {
        name: name.to_owned(),
        annotation: Some(annotation),
    }
}

pub fn named(name: &str) -> Annotation {
    Annotation::Named(name.to_owned())
}

pub fn function(name: &str, params: Vec<Param>, body: Expr) -> Expr {
    Located::synthesized(ExprKind::Function(FunctionNode {
        name: Some(name.to_owned()),
        params,
        body: Box::new(body),
        returns: None,
    }))
}

pub fn lambda(params: Vec<Param>, body: Expr) -> Expr {
    Located::synthesized(ExprKind::Function(FunctionNode {
        name: None,
        params,
        body: Box::new(body),
        returns: None,
    }))
}

/// Adds a return annotation to a function node, leaving any other node untouched.
pub fn returning(mut expr: Expr, annotation: Annotation) -> Expr {
    if let ExprKind::Function(node) = &mut expr.data {
        node.returns = Some(annotation);
    }
    expr
}

pub fn let_(name: &str, init: Expr) -> Expr {
    Located::synthesized(ExprKind::Let(LetNode {
        name: name.to_owned(),
        init: Box::new(init),
        annotation: None,
    }))
}

pub fn typed_let(name: &str, annotation: Annotation, init: Expr) -> Expr {
    Located::synthesized(ExprKind::Let(LetNode {
        name: name.to_owned(),
        init: Box::new(init),
        annotation: Some(annotation),
    }))
}

pub fn block(body: Vec<Expr>) -> Expr {
    Located::synthesized(ExprKind::Block { body })
}
