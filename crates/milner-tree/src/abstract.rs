//! This module describes the tree that comes from the producer of the program. It contains pure
//! syntactic information. The main type of this file is [Expr].
//!
//! The JSON form of the tree follows the ESTree naming, e.g.
//!
//! ```json
//! { "type": "CallExpression",
//!   "callee": { "type": "Identifier", "name": "id" },
//!   "arguments": [{ "type": "Literal", "value": 200 }] }
//! ```

use std::fmt::{self, Display};

use itertools::Itertools;
use milner_location::Located;
use serde::Deserialize;

/// Literal values. A literal node without a value is `undefined`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Boolean(bool),
    Number(f64),
    String(String),
    Null,
    #[default]
    #[serde(skip_deserializing)]
    Undefined,
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Null => write!(f, "null"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

/// Type annotations written by the user on parameters, return positions and let bindings. Names
/// are resolved by the checker, e.g. `"Number"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Annotation {
    Named(String),
    Function {
        params: Vec<Annotation>,
        returns: Box<Annotation>,
    },
}

impl Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Function { params, returns } => {
                write!(f, "(({}) -> {returns})", params.iter().join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub annotation: Option<Annotation>,
}

impl Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.annotation {
            Some(typ) => write!(f, "({} : {typ})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A function abstraction. Named functions are declarations: the name is bound in the scope the
/// function appears in and inside its own body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionNode {
    #[serde(default)]
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: Box<Expr>,
    #[serde(default)]
    pub returns: Option<Annotation>,
}

impl Display for FunctionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(fun")?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        for param in &self.params {
            write!(f, " {param}")?;
        }
        if let Some(returns) = &self.returns {
            write!(f, " : {returns}")?;
        }
        write!(f, " = {})", self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CallNode {
    pub callee: Box<Expr>,
    #[serde(default)]
    pub arguments: Vec<Expr>,
}

impl Display for CallNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.callee)?;
        for arg in &self.arguments {
            write!(f, " {arg}")?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LetNode {
    pub name: String,
    pub init: Box<Expr>,
    #[serde(default)]
    pub annotation: Option<Annotation>,
}

impl Display for LetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.annotation {
            Some(typ) => write!(f, "(let {} : {typ} = {})", self.name, self.init),
            None => write!(f, "(let {} = {})", self.name, self.init),
        }
    }
}

/// Expressions are language constructions that intrinsically contain a value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ExprKind {
    #[serde(rename = "FunctionDeclaration", alias = "Function")]
    Function(FunctionNode),
    #[serde(rename = "CallExpression", alias = "Call")]
    Call(CallNode),
    #[serde(rename = "VariableDeclarator", alias = "Let")]
    Let(LetNode),
    Identifier {
        name: String,
    },
    Literal {
        #[serde(default)]
        value: Literal,
    },
    /// A sequence of expressions, the bindings of one are visible to the following ones.
    #[serde(rename = "BlockStatement", alias = "Block")]
    Block {
        body: Vec<Expr>,
    },
}

impl Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(n) => write!(f, "{n}"),
            Self::Call(n) => write!(f, "{n}"),
            Self::Let(n) => write!(f, "{n}"),
            Self::Identifier { name } => write!(f, "{name}"),
            Self::Literal { value } => write!(f, "{value}"),
            Self::Block { body } => write!(f, "{{{}}}", body.iter().join("; ")),
        }
    }
}

/// A milner expression is some syntactic element that intrinsically has a value. It can be a
/// literal value, a variable, a function call, a function definition and etc.
pub type Expr = Located<ExprKind>;
