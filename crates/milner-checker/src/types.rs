//! Type representation. A type is either a [TypeVar], an unknown or polymorphic type, or a type
//! operator with a name and an ordered list of component types. Function types are the `->`
//! operator whose last component is the return type and whose other components are the
//! parameters, in order.
//!
//! Types are immutable and shared through [Rc]. Variables never hold their own binding: bindings
//! live in the [Variables] arena of the session, so a type has to be [resolved](crate::context::Ctx::resolve)
//! before it can be rendered meaningfully.

use std::{
    fmt::{self, Display},
    rc::Rc,
};

use itertools::Itertools;

pub type Type = Rc<MonoType>;

pub const ARROW: &str = "->";

/// Index of a type variable inside the [Variables] arena of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVar(pub usize);

impl TypeVar {
    /// `a` to `z` for the first 26 variables, then `a1` to `z1` and so on.
    pub fn letter(&self) -> String {
        let letter = char::from(b'a' + (self.0 % 26) as u8);
        match self.0 / 26 {
            0 => letter.to_string(),
            round => format!("{letter}{round}"),
        }
    }
}

impl Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonoType {
    Var(TypeVar),
    Operator(String, Vec<Type>),
}

impl Display for MonoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(var) => write!(f, "{var}"),
            Self::Operator(name, types) => match types.as_slice() {
                [] => write!(f, "{name}"),
                [left, right] => write!(f, "({left} {name} {right})"),
                types => write!(f, "{name}({})", types.iter().join(", ")),
            },
        }
    }
}

impl MonoType {
    pub fn var(var: TypeVar) -> Type {
        Rc::new(Self::Var(var))
    }

    pub fn operator(name: impl Into<String>, types: Vec<Type>) -> Type {
        Rc::new(Self::Operator(name.into(), types))
    }

    /// Builds a function type out of `[param1, ..., paramN, return]`.
    pub fn function(types: Vec<Type>) -> Type {
        Self::operator(ARROW, types)
    }

    pub fn arrow(params: impl IntoIterator<Item = Type>, ret: Type) -> Type {
        Self::function(params.into_iter().chain([ret]).collect())
    }

    pub fn primitive(primitive: Primitive) -> Type {
        Self::operator(primitive.name(), vec![])
    }

    pub fn as_var(&self) -> Option<TypeVar> {
        match self {
            Self::Var(var) => Some(*var),
            Self::Operator(..) => None,
        }
    }

    /// Free variables of the type in order of first appearance. Bindings are not followed, so
    /// this is only meaningful on resolved types.
    pub fn variables(&self) -> Vec<TypeVar> {
        fn collect(typ: &MonoType, acc: &mut Vec<TypeVar>) {
            match typ {
                MonoType::Var(var) if !acc.contains(var) => acc.push(*var),
                MonoType::Var(_) => {}
                MonoType::Operator(_, types) => types.iter().for_each(|t| collect(t, acc)),
            }
        }

        let mut acc = Vec::new();
        collect(self, &mut acc);
        acc
    }
}

/// Types that exist without being declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Number,
    String,
    Boolean,
    Null,
    Undefined,
    Void,
}

impl Primitive {
    pub const ALL: [Self; 6] = [
        Self::Number,
        Self::String,
        Self::Boolean,
        Self::Null,
        Self::Undefined,
        Self::Void,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Null => "Null",
            Self::Undefined => "Undefined",
            Self::Void => "Void",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone)]
pub struct VarItem {
    /// Diagnostic label, usually the name of the parameter the variable was made for.
    pub name: Option<String>,
    pub instance: Option<Type>,
}

/// Arena of every type variable of a session. The id of a variable is its index here, so ids
/// grow monotonically and are never reused while the arena lives.
#[derive(Debug, Default)]
pub struct Variables {
    items: Vec<VarItem>,
}

impl Variables {
    pub fn fresh(&mut self, name: Option<String>) -> TypeVar {
        self.items.push(VarItem {
            name,
            instance: None,
        });
        TypeVar(self.items.len() - 1)
    }

    pub fn contains(&self, var: TypeVar) -> bool {
        var.0 < self.items.len()
    }

    pub fn instance(&self, var: TypeVar) -> Option<Type> {
        self.items.get(var.0).and_then(|item| item.instance.clone())
    }

    pub fn name(&self, var: TypeVar) -> Option<&str> {
        self.items.get(var.0).and_then(|item| item.name.as_deref())
    }

    pub fn bind(&mut self, var: TypeVar, typ: Type) {
        if let Some(item) = self.items.get_mut(var.0) {
            item.instance = Some(typ);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
