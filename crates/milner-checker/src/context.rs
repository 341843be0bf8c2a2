//! The context is primarily a list of bindings from names to types that is on the left side of a
//! type judgment. Cloning it is cheap: the environment and the non-generic set are persistent
//! collections, so a nested scope extends its own copy and never changes what its parent sees.
//! The variable arena is shared by every clone of the session.

use std::{cell::RefCell, fmt, rc::Rc};

use itertools::Itertools;
use milner_error::{Error, TypeError};
use milner_location::ByteRange;

use crate::types::{MonoType, Type, TypeVar, Variables};

/// Names visible to an expression and the types they were bound to.
pub type Env = im_rc::HashMap<String, Type>;

#[derive(Clone, Default)]
pub struct Ctx {
    variables: Rc<RefCell<Variables>>,
    pub map: Env,
    /// Types whose variables must not be generalized when a name is referenced. They are kept as
    /// types and not as bare variables because a parameter variable that gets bound later pins
    /// every variable of its binding as well.
    pub non_generic: im_rc::Vector<Type>,
    pub location: ByteRange,
}

impl fmt::Debug for Ctx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ctx")
            .field("variables", &self.variables.borrow().len())
            .field("map", &self.map.keys().sorted().collect::<Vec<_>>())
            .field("non_generic", &self.non_generic.len())
            .field("location", &self.location)
            .finish()
    }
}

impl Ctx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends a context with a new binding.
    pub fn extend(&self, name: impl Into<String>, typ: Type) -> Self {
        Self {
            map: self.map.update(name.into(), typ),
            ..self.clone()
        }
    }

    /// Extends the set of types whose variables are pinned inside the current scope.
    pub fn extend_non_generic(&self, typ: Type) -> Self {
        let mut non_generic = self.non_generic.clone();
        non_generic.push_back(typ);
        Self {
            non_generic,
            ..self.clone()
        }
    }

    /// Binds a name in this scope, shadowing any previous binding.
    pub fn bind(&mut self, name: impl Into<String>, typ: Type) {
        self.map.insert(name.into(), typ);
    }

    /// Sets the current location that we are type checking inside of the context.
    pub fn set_position(&mut self, location: ByteRange) {
        self.location = location;
    }

    /// Looks up a name in the context.
    pub fn lookup(&self, name: &str) -> Option<Type> {
        self.map.get(name).cloned()
    }

    /// Creates a new free type variable with the next id of the session.
    pub fn new_hole(&self) -> Type {
        MonoType::var(self.variables.borrow_mut().fresh(None))
    }

    /// Creates a new free type variable labeled with the name it stands for.
    pub fn new_named_hole(&self, name: &str) -> Type {
        MonoType::var(self.variables.borrow_mut().fresh(Some(name.to_owned())))
    }

    pub fn instance(&self, var: TypeVar) -> Option<Type> {
        self.variables.borrow().instance(var)
    }

    pub fn knows(&self, var: TypeVar) -> bool {
        self.variables.borrow().contains(var)
    }

    pub fn var_name(&self, var: TypeVar) -> Option<String> {
        self.variables.borrow().name(var).map(str::to_owned)
    }

    pub(crate) fn fill(&self, var: TypeVar, typ: Type) {
        self.variables.borrow_mut().bind(var, typ);
    }

    /// Number of variables created so far in this session.
    pub fn variable_count(&self) -> usize {
        self.variables.borrow().len()
    }

    /// Starts a new session on this context, so ids start again from zero. Every binding is
    /// dropped along with the variables it could refer to, builtins included. Clones made before
    /// the reset keep the old session. The checker never calls this on its own.
    pub fn reset_variables(&mut self) {
        self.variables = Rc::default();
        self.map.clear();
        self.non_generic.clear();
    }

    /// Substitutes every bound variable of a type, producing a type that does not depend on the
    /// session bindings anymore.
    pub fn resolve(&self, typ: &Type) -> Type {
        let typ = crate::unify::prune(self, typ);
        match &*typ {
            MonoType::Var(_) => typ,
            MonoType::Operator(name, types) => MonoType::operator(
                name.clone(),
                types.iter().map(|t| self.resolve(t)).collect(),
            ),
        }
    }

    /// Renders a type following the bindings of the session.
    pub fn show(&self, typ: &Type) -> String {
        self.resolve(typ).to_string()
    }

    /// Creates an error located at the node that is being checked.
    pub fn error(&self, kind: TypeError) -> Error {
        Error::new(kind, self.location)
    }
}
