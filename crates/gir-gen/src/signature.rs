//! Elaborated definitions and the collaborators GIR generation consults.

use crate::syntax::{Clause, Name, QualifiedName, Telescope, Term, Type};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instantiability {
    /// Declared but opaque. There is no body to lower.
    Open,
    /// Clauses already checked for exhaustiveness and confluence.
    Invertible(Vec<Clause>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Function(Instantiability),
    Postulate,
    Data(Vec<QualifiedName>),
    Record {
        constructor: QualifiedName,
        projections: Vec<QualifiedName>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Module(Vec<QualifiedName>),
    Constant(Type, Constant),
    DataConstructor {
        data: QualifiedName,
        arity: usize,
        ty: Type,
    },
    Projection {
        record: QualifiedName,
        field_index: usize,
        ty: Type,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextualDefinition {
    pub telescope: Telescope,
    pub inside: Definition,
}

impl ContextualDefinition {
    pub fn new(inside: Definition) -> Self {
        Self {
            telescope: Telescope::new(),
            inside,
        }
    }

    pub fn function(ty: Type, clauses: Vec<Clause>) -> Self {
        Self::new(Definition::Constant(
            ty,
            Constant::Function(Instantiability::Invertible(clauses)),
        ))
    }

    pub fn open_function(ty: Type) -> Self {
        Self::new(Definition::Constant(
            ty,
            Constant::Function(Instantiability::Open),
        ))
    }

    pub fn data(ty: Type, constructors: &[&str]) -> Self {
        Self::new(Definition::Constant(
            ty,
            Constant::Data(constructors.iter().map(|c| QualifiedName::from(*c)).collect()),
        ))
    }

    pub fn data_constructor(data: &str, arity: usize, ty: Type) -> Self {
        Self::new(Definition::DataConstructor {
            data: data.into(),
            arity,
            ty,
        })
    }

    pub fn with_telescope(mut self, telescope: Telescope) -> Self {
        self.telescope = telescope;
        self
    }
}

/// Every elaborated definition of a translation unit, keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    definitions: IndexMap<QualifiedName, ContextualDefinition>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<QualifiedName>, def: ContextualDefinition) -> &mut Self {
        self.definitions.insert(name.into(), def);
        self
    }

    pub fn lookup_definition(&self, name: &QualifiedName) -> Option<&ContextualDefinition> {
        self.definitions.get(name)
    }

    /// All declared constructors of the data type `constructor` belongs to.
    pub fn constructors_of_data_for(&self, constructor: &QualifiedName) -> Option<&[QualifiedName]> {
        let Definition::DataConstructor { data, .. } = &self.lookup_definition(constructor)?.inside
        else {
            return None;
        };
        match &self.lookup_definition(data)?.inside {
            Definition::Constant(_, Constant::Data(constructors)) => Some(constructors),
            _ => None,
        }
    }

    /// Whether `name` denotes a type rather than a runtime value. Data types, records and
    /// constants whose type ends in a universe all qualify.
    pub fn is_type_former(&self, name: &QualifiedName) -> bool {
        let Some(def) = self.lookup_definition(name) else {
            return false;
        };
        match &def.inside {
            Definition::Constant(_, Constant::Data(_) | Constant::Record { .. }) => true,
            Definition::Constant(ty, _) => {
                let mut result = ty;
                while let Term::Pi(_, _, codomain) = result {
                    result = &**codomain;
                }
                *result == Term::Universe
            }
            Definition::Module(_) | Definition::DataConstructor { .. } | Definition::Projection { .. } => {
                false
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &QualifiedName> {
        self.definitions.keys()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// A checked module ready for lowering.
#[derive(Debug, Clone)]
pub struct TopLevelModule {
    pub name: String,
    /// Visible declarations in walk order. May repeat names through re-exports.
    pub inside: Vec<QualifiedName>,
    pub signature: Signature,
}

impl TopLevelModule {
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            inside: Vec::new(),
            signature,
        }
    }

    pub fn with_visible(mut self, names: &[&str]) -> Self {
        self.inside.extend(names.iter().map(|n| QualifiedName::from(*n)));
        self
    }
}

pub trait TypeChecker {
    /// Peels nested dependent function types into their parameters and the final result type.
    fn unroll_pi(&self, ty: &Type) -> (Vec<(Name, Type)>, Type);
}

/// Structural unrolling of `Pi` nodes, for types that are already in normal form.
#[derive(Debug, Clone, Copy, Default)]
pub struct PiUnroller;

impl TypeChecker for PiUnroller {
    fn unroll_pi(&self, ty: &Type) -> (Vec<(Name, Type)>, Type) {
        let mut params = Vec::new();
        let mut current = ty;
        while let Term::Pi(name, domain, codomain) = current {
            params.push((name.clone(), (**domain).clone()));
            current = &**codomain;
        }
        (params, current.clone())
    }
}
