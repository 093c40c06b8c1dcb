//! The checked core calculus handed to GIR generation by the elaborator.

pub type Name = String;

/// Types are terms.
pub type Type = Term;

/// A dotted path such as `Data.Nat.suc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    components: Vec<Name>,
}

impl QualifiedName {
    pub fn new(components: Vec<Name>) -> Self {
        debug_assert!(!components.is_empty(), "qualified names are never empty");
        Self { components }
    }

    pub fn components(&self) -> &[Name] {
        &self.components
    }

    /// The unqualified part of the name.
    pub fn base(&self) -> &str {
        self.components.last().map(String::as_str).unwrap_or("")
    }
}

impl From<&str> for QualifiedName {
    fn from(path: &str) -> Self {
        Self::new(path.split('.').map(str::to_string).collect())
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Var(Name),
    /// Reference to a top-level function.
    Def(QualifiedName),
    /// Saturated constructor application.
    Con(QualifiedName, Vec<Term>),
    App(Box<Term>, Vec<Term>),
    /// Nested eliminator. Every clause carries exactly one pattern.
    Case(Box<Term>, Vec<Clause>),
    Pi(Name, Box<Type>, Box<Type>),
    Universe,
}

impl Term {
    pub fn var(name: &str) -> Self {
        Term::Var(name.to_string())
    }

    pub fn def(name: &str) -> Self {
        Term::Def(name.into())
    }

    pub fn con(name: &str, args: Vec<Term>) -> Self {
        Term::Con(name.into(), args)
    }

    pub fn app(head: Term, args: Vec<Term>) -> Self {
        Term::App(Box::new(head), args)
    }

    pub fn case(scrutinee: Term, clauses: Vec<Clause>) -> Self {
        Term::Case(Box::new(scrutinee), clauses)
    }

    pub fn pi(name: &str, domain: Type, codomain: Type) -> Self {
        Term::Pi(name.to_string(), Box::new(domain), Box::new(codomain))
    }

    /// Non-dependent function type.
    pub fn arrow(domain: Type, codomain: Type) -> Self {
        Term::pi("_", domain, codomain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Var(Name),
    Wildcard,
    Con(QualifiedName, Vec<Pattern>),
    /// Marks an argument whose type is empty.
    Absurd,
}

impl Pattern {
    pub fn var(name: &str) -> Self {
        Pattern::Var(name.to_string())
    }

    pub fn con(name: &str, args: Vec<Pattern>) -> Self {
        Pattern::Con(name.into(), args)
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, Pattern::Con(..))
    }
}

/// One equation of a function definition. A clause without a body is absurd: upstream checking
/// proved no argument can reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub patterns: Vec<Pattern>,
    pub body: Option<Term>,
}

impl Clause {
    pub fn new(patterns: Vec<Pattern>, body: Term) -> Self {
        Self {
            patterns,
            body: Some(body),
        }
    }

    pub fn absurd(patterns: Vec<Pattern>) -> Self {
        Self {
            patterns,
            body: None,
        }
    }
}

pub type Telescope = Vec<(Name, Type)>;
