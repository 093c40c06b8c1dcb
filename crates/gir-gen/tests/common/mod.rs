#![allow(dead_code)]

use gir_gen::{Clause, ContextualDefinition, Pattern, Signature, Term, TopLevelModule, Type};

pub fn nat() -> Type {
    Term::def("Nat")
}

pub fn bool_ty() -> Type {
    Term::def("Bool")
}

pub fn arrow(from: Type, to: Type) -> Type {
    Term::arrow(from, to)
}

pub fn t() -> Term {
    Term::con("Bool.true", vec![])
}

pub fn f() -> Term {
    Term::con("Bool.false", vec![])
}

pub fn zero() -> Pattern {
    Pattern::con("Nat.zero", vec![])
}

pub fn suc(p: Pattern) -> Pattern {
    Pattern::con("Nat.suc", vec![p])
}

/// `Bool`, `Nat` and `Empty` with their constructors.
pub fn prelude() -> Signature {
    let mut sig = Signature::new();
    sig.insert(
        "Bool",
        ContextualDefinition::data(Term::Universe, &["Bool.true", "Bool.false"]),
    )
    .insert(
        "Bool.true",
        ContextualDefinition::data_constructor("Bool", 0, bool_ty()),
    )
    .insert(
        "Bool.false",
        ContextualDefinition::data_constructor("Bool", 0, bool_ty()),
    )
    .insert(
        "Nat",
        ContextualDefinition::data(Term::Universe, &["Nat.zero", "Nat.suc"]),
    )
    .insert(
        "Nat.zero",
        ContextualDefinition::data_constructor("Nat", 0, nat()),
    )
    .insert(
        "Nat.suc",
        ContextualDefinition::data_constructor("Nat", 1, arrow(nat(), nat())),
    )
    .insert("Empty", ContextualDefinition::data(Term::Universe, &[]));
    sig
}

pub fn module_with(sig: Signature, visible: &[&str]) -> TopLevelModule {
    TopLevelModule::new("Test", sig).with_visible(visible)
}

pub fn function(ty: Type, clauses: Vec<Clause>) -> ContextualDefinition {
    ContextualDefinition::function(ty, clauses)
}
