use gir::lower::{Clause, ContextualDefinition, Definition, Constant, Pattern, Term};
use gir::{generate, generate_text, PiUnroller, Signature, TopLevelModule};
use gir::core::ir_persist::{load_module, save_module};
use pretty_assertions::assert_eq;

fn identity_module() -> TopLevelModule {
    let mut sig = Signature::new();
    sig.insert(
        "id",
        ContextualDefinition::function(
            Term::pi("x", Term::def("A"), Term::def("A")),
            vec![Clause::new(vec![Pattern::var("x")], Term::var("x"))],
        ),
    );
    TopLevelModule::new("Identity", sig).with_visible(&["id"])
}

#[test]
fn test_generate_text() {
    let text = generate_text(&identity_module(), &PiUnroller).unwrap();
    assert_eq!(
        text,
        "module Identity\n\n@id(%x : value, %ret : (value) -> ⊥) {\n    apply %ret(%x)\n}\n"
    );
}

#[test]
fn test_generated_module_survives_persistence() {
    let module = generate(&identity_module(), &PiUnroller).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("identity.json");

    save_module(&module, &path).unwrap();
    let loaded = load_module(&path).unwrap();

    assert_eq!(loaded, module);
}

#[test]
fn test_unsupported_definition_is_reported_with_module() {
    let mut sig = Signature::new();
    sig.insert(
        "axiom",
        ContextualDefinition::new(Definition::Constant(Term::def("A"), Constant::Postulate)),
    );
    let root = TopLevelModule::new("Axioms", sig).with_visible(&["axiom"]);

    let err = generate(&root, &PiUnroller).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Axioms"));
    assert!(message.contains("axiom"));
    assert!(err
        .downcast_ref::<gir::lower::GenError>()
        .is_some_and(|e| e.is_unsupported()));
}
