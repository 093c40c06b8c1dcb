mod common;

use common::*;
use gir_core::{ContinuationId, DeclRef, GirModule};
use gir_gen::{
    Clause, ContextualDefinition, Feature, GirGenModule, Pattern, PiUnroller, QualifiedName,
    Term, TopLevelModule,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<(&'static str, ContinuationId)>>>;

fn recorder(log: &Log, tag: &'static str) -> gir_gen::DelayedEmitter {
    let log = Rc::clone(log);
    Box::new(move |_: &mut GirModule, k: ContinuationId| {
        log.borrow_mut().push((tag, k));
        Ok(())
    })
}

fn root() -> TopLevelModule {
    let mut sig = prelude();
    sig.insert(
        "g",
        function(
            Term::pi("n", nat(), nat()),
            vec![Clause::new(vec![Pattern::var("n")], Term::var("n"))],
        ),
    );
    module_with(sig, &["g"])
}

#[test]
fn test_waiters_fire_once_in_registration_order() {
    let root = root();
    let mut ggm = GirGenModule::new(&root, &PiUnroller);
    let g = DeclRef::function("g");
    let log: Log = Rc::default();

    ggm.emit_function_body(g.clone(), recorder(&log, "first")).unwrap();
    ggm.emit_function_body(g.clone(), recorder(&log, "second")).unwrap();
    assert!(log.borrow().is_empty());
    assert_eq!(ggm.pending_references(&g), 2);

    let name = QualifiedName::from("g");
    let def = root.signature.lookup_definition(&name).unwrap();
    ggm.emit_contextual_definition(&name, def).unwrap();

    let k = ggm.get_emitted_function(&g).unwrap();
    assert_eq!(*log.borrow(), vec![("first", k), ("second", k)]);
    assert_eq!(ggm.pending_references(&g), 0);

    // Late consumers run on the spot.
    ggm.emit_function_body(g.clone(), recorder(&log, "late")).unwrap();
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(log.borrow()[2], ("late", k));
}

#[test]
fn test_unrelated_emission_leaves_waiters_alone() {
    let root = root();
    let mut ggm = GirGenModule::new(&root, &PiUnroller);
    let log: Log = Rc::default();

    ggm.emit_function_body(DeclRef::function("h"), recorder(&log, "h"))
        .unwrap();
    let name = QualifiedName::from("g");
    let def = root.signature.lookup_definition(&name).unwrap();
    ggm.emit_contextual_definition(&name, def).unwrap();

    assert!(log.borrow().is_empty());
    assert_eq!(ggm.pending_references(&DeclRef::function("h")), 1);
    assert_eq!(ggm.into_module().len(), 1);
}

#[test]
fn test_registry_holds_function_before_its_body_is_lowered() {
    let root = root();
    let mut ggm = GirGenModule::new(&root, &PiUnroller);
    let name = QualifiedName::from("g");
    let def = root.signature.lookup_definition(&name).unwrap();
    ggm.emit_contextual_definition(&name, def).unwrap();

    let k = ggm.get_emitted_function(&DeclRef::function("g")).unwrap();
    assert_eq!(ggm.module().get(k).unwrap().name, "g");
    assert!(ggm.get_emitted_function(&DeclRef::function("missing")).is_none());
}

#[test]
fn test_generic_definition_is_unsupported() {
    let mut sig = prelude();
    sig.insert(
        "idA",
        function(
            Term::pi("x", Term::var("A"), Term::var("A")),
            vec![Clause::new(vec![Pattern::var("x")], Term::var("x"))],
        )
        .with_telescope(vec![("A".to_string(), Term::Universe)]),
    );
    let root = module_with(sig, &["idA"]);
    let err = gir_gen::emit_module(&root, &PiUnroller).unwrap_err();

    assert!(err.is_unsupported());
    assert_eq!(err.feature(), Some(Feature::Generics));
    assert!(err.to_string().contains("idA"));
}

#[test]
fn test_unsupported_definition_kinds() {
    use gir_gen::{Constant, Definition};

    let cases = vec![
        (
            ContextualDefinition::new(Definition::Constant(nat(), Constant::Postulate)),
            Feature::Postulate,
        ),
        (
            ContextualDefinition::new(Definition::Constant(
                Term::Universe,
                Constant::Record {
                    constructor: "Pair.mk".into(),
                    projections: vec!["Pair.fst".into(), "Pair.snd".into()],
                },
            )),
            Feature::Record,
        ),
        (
            ContextualDefinition::new(Definition::Module(vec!["Inner.x".into()])),
            Feature::NestedModule,
        ),
        (
            ContextualDefinition::data_constructor("Nat", 0, nat()),
            Feature::DataConstructor,
        ),
        (
            ContextualDefinition::new(Definition::Projection {
                record: "Pair".into(),
                field_index: 0,
                ty: nat(),
            }),
            Feature::Projection,
        ),
    ];

    for (def, feature) in cases {
        let mut sig = prelude();
        sig.insert("thing", def);
        let root = module_with(sig, &["thing"]);
        let err = gir_gen::emit_module(&root, &PiUnroller).unwrap_err();
        assert_eq!(err.feature(), Some(feature));
    }
}

#[test]
fn test_unsupported_definition_stops_the_walk() {
    let mut sig = prelude();
    sig.insert(
        "post",
        ContextualDefinition::new(gir_gen::Definition::Constant(
            nat(),
            gir_gen::Constant::Postulate,
        )),
    );
    let root = module_with(sig, &["post", "Nat.zero"]);
    let err = gir_gen::emit_module(&root, &PiUnroller).unwrap_err();
    assert_eq!(err.feature(), Some(Feature::Postulate));
}

#[test]
#[should_panic(expected = "internal invariant violated")]
fn test_visible_name_missing_from_signature_aborts() {
    let root = module_with(prelude(), &["nowhere"]);
    let _ = gir_gen::emit_module(&root, &PiUnroller);
}

#[test]
#[should_panic(expected = "internal invariant violated")]
fn test_unbound_variable_aborts() {
    let mut sig = prelude();
    sig.insert(
        "bad",
        function(
            Term::pi("n", nat(), nat()),
            vec![Clause::new(vec![Pattern::var("n")], Term::var("m"))],
        ),
    );
    let root = module_with(sig, &["bad"]);
    let _ = gir_gen::emit_module(&root, &PiUnroller);
}
