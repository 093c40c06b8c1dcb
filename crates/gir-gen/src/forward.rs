use gir_core::{ContinuationId, DeclRef, GirModule};
use std::collections::HashMap;
use tracing::trace;

/// Work to run once a declaration's continuation exists.
pub type DelayedEmitter = Box<dyn FnOnce(&mut GirModule, ContinuationId) -> gir_core::Result<()>>;

/// Consumers waiting on continuations that have not been allocated yet.
///
/// Each key is a one-shot broadcast: every consumer registered before resolution fires exactly
/// once, in registration order.
#[derive(Default)]
pub struct ForwardRefs {
    pending: HashMap<DeclRef, Vec<DelayedEmitter>>,
}

impl ForwardRefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, decl: DeclRef, consumer: DelayedEmitter) {
        trace!(decl = %decl, "deferring reference until emission");
        self.pending.entry(decl).or_default().push(consumer);
    }

    /// Runs and forgets every consumer waiting on `decl`.
    pub fn resolve(
        &mut self,
        decl: &DeclRef,
        module: &mut GirModule,
        continuation: ContinuationId,
    ) -> gir_core::Result<()> {
        let Some(consumers) = self.pending.remove(decl) else {
            return Ok(());
        };
        trace!(decl = %decl, waiting = consumers.len(), "resolving forward references");
        for consumer in consumers {
            consumer(module, continuation)?;
        }
        Ok(())
    }

    pub fn pending_count(&self, decl: &DeclRef) -> usize {
        self.pending.get(decl).map_or(0, Vec::len)
    }

    /// Declarations still waited on, sorted for stable output.
    pub fn unresolved(&self) -> Vec<&DeclRef> {
        let mut decls: Vec<&DeclRef> = self.pending.keys().collect();
        decls.sort();
        decls
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl std::fmt::Debug for ForwardRefs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.pending.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gir_core::{Continuation, GirType};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_every_waiter_fires_once_in_order() {
        let mut refs = ForwardRefs::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let decl = DeclRef::function("g");

        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            refs.register(
                decl.clone(),
                Box::new(move |_: &mut GirModule, k: ContinuationId| {
                    log.borrow_mut().push((tag, k));
                    Ok(())
                }),
            );
        }
        assert_eq!(refs.pending_count(&decl), 3);

        let mut module = GirModule::new("M");
        let k = module
            .add_continuation(Continuation::new("g", GirType::Bottom))
            .unwrap();
        refs.resolve(&decl, &mut module, k).unwrap();
        refs.resolve(&decl, &mut module, k).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![("first", k), ("second", k), ("third", k)]
        );
        assert!(refs.is_empty());
    }

    #[test]
    fn test_resolving_other_decl_leaves_waiters() {
        let mut refs = ForwardRefs::new();
        refs.register(
            DeclRef::function("g"),
            Box::new(|_: &mut GirModule, _: ContinuationId| Ok(())),
        );

        let mut module = GirModule::new("M");
        let k = module
            .add_continuation(Continuation::new("h", GirType::Bottom))
            .unwrap();
        refs.resolve(&DeclRef::function("h"), &mut module, k).unwrap();

        assert_eq!(refs.unresolved(), vec![&DeclRef::function("g")]);
    }
}
