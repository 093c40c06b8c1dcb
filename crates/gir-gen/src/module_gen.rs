use crate::errors::{invariant_violation, Feature, GenError, Result};
use crate::forward::{DelayedEmitter, ForwardRefs};
use crate::function::FunctionEmitter;
use crate::signature::{
    Constant, ContextualDefinition, Definition, Instantiability, Signature, TopLevelModule,
    TypeChecker,
};
use crate::syntax::{QualifiedName, Telescope, Type};
use gir_core::{Continuation, ContinuationId, DeclRef, GirModule, GirType};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Lowers one checked module into a `GirModule`.
///
/// Owns every table that is scoped to the translation: the module under construction, the
/// continuations allocated so far, and the consumers waiting on continuations that are not.
pub struct GirGenModule<'s> {
    pub(crate) module: GirModule,
    root: &'s TopLevelModule,
    tc: &'s dyn TypeChecker,
    emitted_functions: HashMap<DeclRef, ContinuationId>,
    delayed_functions: ForwardRefs,
    /// Every declaration name, so helper continuations never claim one.
    declared_names: HashSet<String>,
}

impl<'s> GirGenModule<'s> {
    pub fn new(root: &'s TopLevelModule, tc: &'s dyn TypeChecker) -> Self {
        Self {
            module: GirModule::new(root.name.clone()),
            root,
            tc,
            emitted_functions: HashMap::new(),
            delayed_functions: ForwardRefs::new(),
            declared_names: root.signature.names().map(ToString::to_string).collect(),
        }
    }

    /// Walks the visible declarations once, in order, and returns the finished module.
    pub fn emit_top_level_module(mut self) -> Result<GirModule> {
        let root = self.root;
        let mut visited_decls: HashSet<&QualifiedName> = HashSet::new();

        for decl_key in &root.inside {
            if !visited_decls.insert(decl_key) {
                trace!(decl = %decl_key, "already visited");
                continue;
            }

            let Some(def) = root.signature.lookup_definition(decl_key) else {
                invariant_violation!("`{}` is visible but missing from the signature", decl_key)
            };
            self.emit_contextual_definition(decl_key, def)?;
        }

        for decl in self.delayed_functions.unresolved() {
            debug!(decl = %decl, "reference left for extern linkage");
        }

        self.module.verify()?;
        debug!(
            module = %self.module.name,
            continuations = self.module.len(),
            "emitted module"
        );
        Ok(self.module)
    }

    pub fn emit_contextual_definition(
        &mut self,
        name: &QualifiedName,
        def: &'s ContextualDefinition,
    ) -> Result<()> {
        if !def.telescope.is_empty() {
            return Err(GenError::unsupported(Feature::Generics, name.to_string()));
        }

        match &def.inside {
            Definition::Module(_) => Err(GenError::unsupported(
                Feature::NestedModule,
                name.to_string(),
            )),
            Definition::Constant(ty, constant) => {
                self.emit_contextual_constant(name, constant, ty, &def.telescope)
            }
            Definition::DataConstructor { .. } => Err(GenError::unsupported(
                Feature::DataConstructor,
                name.to_string(),
            )),
            Definition::Projection { .. } => Err(GenError::unsupported(
                Feature::Projection,
                name.to_string(),
            )),
        }
    }

    fn emit_contextual_constant(
        &mut self,
        name: &QualifiedName,
        constant: &'s Constant,
        ty: &'s Type,
        tel: &'s Telescope,
    ) -> Result<()> {
        match constant {
            Constant::Function(inst) => self.emit_function(name, inst, ty, tel),
            Constant::Postulate => Err(GenError::unsupported(Feature::Postulate, name.to_string())),
            Constant::Data(_) => {
                trace!(decl = %name, "data declarations carry no code");
                Ok(())
            }
            Constant::Record { .. } => {
                Err(GenError::unsupported(Feature::Record, name.to_string()))
            }
        }
    }

    fn emit_function(
        &mut self,
        name: &QualifiedName,
        inst: &'s Instantiability,
        ty: &'s Type,
        tel: &'s Telescope,
    ) -> Result<()> {
        match inst {
            Instantiability::Open => {
                debug!(decl = %name, "skipping opaque function");
                Ok(())
            }
            Instantiability::Invertible(clauses) => {
                let constant = DeclRef::function(name.to_string());
                let f = self
                    .module
                    .add_continuation(Continuation::new(constant.name.clone(), GirType::Bottom))?;
                // Visible before the body is compiled so recursive references resolve at once.
                self.register_emitted_function(&constant, f)?;

                debug!(decl = %constant, clauses = clauses.len(), "emitting function");
                FunctionEmitter::new(self, f, constant.name.clone(), ty, tel).emit_function(clauses)
            }
        }
    }

    fn register_emitted_function(&mut self, constant: &DeclRef, f: ContinuationId) -> Result<()> {
        self.emitted_functions.insert(constant.clone(), f);
        self.delayed_functions
            .resolve(constant, &mut self.module, f)?;
        Ok(())
    }

    /// Hands `emitter` the continuation for `constant`, now if it exists or as soon as it does.
    pub fn emit_function_body(&mut self, constant: DeclRef, emitter: DelayedEmitter) -> Result<()> {
        match self.get_emitted_function(&constant) {
            Some(f) => Ok(emitter(&mut self.module, f)?),
            None => {
                self.delayed_functions.register(constant, emitter);
                Ok(())
            }
        }
    }

    pub fn get_emitted_function(&self, constant: &DeclRef) -> Option<ContinuationId> {
        self.emitted_functions.get(constant).copied()
    }

    pub fn pending_references(&self, constant: &DeclRef) -> usize {
        self.delayed_functions.pending_count(constant)
    }

    /// Whether `name` is already a continuation or belongs to a declaration.
    pub fn is_name_taken(&self, name: &str) -> bool {
        self.module.contains(name) || self.declared_names.contains(name)
    }

    pub fn signature(&self) -> &'s Signature {
        &self.root.signature
    }

    pub(crate) fn type_checker(&self) -> &'s dyn TypeChecker {
        self.tc
    }

    pub fn module(&self) -> &GirModule {
        &self.module
    }

    /// Gives up the module without the final verification pass.
    pub fn into_module(self) -> GirModule {
        self.module
    }
}
