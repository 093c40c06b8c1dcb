use crate::errors::Result;
use crate::module_gen::GirGenModule;
use crate::pattern::{Env, Row};
use crate::syntax::{Clause, Name, Telescope, Type};
use gir_core::{Continuation, ContinuationId, GirType, IrBuilder, Ownership, Value};
use std::collections::HashSet;
use tracing::trace;

/// Lowers the clauses of one function into the continuation allocated for it.
pub struct FunctionEmitter<'g, 's> {
    pub(crate) ggm: &'g mut GirGenModule<'s>,
    pub(crate) f: ContinuationId,
    name: String,
    params: Vec<(Name, Type)>,
    return_ty: Type,
    /// Continuation that term lowering currently appends to.
    pub(crate) cursor: ContinuationId,
    next_label: u32,
}

impl<'g, 's> FunctionEmitter<'g, 's> {
    pub fn new(
        ggm: &'g mut GirGenModule<'s>,
        f: ContinuationId,
        name: String,
        ty: &'s Type,
        telescope: &'s Telescope,
    ) -> Self {
        // Definition-level parameters stay empty until generics are lowered.
        debug_assert!(telescope.is_empty());
        let (params, return_ty) = ggm.type_checker().unroll_pi(ty);
        Self {
            ggm,
            f,
            name,
            params,
            return_ty,
            cursor: f,
            next_label: 0,
        }
    }

    pub fn emit_function(mut self, clauses: &'s [Clause]) -> Result<()> {
        let (args, return_cont) = self.build_parameter_list()?;
        trace!(
            function = %self.name,
            arity = args.len(),
            result = ?self.return_ty,
            "built parameter list"
        );

        let scope: Env = self
            .params
            .iter()
            .map(|(name, _)| name.clone())
            .zip(args.iter().copied())
            .collect();
        let matrix = clauses.iter().map(Row::from_clause).collect();
        self.emit_pattern_matrix(self.f, matrix, args, return_cont, &scope)
    }

    /// One owned parameter per argument, then the return continuation.
    fn build_parameter_list(&mut self) -> Result<(Vec<Value>, Value)> {
        let names = parameter_names(self.params.iter().map(|(name, _)| name.as_str()));
        let mut b = self.builder_at(self.f)?;

        let mut args = Vec::with_capacity(names.len());
        for name in names {
            args.push(b.append_parameter(name, GirType::Value, Ownership::Owned)?);
        }
        let return_cont =
            b.append_parameter("ret", GirType::return_continuation(), Ownership::Owned)?;
        Ok((args, return_cont))
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn builder_at(&mut self, at: ContinuationId) -> Result<IrBuilder<'_>> {
        Ok(IrBuilder::at(&mut self.ggm.module, at)?)
    }

    pub(crate) fn builder(&mut self) -> Result<IrBuilder<'_>> {
        let at = self.cursor;
        self.builder_at(at)
    }

    /// Allocates a helper continuation named `<function>.<label>.<n>`, skipping counter values
    /// whose name is already a continuation or a declaration.
    pub(crate) fn fresh_continuation(&mut self, label: &str) -> Result<ContinuationId> {
        let name = loop {
            let candidate = format!("{}.{}.{}", self.name, label, self.next_label);
            self.next_label += 1;
            if !self.ggm.is_name_taken(&candidate) {
                break candidate;
            }
            trace!(name = %candidate, "helper name taken");
        };
        Ok(self
            .ggm
            .module
            .add_continuation(Continuation::new(name, GirType::Bottom))?)
    }

    /// Like `fresh_continuation`, with one owned value parameter for the incoming result.
    pub(crate) fn fresh_result_continuation(&mut self, label: &str) -> Result<(ContinuationId, Value)> {
        let k = self.fresh_continuation(label)?;
        let v = self
            .builder_at(k)?
            .append_parameter(label, GirType::Value, Ownership::Owned)?;
        Ok((k, v))
    }
}

/// Printable names for the parameters bound by `binders`.
///
/// Anonymous binders, repeated binders and `ret` fall back to a positional `arg<n>` name so every
/// parameter of a continuation is distinct.
fn parameter_names<'a>(binders: impl Iterator<Item = &'a str>) -> Vec<Name> {
    let mut taken: HashSet<Name> = HashSet::from(["ret".to_string()]);
    let mut names = Vec::new();
    for (i, binder) in binders.enumerate() {
        let mut name = if binder == "_" || taken.contains(binder) {
            format!("arg{}", i + 1)
        } else {
            binder.to_string()
        };
        while taken.contains(&name) {
            name.push('\'');
        }
        taken.insert(name.clone());
        names.push(name);
    }
    names
}
