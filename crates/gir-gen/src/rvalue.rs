use crate::errors::{invariant_violation, Result};
use crate::function::FunctionEmitter;
use crate::pattern::{Env, Row};
use crate::syntax::Term;
use gir_core::{ContinuationId, DeclRef, GirModule, Value};
use tracing::trace;

impl<'g, 's> FunctionEmitter<'g, 's> {
    /// Lowers a checked term to a value available in the continuation at `self.cursor`.
    ///
    /// Applications and nested cases end the continuation they start in; the cursor is left on
    /// the continuation that receives their result, which is always open.
    pub(crate) fn emit_rvalue(&mut self, term: &'s Term, env: &Env) -> Result<Value> {
        match term {
            Term::Var(name) => match env.iter().rev().find(|(bound, _)| bound == name) {
                Some((_, value)) => Ok(*value),
                None => invariant_violation!("`{}` is not bound in `{}`", name, self.name()),
            },

            Term::Def(name) if self.ggm.signature().is_type_former(name) => {
                trace!(decl = %name, "type former erased");
                Ok(Value::Erased)
            }

            Term::Def(name) => {
                let decl = DeclRef::function(name.to_string());
                let reference = self.builder()?.create_function_ref(decl.clone(), None)?;
                self.ggm.emit_function_body(
                    decl,
                    Box::new(move |module: &mut GirModule, f: ContinuationId| {
                        module.resolve_function_ref(reference, f)
                    }),
                )?;
                Ok(reference)
            }

            Term::Con(constructor, args) => {
                let args = self.emit_rvalues(args, env)?;
                Ok(self
                    .builder()?
                    .create_data_init(constructor.to_string(), args)?)
            }

            Term::App(head, args) => {
                let callee = self.emit_rvalue(head, env)?;
                let mut args = self.emit_rvalues(args, env)?;
                let (k, result) = self.fresh_result_continuation("ret")?;
                args.push(Value::Continuation(k));
                self.builder()?.create_apply(callee, args)?;
                self.cursor = k;
                Ok(result)
            }

            Term::Case(scrutinee, clauses) => {
                let scrutinee = self.emit_rvalue(scrutinee, env)?;
                let (join, result) = self.fresh_result_continuation("join")?;
                let matrix = clauses.iter().map(Row::from_clause).collect();
                self.emit_pattern_matrix(
                    self.cursor,
                    matrix,
                    vec![scrutinee],
                    Value::Continuation(join),
                    env,
                )?;
                self.cursor = join;
                Ok(result)
            }

            Term::Pi(..) | Term::Universe => Ok(Value::Erased),
        }
    }

    fn emit_rvalues(&mut self, terms: &'s [Term], env: &Env) -> Result<Vec<Value>> {
        terms.iter().map(|t| self.emit_rvalue(t, env)).collect()
    }
}
