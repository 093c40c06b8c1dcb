use crate::config::EmitterConfig;
use crate::emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
use colored::Color;
use gir_core::{Continuation, ContinuationId, GirModule, Instruction, Terminator, Value};
use std::io::Write;

/// Prints a module as `@name(params) { ... }` blocks.
///
/// Values local to the block print as `%param` or `%n`. Values owned by another continuation are
/// qualified with its name, as in `@not.%ret`.
pub struct GirEmitter {
    config: EmitterConfig,
}

/// Naming scope for the block being printed.
struct Scope<'m> {
    module: &'m GirModule,
    current: ContinuationId,
}

impl Scope<'_> {
    fn continuation_name(&self, id: ContinuationId) -> String {
        self.module
            .get(id)
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    fn qualify(&self, owner: ContinuationId, local: String) -> String {
        if owner == self.current {
            local
        } else {
            format!("@{}.{}", self.continuation_name(owner), local)
        }
    }

    fn value(&self, value: Value) -> String {
        match value {
            Value::Parameter {
                continuation,
                index,
            } => {
                let name = self
                    .module
                    .get(continuation)
                    .and_then(|c| c.params.get(index as usize))
                    .map_or_else(|| format!("p{}", index), |p| p.name.clone());
                self.qualify(continuation, format!("%{}", name))
            }
            Value::Instruction {
                continuation,
                index,
            } => self.qualify(continuation, format!("%{}", index)),
            Value::Continuation(id) => format!("@{}", self.continuation_name(id)),
            Value::Erased => "erased".to_string(),
        }
    }

    fn values(&self, values: &[Value]) -> String {
        values
            .iter()
            .map(|v| self.value(*v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl GirEmitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    fn emit_continuation<W: Write>(
        &self,
        scope: &Scope<'_>,
        cont: &Continuation,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        let params: Vec<String> = cont
            .params
            .iter()
            .map(|p| {
                if self.config.include_types {
                    format!("%{} : {}", p.name, p.ty)
                } else {
                    format!("%{}", p.name)
                }
            })
            .collect();
        let header = format!(
            "{}({})",
            EmitHelper::paint(context, &format!("@{}", cont.name), Color::Blue),
            params.join(", ")
        );

        EmitHelper::write_block(writer, context, &header, |w, ctx| {
            for (index, inst) in cont.instructions.iter().enumerate() {
                let line = format!("%{} = {}", index, self.format_instruction(scope, inst, ctx));
                EmitHelper::write_line(w, ctx, &line)?;
            }
            let last = match &cont.terminator {
                Some(terminator) => self.format_terminator(scope, terminator, ctx),
                None => EmitHelper::paint(ctx, "<open>", Color::Red),
            };
            EmitHelper::write_line(w, ctx, &last)
        })
    }

    fn format_instruction(&self, scope: &Scope<'_>, inst: &Instruction, ctx: &EmitContext) -> String {
        match inst {
            Instruction::DataInit { constructor, args } => format!(
                "{} {}({})",
                EmitHelper::paint(ctx, "data_init", Color::Magenta),
                constructor,
                scope.values(args)
            ),
            Instruction::FunctionRef { decl, target } => {
                let op = EmitHelper::paint(ctx, "function_ref", Color::Magenta);
                match target {
                    Some(_) => format!("{} @{}", op, decl),
                    None => format!("{} @{} extern", op, decl),
                }
            }
        }
    }

    fn format_terminator(&self, scope: &Scope<'_>, terminator: &Terminator, ctx: &EmitContext) -> String {
        match terminator {
            Terminator::Apply { callee, args } => format!(
                "{} {}({})",
                EmitHelper::paint(ctx, "apply", Color::Magenta),
                scope.value(*callee),
                scope.values(args)
            ),
            Terminator::SwitchConstr {
                scrutinee,
                cases,
                default,
            } => {
                let arms: Vec<String> = cases
                    .iter()
                    .map(|(constructor, k)| format!("{}: @{}", constructor, scope.continuation_name(*k)))
                    .collect();
                let mut text = format!(
                    "{} {} [{}]",
                    EmitHelper::paint(ctx, "switch_constr", Color::Magenta),
                    scope.value(*scrutinee),
                    arms.join(", ")
                );
                if let Some(k) = default {
                    text.push_str(&format!(" default @{}", scope.continuation_name(*k)));
                }
                text
            }
            Terminator::Unreachable => EmitHelper::paint(ctx, "unreachable", Color::Red),
        }
    }
}

impl Default for GirEmitter {
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}

impl Emitter for GirEmitter {
    type Item = GirModule;

    fn emit<W: Write>(
        &self,
        module: &GirModule,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        let keyword = EmitHelper::paint(context, "module", Color::Magenta);
        EmitHelper::write_line(writer, context, &format!("{} {}", keyword, module.name))?;

        for (id, cont) in module.continuations() {
            writeln!(writer)?;
            let scope = Scope {
                module,
                current: id,
            };
            self.emit_continuation(&scope, cont, writer, context)?;
        }
        Ok(())
    }

    fn context(&self) -> EmitContext {
        EmitContext::from_config(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gir_core::{DeclRef, GirType, IrBuilder, Ownership};
    use pretty_assertions::assert_eq;

    fn plain() -> GirEmitter {
        GirEmitter::new(EmitterConfig::plain())
    }

    #[test]
    fn test_empty_module() {
        let module = GirModule::new("Empty");
        assert_eq!(plain().emit_to_string(&module).unwrap(), "module Empty\n");
    }

    #[test]
    fn test_open_continuation_is_marked() {
        let mut module = GirModule::new("M");
        module
            .add_continuation(Continuation::new("k", GirType::Bottom))
            .unwrap();

        let text = plain().emit_to_string(&module).unwrap();
        assert_eq!(text, "module M\n\n@k() {\n    <open>\n}\n");
    }

    #[test]
    fn test_unresolved_reference_prints_extern() {
        let mut module = GirModule::new("M");
        let k = module
            .add_continuation(Continuation::new("call", GirType::Bottom))
            .unwrap();
        let mut b = IrBuilder::at(&mut module, k).unwrap();
        let ret = b
            .append_parameter("ret", GirType::return_continuation(), Ownership::Owned)
            .unwrap();
        let f = b.create_function_ref(DeclRef::function("ext"), None).unwrap();
        b.create_apply(f, vec![Value::Erased, ret]).unwrap();

        let emitter = GirEmitter::new(EmitterConfig::plain().with_types(false));
        let text = emitter.emit_to_string(&module).unwrap();
        assert_eq!(
            text,
            "module M\n\n@call(%ret) {\n    %0 = function_ref @ext extern\n    apply %0(erased, %ret)\n}\n"
        );
    }
}
