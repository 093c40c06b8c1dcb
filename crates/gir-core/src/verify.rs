use crate::{
    continuation::Continuation,
    instructions::Instruction,
    module::GirModule,
    values::{ContinuationId, Value},
    IrError, Result,
};

impl GirModule {
    /// Checks the structural invariants downstream passes rely on.
    ///
    /// Every continuation must be terminated, and every value or continuation id it mentions must
    /// exist in this module.
    pub fn verify(&self) -> Result<()> {
        let mut problems = Vec::new();

        for (_, cont) in self.continuations() {
            verify_continuation(self, cont, &mut problems);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(IrError::Verification(problems.join("; ")))
        }
    }
}

fn verify_continuation(module: &GirModule, cont: &Continuation, problems: &mut Vec<String>) {
    let Some(terminator) = &cont.terminator else {
        problems.push(format!("{} has no terminator", cont.name));
        return;
    };

    for (index, inst) in cont.instructions.iter().enumerate() {
        for value in inst.operands() {
            check_value(module, &cont.name, value, problems);
        }
        if let Instruction::FunctionRef {
            decl,
            target: Some(target),
        } = inst
        {
            if module.get(*target).is_none() {
                problems.push(format!(
                    "{}: instruction {} references @{} through missing {}",
                    cont.name, index, decl, target
                ));
            }
        }
    }

    for value in terminator.operands() {
        check_value(module, &cont.name, value, problems);
    }
    for succ in terminator.successors() {
        check_id(module, &cont.name, succ, problems);
    }
}

fn check_value(module: &GirModule, owner: &str, value: Value, problems: &mut Vec<String>) {
    match value {
        Value::Parameter {
            continuation,
            index,
        } => match module.get(continuation) {
            Some(def) if (index as usize) < def.params.len() => {}
            Some(def) => problems.push(format!(
                "{}: parameter {} out of range for {}",
                owner, index, def.name
            )),
            None => check_id(module, owner, continuation, problems),
        },
        Value::Instruction {
            continuation,
            index,
        } => match module.get(continuation) {
            Some(def) if (index as usize) < def.instructions.len() => {}
            Some(def) => problems.push(format!(
                "{}: instruction {} out of range for {}",
                owner, index, def.name
            )),
            None => check_id(module, owner, continuation, problems),
        },
        Value::Continuation(id) => check_id(module, owner, id, problems),
        Value::Erased => {}
    }
}

fn check_id(module: &GirModule, owner: &str, id: ContinuationId, problems: &mut Vec<String>) {
    if module.get(id).is_none() {
        problems.push(format!("{}: unknown continuation {}", owner, id));
    }
}
