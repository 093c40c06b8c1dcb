use crate::decl::DeclRef;
use crate::values::{ContinuationId, Value};
use serde::{Deserialize, Serialize};

/// A non-terminating instruction. Each one produces exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    DataInit {
        constructor: String,
        args: Vec<Value>,
    },
    /// Reference to a top-level function. `target` stays `None` until the referenced function's
    /// continuation has been allocated; references that are never resolved go through extern
    /// linkage.
    FunctionRef {
        decl: DeclRef,
        target: Option<ContinuationId>,
    },
}

impl Instruction {
    pub fn operands(&self) -> Vec<Value> {
        match self {
            Instruction::DataInit { args, .. } => args.clone(),
            Instruction::FunctionRef { .. } => Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        match self {
            Instruction::FunctionRef { target, .. } => target.is_some(),
            Instruction::DataInit { .. } => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminator {
    Apply {
        callee: Value,
        args: Vec<Value>,
    },

    /// Each case continuation receives the matched constructor's fields as its parameters.
    SwitchConstr {
        scrutinee: Value,
        cases: Vec<(String, ContinuationId)>,
        default: Option<ContinuationId>,
    },

    /// Trap. Only emitted where upstream checking proved control cannot arrive.
    Unreachable,
}

impl Terminator {
    pub fn successors(&self) -> Vec<ContinuationId> {
        match self {
            Terminator::Apply { callee, args } => std::iter::once(callee)
                .chain(args.iter())
                .filter_map(Value::as_continuation)
                .collect(),
            Terminator::SwitchConstr { cases, default, .. } => {
                let mut succs: Vec<ContinuationId> = cases.iter().map(|(_, k)| *k).collect();
                succs.extend(default.iter().copied());
                succs
            }
            Terminator::Unreachable => vec![],
        }
    }

    pub fn operands(&self) -> Vec<Value> {
        match self {
            Terminator::Apply { callee, args } => {
                let mut ops = vec![*callee];
                ops.extend(args.iter().copied());
                ops
            }
            Terminator::SwitchConstr { scrutinee, .. } => vec![*scrutinee],
            Terminator::Unreachable => vec![],
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Terminator::Unreachable)
    }
}
