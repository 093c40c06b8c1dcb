use crate::instructions::{Instruction, Terminator};
use crate::types::{GirType, Ownership};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: GirType,
    pub ownership: Ownership,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: GirType, ownership: Ownership) -> Self {
        Self {
            name: name.into(),
            ty,
            ownership,
        }
    }
}

/// A named IR function.
///
/// A continuation is open until its terminator is set. Once terminated it is immutable; the
/// builder refuses further appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    pub name: String,
    pub ty: GirType,
    pub params: Vec<Parameter>,
    pub instructions: Vec<Instruction>,
    pub terminator: Option<Terminator>,
}

impl Continuation {
    pub fn new(name: impl Into<String>, ty: GirType) -> Self {
        Self {
            name: name.into(),
            ty,
            params: Vec::new(),
            instructions: Vec::new(),
            terminator: None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminator.is_some()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }
}
