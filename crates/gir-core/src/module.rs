use crate::continuation::Continuation;
use crate::instructions::Instruction;
use crate::values::{ContinuationId, Value};
use crate::{IrError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The output of one translation unit: continuations keyed by name, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GirModule {
    pub name: String,
    continuations: IndexMap<String, Continuation>,
}

impl GirModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            continuations: IndexMap::new(),
        }
    }

    pub fn add_continuation(&mut self, continuation: Continuation) -> Result<ContinuationId> {
        if self.continuations.contains_key(&continuation.name) {
            return Err(IrError::DuplicateContinuation(continuation.name));
        }
        let id = ContinuationId(self.continuations.len() as u32);
        self.continuations
            .insert(continuation.name.clone(), continuation);
        Ok(id)
    }

    pub fn get(&self, id: ContinuationId) -> Option<&Continuation> {
        self.continuations.get_index(id.index()).map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, id: ContinuationId) -> Option<&mut Continuation> {
        self.continuations.get_index_mut(id.index()).map(|(_, c)| c)
    }

    pub fn continuation(&self, id: ContinuationId) -> Result<&Continuation> {
        self.get(id).ok_or(IrError::ContinuationNotFound(id))
    }

    pub fn continuation_mut(&mut self, id: ContinuationId) -> Result<&mut Continuation> {
        self.get_mut(id).ok_or(IrError::ContinuationNotFound(id))
    }

    /// Points the `function_ref` instruction at `at` to `resolved`.
    pub fn resolve_function_ref(&mut self, at: Value, resolved: ContinuationId) -> Result<()> {
        let Value::Instruction {
            continuation,
            index,
        } = at
        else {
            return Err(IrError::InvalidReference(format!(
                "{:?} is not an instruction result",
                at
            )));
        };
        let cont = self.continuation_mut(continuation)?;
        match cont.instructions.get_mut(index as usize) {
            Some(Instruction::FunctionRef { target, .. }) => {
                *target = Some(resolved);
                Ok(())
            }
            _ => Err(IrError::InvalidReference(format!(
                "instruction {} of {} is not a function_ref",
                index, cont.name
            ))),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Continuation> {
        self.continuations.get(name)
    }

    pub fn id_of(&self, name: &str) -> Option<ContinuationId> {
        self.continuations
            .get_index_of(name)
            .map(|i| ContinuationId(i as u32))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.continuations.contains_key(name)
    }

    pub fn continuations(&self) -> impl Iterator<Item = (ContinuationId, &Continuation)> {
        self.continuations
            .values()
            .enumerate()
            .map(|(i, c)| (ContinuationId(i as u32), c))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.continuations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.continuations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.continuations.is_empty()
    }
}
