use serde::{Deserialize, Serialize};

/// Position of a continuation inside its module. Modules are append-only, so ids never move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContinuationId(pub u32);

impl ContinuationId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ContinuationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "k{}", self.0)
    }
}

/// Handle to a previously produced IR result.
///
/// Each use of a value transfers ownership to the consumer; there is no implicit sharing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Parameter {
        continuation: ContinuationId,
        index: u32,
    },
    Instruction {
        continuation: ContinuationId,
        index: u32,
    },
    /// A continuation passed around as a first-class value.
    Continuation(ContinuationId),
    /// Runtime stand-in for types and other irrelevant terms.
    Erased,
}

impl Value {
    pub fn as_continuation(&self) -> Option<ContinuationId> {
        match self {
            Value::Continuation(id) => Some(*id),
            _ => None,
        }
    }

    /// The continuation this value was defined in, if it was defined in one.
    pub fn defining_continuation(&self) -> Option<ContinuationId> {
        match self {
            Value::Parameter { continuation, .. } | Value::Instruction { continuation, .. } => {
                Some(*continuation)
            }
            Value::Continuation(_) | Value::Erased => None,
        }
    }
}
