use serde::{Deserialize, Serialize};

/// Type placeholder carried by parameters and continuations.
///
/// Source-level types are erased before GIR; what remains is only enough to tell a runtime value
/// from a continuation expecting values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GirType {
    /// The type of a continuation itself: control never comes back.
    Bottom,
    Value,
    Continuation(Vec<GirType>),
}

impl GirType {
    /// A continuation that receives a single runtime value, the shape of every return continuation.
    pub fn return_continuation() -> Self {
        GirType::Continuation(vec![GirType::Value])
    }

    pub fn is_continuation(&self) -> bool {
        matches!(self, GirType::Continuation(_))
    }
}

impl std::fmt::Display for GirType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GirType::Bottom => write!(f, "⊥"),
            GirType::Value => write!(f, "value"),
            GirType::Continuation(args) => {
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ") -> ⊥")
            }
        }
    }
}

/// Calling convention for a formal parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ownership {
    /// The callee takes exclusive ownership of the argument.
    #[default]
    Owned,
}

impl std::fmt::Display for Ownership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ownership::Owned => write!(f, "owned"),
        }
    }
}
