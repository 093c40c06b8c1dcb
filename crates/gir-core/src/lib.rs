/*! Core data model and builders for GIR.
 *
 * GIR is a first-order, continuation-passing-style graph IR. Functions never return: every
 * continuation ends by applying a value to another continuation, switching on a constructor, or
 * trapping. This crate holds the module and continuation types, the cursor-based builder that
 * enforces the single-terminator rule, and the structural verifier downstream passes rely on.
 */

pub mod builder;
pub mod continuation;
pub mod decl;
pub mod instructions;
pub mod ir_persist;
pub mod module;
pub mod types;
pub mod values;
pub mod verify;

pub use builder::IrBuilder;
pub use continuation::{Continuation, Parameter};
pub use decl::{DeclKind, DeclRef};
pub use instructions::{Instruction, Terminator};
pub use module::GirModule;
pub use types::{GirType, Ownership};
pub use values::{ContinuationId, Value};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IrError {
    #[error("Continuation {0} is already terminated")]
    AlreadyTerminated(String),
    #[error("Continuation not found: {0}")]
    ContinuationNotFound(ContinuationId),
    #[error("Continuation {0} already exists")]
    DuplicateContinuation(String),
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    #[error("Verification failed: {0}")]
    Verification(String),
}

pub type Result<T> = std::result::Result<T, IrError>;

#[cfg(test)]
mod tests;
