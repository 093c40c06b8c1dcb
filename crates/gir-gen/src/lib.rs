/*! Lower checked core-calculus definitions into GIR.
 *
 * The elaborator hands over a closed signature of definitions whose clause lists have already been
 * checked for coverage. This crate walks the visible declarations, flattens each function's
 * dependent type into explicit parameters plus a return continuation, and compiles its clauses into
 * a decision tree of continuations. Nothing here re-validates the input: a malformed signature is
 * a bug upstream and aborts, while definition kinds that are simply not lowered yet come back as
 * `GenError::Unsupported`.
 */

pub mod errors;
pub mod forward;
pub mod function;
pub mod module_gen;
mod pattern;
mod rvalue;
pub mod signature;
pub mod syntax;

pub use errors::{Feature, GenError, Result};
pub use forward::{DelayedEmitter, ForwardRefs};
pub use function::FunctionEmitter;
pub use module_gen::GirGenModule;
pub use signature::{
    Constant, ContextualDefinition, Definition, Instantiability, PiUnroller, Signature,
    TopLevelModule, TypeChecker,
};
pub use syntax::{Clause, Name, Pattern, QualifiedName, Telescope, Term, Type};

/// Lowers every visible definition of `root`.
pub fn emit_module(root: &TopLevelModule, tc: &dyn TypeChecker) -> Result<gir_core::GirModule> {
    GirGenModule::new(root, tc).emit_top_level_module()
}
