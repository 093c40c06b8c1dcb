/*! Unified interface for GIR generation.
 *
 * One import for the whole pipeline, from checked definitions to printed IR.
 */

use anyhow::Context;

pub use gir_core as core;
pub use gir_emit as emit;
pub use gir_gen as lower;

pub use gir_core::{
    Continuation, ContinuationId, DeclKind, DeclRef, GirModule, GirType, Instruction, IrBuilder,
    Ownership, Terminator, Value,
};

pub use gir_emit::{EmitterConfig, Emitter, GirEmitter};

pub use gir_gen::{PiUnroller, Signature, TopLevelModule, TypeChecker};

/// Lowers every visible definition of `root` into a verified module.
pub fn generate(root: &TopLevelModule, tc: &dyn TypeChecker) -> anyhow::Result<GirModule> {
    gir_gen::emit_module(root, tc)
        .with_context(|| format!("failed to generate GIR for module `{}`", root.name))
}

/// `generate`, then render the result without colors.
pub fn generate_text(root: &TopLevelModule, tc: &dyn TypeChecker) -> anyhow::Result<String> {
    let module = generate(root, tc)?;
    GirEmitter::new(EmitterConfig::plain()).emit_to_string(&module)
}
