/*! Render GIR as text.
 *
 * Continuations print one block each, in module order, with instruction results numbered per
 * block. The output is meant for reading and for golden tests; nothing parses it back.
 */

pub mod config;
pub mod emitter;
pub mod gir_emitter;

pub use config::{EmitterConfig, IndentStyle};
pub use emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
pub use gir_emitter::GirEmitter;
