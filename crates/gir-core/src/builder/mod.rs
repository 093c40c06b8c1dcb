/*! Cursor-based construction of continuations.
 *
 * Emitters never touch a continuation's instruction list directly. They position an `IrBuilder`
 * on the continuation under construction and go through it, so the single-terminator rule is
 * checked in exactly one place.
 */

pub mod cursor;

pub use cursor::IrBuilder;
