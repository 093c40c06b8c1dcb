/*! Unit coverage for the GIR data model.
 *
 * The builder is the only gate between emitters and continuations, so most of these tests poke at
 * its refusal paths: appends after a terminator, cursors pointing nowhere, duplicate names.
 */
