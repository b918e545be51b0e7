//! Engine modules: pure planning logic with no I/O.
//!
//! The engine layer sits between what the operator selects on the form and
//! what the kickstart emitter writes.

pub mod partition;
