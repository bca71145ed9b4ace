//! School fee tracker backend.
//!
//! Library crate exposing the layered backend (domain, storage, io).
//! The binary in `main.rs` wires it to an HTTP listener and schedules
//! the recurring fee reconciliation sweep.

pub mod backend;
