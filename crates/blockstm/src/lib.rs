#![forbid(unsafe_code)]

//! `blockstm` turns state machines built in a block editor into PlantUML state diagram text.
//!
//! The transpiler lives in `blockstm-core` and is re-exported here unchanged. This crate adds
//! [`tasks`], which gathers the per-task JSON documents an editor deployment serves.

pub use blockstm_core::*;

pub mod tasks;
