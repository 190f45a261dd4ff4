// LogHealth - app/mod.rs
//
// Application layer: per-source checks and the concurrent analysis engine.
// Dependencies: core, platform.

pub mod check;
pub mod engine;
pub mod summary;
