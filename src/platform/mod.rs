// LogHealth - platform/mod.rs
//
// Platform and I/O layer: settings file, sources document, filesystem access.
// Dependencies: core model types, util.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
pub mod sources;
