// LogHealth - core/mod.rs
//
// Core business logic layer: data model, status filtering, report export.
// Must NOT depend on: app, platform.

pub mod export;
pub mod filter;
pub mod model;
