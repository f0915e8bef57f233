//! lattice-rig - procedural lattice control hierarchies
//!
//! This library builds a multi-tier, animator-facing control hierarchy
//! over the point grid of a free-form (lattice) deformer. It is consumed
//! by the CLI binary (src/bin/lattice_rig.rs) and by pipeline code that
//! brings its own [`core::SceneDocument`] implementation.
//!
//! # Architecture
//!
//! Library-first: **lib.rs** carries only re-exports, all logic lives in
//! the `core` modules, and the binary is a thin wrapper. The builder
//! never touches ambient scene state; everything flows through the
//! `SceneDocument` handle, which keeps the whole pipeline testable
//! against the in-memory document.

pub mod core;

pub use crate::core::{
    export_controls, import_controls, BuildOptions, BuildReport, ControlEntity, ControlSpec,
    HierarchyBuilder, MemoryDocument, Result, RigError, SceneDocument, Side,
};

/// Crate version, exposed to the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
