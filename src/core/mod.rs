//! Core modules for the lattice-rig builder
//!
//! - `error`: error types using thiserror
//! - `geometry`: positions, transform triples, centroid math
//! - `color`: side tokens and the control color palettes
//! - `naming`: identity strings and uniqueness against a document
//! - `document`: SceneDocument trait + MemoryDocument implementation
//! - `shapes`: primitive control-curve geometry
//! - `control`: ControlEntity identity management
//! - `builder`: HierarchyBuilder, the rig assembly algorithm
//! - `library`: control-shape export/import boundary

pub mod error;
pub mod geometry;
pub mod color;
pub mod naming;
pub mod document;
pub mod shapes;
pub mod control;
pub mod builder;
pub mod library;

// Re-export commonly used types
pub use error::{Result, RigError};
pub use geometry::{centroid, Trs, Vec3};
pub use color::{color_for, ColorTag, Side};
pub use document::{
    Channel, ConstraintKind, ConstraintRecord, LatticeHandles, MemoryDocument, SceneDocument,
};
pub use shapes::{Axis, ShapeKind};
pub use control::{ControlEntity, ControlSpec, Identity, OffsetStyle};
pub use builder::{BuildOptions, BuildReport, HierarchyBuilder, ProxyHandle, RowTier, DIVISIONS};
pub use library::{export_controls, import_controls, ImportReport, ShapeLibrary};
