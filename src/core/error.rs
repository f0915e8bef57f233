//! Error types for lattice-rig
//!
//! This module provides structured error handling using thiserror.

use thiserror::Error;
use std::path::PathBuf;

/// Result type alias for rig operations
pub type Result<T> = std::result::Result<T, RigError>;

/// Errors that can occur while building or editing a control rig
#[derive(Error, Debug)]
pub enum RigError {
    /// Nothing selected when the build was invoked
    #[error("nothing selected: select one or more pieces of geometry and retry")]
    EmptySelection,

    /// A document node was looked up by name and not found
    #[error("node not found: {name}")]
    NodeNotFound { name: String },

    /// Attempted to create a node under a name that is already taken
    #[error("name already taken: {name}")]
    NameTaken { name: String },

    /// Reparent target is neither `world` nor an existing node
    #[error("unresolvable reparent target: {target}")]
    UnresolvedParent { target: String },

    /// Attribute plug could not be resolved (`node.attr`)
    #[error("unknown plug: {plug}")]
    UnknownPlug { plug: String },

    /// Centroid of an empty point set is undefined
    #[error("cannot average an empty point set")]
    EmptyPointSet,

    /// Operation requires a node kind the target does not have
    #[error("{node} is not a {expected}")]
    WrongKind { node: String, expected: &'static str },

    /// Lattice point index outside the division grid
    #[error("lattice point ({x}, {y}, {z}) outside divisions of {cage}")]
    PointOutOfRange { cage: String, x: usize, y: usize, z: usize },

    /// Control shape library file does not exist
    #[error("control shape file {path:?} can not be found, skipped")]
    ShapeLibraryNotFound { path: PathBuf },

    /// Scene document file is missing or malformed
    #[error("invalid scene document: {message}")]
    InvalidScene { message: String },

    /// IO error during scene or library file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RigError {
    /// Create a node-not-found error
    pub fn node_not_found(name: impl Into<String>) -> Self {
        RigError::NodeNotFound { name: name.into() }
    }

    /// Create a name-taken error
    pub fn name_taken(name: impl Into<String>) -> Self {
        RigError::NameTaken { name: name.into() }
    }

    /// Create an unresolvable-reparent-target error
    pub fn unresolved_parent(target: impl Into<String>) -> Self {
        RigError::UnresolvedParent {
            target: target.into(),
        }
    }

    /// Create an invalid-scene error
    pub fn invalid_scene(message: impl Into<String>) -> Self {
        RigError::InvalidScene {
            message: message.into(),
        }
    }
}
