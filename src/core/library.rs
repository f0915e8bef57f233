//! Control shape library
//!
//! Exports the shape geometry and color of every control in a document
//! to a standalone JSON library, and restores them onto a live document
//! later. Only shapes and colors travel: the import never creates
//! controls, it redresses existing ones with matching base names and
//! skips the rest.

use crate::core::color::ColorTag;
use crate::core::document::{MemoryDocument, SceneDocument};
use crate::core::error::{Result, RigError};
use crate::core::geometry::Vec3;
use crate::core::naming::CONTROL_SUFFIX;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LIBRARY_VERSION: &str = "1.0.0";

/// Serialized shape set of one control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlShapes {
    /// Base name of the control transform
    pub name: String,
    /// Transform-level display color, if any was resolved
    pub color: Option<ColorTag>,
    /// Point set of each shape node, in child order
    pub shapes: Vec<Vec<Vec3>>,
}

/// A versioned library of control shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeLibrary {
    pub version: String,
    pub controls: Vec<ControlShapes>,
}

impl ShapeLibrary {
    /// Collect every `*_Ctrl` transform's shapes and color
    pub fn from_document(doc: &MemoryDocument) -> Self {
        let suffix = format!("_{CONTROL_SUFFIX}");
        let mut controls = Vec::new();
        for name in doc.transforms_with_suffix(&suffix) {
            let shapes: Vec<Vec<Vec3>> = doc
                .shapes_of(&name)
                .iter()
                .filter_map(|s| doc.curve_points(s).ok())
                .collect();
            if shapes.is_empty() {
                continue;
            }
            // color can live on the transform or on a shape in older
            // documents; take the first one found
            let color = doc.color_of(&name).or_else(|| {
                doc.shapes_of(&name)
                    .iter()
                    .find_map(|s| doc.color_of(s))
            });
            controls.push(ControlShapes {
                name,
                color,
                shapes,
            });
        }
        Self {
            version: LIBRARY_VERSION.to_string(),
            controls,
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RigError::ShapeLibraryNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// What an import touched and what it skipped
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub restored: Vec<String>,
    /// Controls present in the library but absent from the document
    pub skipped: Vec<String>,
}

/// Export all controls in the document to a library file
///
/// Returns the number of controls exported.
pub fn export_controls(doc: &MemoryDocument, path: &Path) -> Result<usize> {
    let library = ShapeLibrary::from_document(doc);
    library.save_to_file(path)?;
    info!("exported {} controls to {}", library.controls.len(), path.display());
    Ok(library.controls.len())
}

/// Restore shape geometry and color from a library file onto the
/// document's same-named controls
///
/// A missing library file aborts before any mutation. Controls the
/// document does not contain are skipped with a warning.
pub fn import_controls(doc: &mut MemoryDocument, path: &Path) -> Result<ImportReport> {
    let library = ShapeLibrary::load_from_file(path)?;
    let mut report = ImportReport::default();

    for entry in &library.controls {
        if !doc.exists(&entry.name) {
            warn!("control \"{}\" does not exist, skipped", entry.name);
            report.skipped.push(entry.name.clone());
            continue;
        }

        let live_shapes = doc.shapes_of(&entry.name);
        for (i, points) in entry.shapes.iter().enumerate() {
            match live_shapes.get(i) {
                Some(shape) => doc.set_curve_points(shape, points)?,
                None => {
                    doc.create_curve(&entry.name, points)?;
                }
            }
        }

        // color lives on the transform (override enabled there); shape
        // level overrides are cleared so the transform wins
        if let Some(color) = entry.color {
            doc.set_color(&entry.name, color)?;
        }
        for shape in doc.shapes_of(&entry.name) {
            doc.clear_color(&shape)?;
        }
        report.restored.push(entry.name.clone());
    }

    info!("imported {} controls from {}", report.restored.len(), path.display());
    Ok(report)
}
