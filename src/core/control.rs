//! Animator-facing control entities
//!
//! A [`ControlEntity`] owns one transform with curve shapes, usually
//! wrapped in an offset group that isolates its channels from incoming
//! constraints. The entity keeps four identity fields mutually consistent
//! through renames and reparents:
//!
//! ```text
//! full_path == parent_path | offset_name (or name)  [| name]
//! ```
//!
//! Renames rebuild the path fields from their parts; the document's
//! unique-name guarantee keeps each segment unambiguous.

use crate::core::color::{color_for, ColorTag, Side};
use crate::core::document::{Channel, SceneDocument};
use crate::core::error::{Result, RigError};
use crate::core::geometry::{Trs, Vec3};
use crate::core::naming;
use crate::core::shapes::{self, Axis, ShapeKind};
use log::warn;
use serde::{Deserialize, Serialize};

/// How the offset wrapper is named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetStyle {
    /// `{name}_Offset_Grp`
    #[default]
    Suffix,
    /// Replace the `_Ctrl` tail with `_Ofs`
    Replace,
}

/// Creation parameters for a control
///
/// Plain fields with defaults; callers use struct-update syntax for the
/// handful they care about.
#[derive(Debug, Clone)]
pub struct ControlSpec {
    pub descriptor: String,
    pub side: Option<Side>,
    /// Node to parent the finished control (its offset group) under
    pub parent: Option<String>,
    pub create_offset: bool,
    pub offset_style: OffsetStyle,
    pub shape: ShapeKind,
    /// Uniform size multiplier applied on top of `scale`
    pub size: f64,
    pub scale: Vec3,
    pub axis: Axis,
    /// Shape offset relative to the pivot
    pub shape_offset: Vec3,
    /// Explicit local transform, applied first
    pub trs: Option<Trs>,
    /// Node to position-match, applied after `trs`
    pub match_translate: Option<String>,
    /// Absolute world translation, overrides the above
    pub translate: Option<Vec3>,
    /// Absolute world rotation, overrides the above
    pub rotate: Option<Vec3>,
    pub color: Option<ColorTag>,
    pub use_secondary: bool,
    pub suffix: String,
    pub lock_hide: Vec<Channel>,
    pub gimbal: bool,
}

impl ControlSpec {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self {
            descriptor: descriptor.into(),
            side: None,
            parent: None,
            create_offset: true,
            offset_style: OffsetStyle::Suffix,
            shape: ShapeKind::Circle,
            size: 1.0,
            scale: Vec3::ONE,
            axis: Axis::Y,
            shape_offset: Vec3::ZERO,
            trs: None,
            match_translate: None,
            translate: None,
            rotate: None,
            color: None,
            use_secondary: false,
            suffix: naming::CONTROL_SUFFIX.to_string(),
            lock_hide: vec![Channel::Visibility],
            gimbal: false,
        }
    }
}

impl Default for ControlSpec {
    fn default() -> Self {
        Self::new("new")
    }
}

/// Immutable identity snapshot returned by [`ControlEntity::rename`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub full_path: String,
    pub offset_name: Option<String>,
    pub offset_full_path: Option<String>,
}

/// One control in the hierarchy, with its offset wrapper and shapes
#[derive(Debug, Clone)]
pub struct ControlEntity {
    /// Current display identity (`side_descriptor_suffix`)
    pub name: String,
    /// Fully qualified path from the document root to the node
    pub full_path: String,
    /// Offset wrapper identity, if one was created
    pub offset_name: Option<String>,
    pub offset_full_path: Option<String>,
    /// Path of the node the offset (or the node itself) sits under;
    /// empty means the document root
    pub parent_path: String,
    /// Shape nodes owned by the control transform
    pub shapes: Vec<String>,
    pub side: Side,
    pub color: ColorTag,
    pub locked_hidden: Vec<Channel>,
    /// Secondary gimbal sub-control, one level deep at most
    pub gimbal: Option<Box<ControlEntity>>,
    /// True when creation was skipped and a live node was adopted
    pub reused: bool,
    offset_style: OffsetStyle,
    queued_parent: Option<String>,
}

fn offset_name_for(name: &str, style: OffsetStyle) -> String {
    match style {
        OffsetStyle::Suffix => format!("{}_{}", name, naming::OFFSET_SUFFIX),
        OffsetStyle::Replace => match name.strip_suffix("_Ctrl") {
            Some(stem) => format!("{stem}_Ofs"),
            None => format!("{}_{}", name, naming::OFFSET_SUFFIX),
        },
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}|{name}")
    }
}

impl ControlEntity {
    /// Create a control in the document per `spec`
    ///
    /// If a node with the derived name already exists, creation is
    /// skipped and the live node is adopted unchanged apart from color
    /// and lock/hide state (a non-fatal collision; see the warning).
    pub fn create(doc: &mut dyn SceneDocument, spec: &ControlSpec) -> Result<Self> {
        let name = naming::build_name(spec.side, &spec.descriptor, &spec.suffix);
        let side = spec.side.unwrap_or_default();

        let mut entity = if doc.exists(&name) {
            warn!("\"{name}\" already exists, skipped");
            Self::adopt(doc, &name, spec)?
        } else {
            Self::build_fresh(doc, &name, spec)?
        };

        entity.side = side;

        // color and lock/hide apply on both the fresh and the adopted path
        doc.lock_hide(&entity.name, &spec.lock_hide)?;
        entity.locked_hidden = doc.locked_hidden(&entity.name);
        let color = spec
            .color
            .unwrap_or_else(|| color_for(side, spec.use_secondary));
        for shape in entity.shapes.clone() {
            doc.set_color(&shape, color)?;
        }
        entity.color = color;

        if spec.gimbal {
            entity.create_gimbal(doc, spec)?;
        }
        Ok(entity)
    }

    fn build_fresh(doc: &mut dyn SceneDocument, name: &str, spec: &ControlSpec) -> Result<Self> {
        doc.create_transform(name, None)?;
        let points = shapes::curve_points(
            spec.shape,
            spec.scale * spec.size,
            spec.shape_offset,
            spec.axis,
        );
        let shape = doc.create_curve(name, &points)?;

        // placement: explicit triple, then match, then absolute override
        if let Some(trs) = spec.trs {
            doc.set_local_trs(name, trs)?;
        }
        if let Some(target) = &spec.match_translate {
            let pos = doc.world_translation(target)?;
            doc.set_world_translation(name, pos)?;
        }
        if let Some(t) = spec.translate {
            doc.set_world_translation(name, t)?;
        }
        if let Some(r) = spec.rotate {
            doc.set_world_rotation(name, r)?;
        }

        let mut entity = Self {
            name: name.to_string(),
            full_path: name.to_string(),
            offset_name: None,
            offset_full_path: None,
            parent_path: String::new(),
            shapes: vec![shape],
            side: Side::Center,
            color: ColorTag::Yellow,
            locked_hidden: Vec::new(),
            gimbal: None,
            reused: false,
            offset_style: spec.offset_style,
            queued_parent: spec.parent.clone(),
        };

        if spec.create_offset {
            entity.add_offset_group(doc, spec.offset_style)?;
        } else if let Some(parent) = entity.queued_parent.take() {
            entity.set_parent(doc, &parent)?;
        }

        // rotate order stays authorable on every control
        doc.unlock_show(name, &[Channel::RotateOrder])?;
        Ok(entity)
    }

    /// Adopt a pre-existing node: no new shapes, no placement, no
    /// reparenting. Identity fields are read back from the document.
    fn adopt(doc: &mut dyn SceneDocument, name: &str, spec: &ControlSpec) -> Result<Self> {
        let offset_candidate = offset_name_for(name, spec.offset_style);
        let offset_name = doc.exists(&offset_candidate).then_some(offset_candidate);
        let offset_full_path = offset_name.as_ref().and_then(|o| doc.full_path(o));
        let outer = offset_name.as_deref().unwrap_or(name);
        let parent_path = doc
            .parent_of(outer)
            .and_then(|p| doc.full_path(&p))
            .unwrap_or_default();
        let full_path = doc
            .full_path(name)
            .ok_or_else(|| RigError::node_not_found(name))?;
        Ok(Self {
            name: name.to_string(),
            full_path,
            offset_name,
            offset_full_path,
            parent_path,
            shapes: doc.shapes_of(name),
            side: Side::Center,
            color: ColorTag::Yellow,
            locked_hidden: doc.locked_hidden(name),
            gimbal: None,
            reused: true,
            offset_style: spec.offset_style,
            queued_parent: None,
        })
    }

    fn create_gimbal(&mut self, doc: &mut dyn SceneDocument, spec: &ControlSpec) -> Result<()> {
        let gimbal_spec = ControlSpec {
            descriptor: format!("{}_Gimbal", spec.descriptor),
            parent: Some(self.name.clone()),
            size: spec.size * 0.9,
            gimbal: false,
            ..spec.clone()
        };
        let gimbal = ControlEntity::create(doc, &gimbal_spec)?;
        let plug = doc.add_int_attr(&self.name, "GimbalVis", 0, 1, false)?;
        for shape in &gimbal.shapes {
            doc.connect(&plug, &format!("{shape}.v"))?;
        }
        self.gimbal = Some(Box::new(gimbal));
        Ok(())
    }

    /// Current identity snapshot
    pub fn identity(&self) -> Identity {
        Identity {
            name: self.name.clone(),
            full_path: self.full_path.clone(),
            offset_name: self.offset_name.clone(),
            offset_full_path: self.offset_full_path.clone(),
        }
    }

    /// Rename the control (and its offset wrapper) atomically
    ///
    /// A collision on `new_name` is resolved to a free variant first.
    /// Returns the resulting identity snapshot; a no-op when `new_name`
    /// is already the current name.
    pub fn rename(&mut self, doc: &mut dyn SceneDocument, new_name: &str) -> Result<Identity> {
        if new_name == self.name {
            return Ok(self.identity());
        }
        let resolved = naming::unique(doc, new_name);
        doc.rename(&self.name, &resolved)?;
        self.name = resolved.clone();

        if let Some(old_ofs) = self.offset_name.clone() {
            if doc.exists(&old_ofs) {
                let new_ofs = naming::unique(doc, &offset_name_for(&resolved, self.offset_style));
                doc.rename(&old_ofs, &new_ofs)?;
                self.offset_name = Some(new_ofs);
            }
        }
        self.refresh_paths();
        Ok(self.identity())
    }

    /// Reparent the offset group (or the bare node when no offset
    /// exists) under `target`, or detach to the root for `"world"`.
    ///
    /// Idempotent: returns `Ok(false)` without touching the document
    /// when already parented correctly.
    pub fn set_parent(&mut self, doc: &mut dyn SceneDocument, target: &str) -> Result<bool> {
        let mover = self
            .offset_name
            .clone()
            .unwrap_or_else(|| self.name.clone());

        if target == "world" {
            if doc.parent_of(&mover).is_none() {
                return Ok(false);
            }
            doc.reparent(&mover, None)?;
            self.parent_path.clear();
        } else if doc.exists(target) {
            if doc.parent_of(&mover).as_deref() == Some(target) {
                return Ok(false);
            }
            doc.reparent(&mover, Some(target))?;
            self.parent_path = doc
                .full_path(target)
                .ok_or_else(|| RigError::node_not_found(target))?;
        } else {
            return Err(RigError::unresolved_parent(target));
        }

        self.refresh_paths();
        Ok(true)
    }

    /// Reparent the control node itself directly under `target`,
    /// bypassing the offset wrapper. No-op if already parented there.
    pub fn set_direct_parent(
        &mut self,
        doc: &mut dyn SceneDocument,
        target: &str,
    ) -> Result<bool> {
        if !doc.exists(target) {
            return Err(RigError::unresolved_parent(target));
        }
        if doc.parent_of(&self.name).as_deref() == Some(target) {
            return Ok(false);
        }
        doc.reparent(&self.name, Some(target))?;
        let parent_full = doc
            .full_path(target)
            .ok_or_else(|| RigError::node_not_found(target))?;
        self.full_path = join_path(&parent_full, &self.name);
        Ok(true)
    }

    /// Create the offset wrapper at the node's current world transform,
    /// slide the node under it, and apply any queued parent.
    pub fn add_offset_group(
        &mut self,
        doc: &mut dyn SceneDocument,
        style: OffsetStyle,
    ) -> Result<()> {
        let ofs = naming::unique(doc, &offset_name_for(&self.name, style));
        doc.create_transform(&ofs, None)?;
        let pos = doc.world_translation(&self.name)?;
        doc.set_world_translation(&ofs, pos)?;
        let trs = doc.local_trs(&self.name)?;
        doc.set_world_rotation(&ofs, trs.rotate)?;

        self.offset_name = Some(ofs.clone());
        self.offset_full_path = Some(ofs.clone());
        self.offset_style = style;
        self.set_direct_parent(doc, &ofs)?;

        if let Some(parent) = self.queued_parent.take() {
            self.set_parent(doc, &parent)?;
        }
        Ok(())
    }

    fn refresh_paths(&mut self) {
        match &self.offset_name {
            Some(ofs) => {
                let ofs_full = join_path(&self.parent_path, ofs);
                self.full_path = join_path(&ofs_full, &self.name);
                self.offset_full_path = Some(ofs_full);
            }
            None => {
                self.full_path = join_path(&self.parent_path, &self.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::MemoryDocument;

    fn spec(descriptor: &str) -> ControlSpec {
        ControlSpec {
            side: Some(Side::Center),
            shape: ShapeKind::Cube,
            size: 2.0,
            ..ControlSpec::new(descriptor)
        }
    }

    #[test]
    fn test_create_with_offset_paths_consistent() {
        let mut doc = MemoryDocument::new();
        let ctl = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        assert_eq!(ctl.name, "C_Body_Ctrl");
        assert_eq!(ctl.offset_name.as_deref(), Some("C_Body_Ctrl_Offset_Grp"));
        assert_eq!(ctl.full_path, "C_Body_Ctrl_Offset_Grp|C_Body_Ctrl");
        assert_eq!(ctl.parent_path, "");
        assert_eq!(doc.full_path("C_Body_Ctrl").unwrap(), ctl.full_path);
    }

    #[test]
    fn test_create_under_parent() {
        let mut doc = MemoryDocument::new();
        doc.create_transform("Rig_Grp", None).unwrap();
        let ctl = ControlEntity::create(
            &mut doc,
            &ControlSpec {
                parent: Some("Rig_Grp".to_string()),
                ..spec("Body")
            },
        )
        .unwrap();
        assert_eq!(ctl.parent_path, "Rig_Grp");
        assert_eq!(
            ctl.full_path,
            "Rig_Grp|C_Body_Ctrl_Offset_Grp|C_Body_Ctrl"
        );
        assert_eq!(doc.full_path("C_Body_Ctrl").unwrap(), ctl.full_path);
    }

    #[test]
    fn test_offset_inherits_world_position() {
        let mut doc = MemoryDocument::new();
        let ctl = ControlEntity::create(
            &mut doc,
            &ControlSpec {
                translate: Some(Vec3::new(1.0, 2.0, 3.0)),
                ..spec("Body")
            },
        )
        .unwrap();
        let ofs = ctl.offset_name.as_deref().unwrap();
        assert_eq!(
            doc.world_translation(ofs).unwrap(),
            Vec3::new(1.0, 2.0, 3.0)
        );
        // the node's own channels are neutral under the wrapper
        assert_eq!(
            doc.local_trs("C_Body_Ctrl").unwrap().translate,
            Vec3::ZERO
        );
        assert_eq!(
            doc.world_translation("C_Body_Ctrl").unwrap(),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_collision_adopts_existing_node() {
        let mut doc = MemoryDocument::new();
        let first = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        let count = doc.node_count();
        let second = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        assert!(!first.reused);
        assert!(second.reused);
        assert_eq!(second.name, first.name);
        assert_eq!(second.full_path, first.full_path);
        // no new transform or shape nodes were created
        assert_eq!(doc.node_count(), count);
    }

    #[test]
    fn test_rename_updates_all_identity_fields() {
        let mut doc = MemoryDocument::new();
        let mut ctl = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        let id = ctl.rename(&mut doc, "C_Torso_Ctrl").unwrap();
        assert_eq!(id.name, "C_Torso_Ctrl");
        assert_eq!(id.offset_name.as_deref(), Some("C_Torso_Ctrl_Offset_Grp"));
        assert_eq!(id.full_path, "C_Torso_Ctrl_Offset_Grp|C_Torso_Ctrl");
        assert_eq!(
            id.offset_full_path.as_deref(),
            Some("C_Torso_Ctrl_Offset_Grp")
        );
        assert_eq!(doc.full_path("C_Torso_Ctrl").unwrap(), id.full_path);
        assert!(!doc.exists("C_Body_Ctrl"));
        assert!(!doc.exists("C_Body_Ctrl_Offset_Grp"));
    }

    #[test]
    fn test_rename_sequence_equals_direct_rename() {
        let mut doc_a = MemoryDocument::new();
        let mut ctl_a = ControlEntity::create(&mut doc_a, &spec("Body")).unwrap();
        ctl_a.rename(&mut doc_a, "C_Alpha_Ctrl").unwrap();
        ctl_a.rename(&mut doc_a, "C_Beta_Ctrl").unwrap();
        let id_a = ctl_a.rename(&mut doc_a, "C_Final_Ctrl").unwrap();

        let mut doc_b = MemoryDocument::new();
        let mut ctl_b = ControlEntity::create(&mut doc_b, &spec("Body")).unwrap();
        let id_b = ctl_b.rename(&mut doc_b, "C_Final_Ctrl").unwrap();

        assert_eq!(id_a, id_b);
    }

    #[test]
    fn test_rename_same_name_is_noop() {
        let mut doc = MemoryDocument::new();
        let mut ctl = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        let rev = doc.revision();
        let id = ctl.rename(&mut doc, "C_Body_Ctrl").unwrap();
        assert_eq!(doc.revision(), rev);
        assert_eq!(id.name, "C_Body_Ctrl");
    }

    #[test]
    fn test_rename_collision_resolves_unique() {
        let mut doc = MemoryDocument::new();
        doc.create_transform("C_Taken_Ctrl", None).unwrap();
        let mut ctl = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        let id = ctl.rename(&mut doc, "C_Taken_Ctrl").unwrap();
        assert_eq!(id.name, "C_Taken_Ctrl1");
    }

    #[test]
    fn test_rename_offset_collision_keeps_paths_consistent() {
        let mut doc = MemoryDocument::new();
        // an unrelated node already holds the canonical offset name
        doc.create_transform("C_Torso_Ctrl_Offset_Grp", None).unwrap();
        let mut ctl = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        let id = ctl.rename(&mut doc, "C_Torso_Ctrl").unwrap();
        assert_eq!(id.name, "C_Torso_Ctrl");
        assert_eq!(id.offset_name.as_deref(), Some("C_Torso_Ctrl_Offset_Grp1"));
        assert_eq!(id.full_path, "C_Torso_Ctrl_Offset_Grp1|C_Torso_Ctrl");
        assert_eq!(
            id.offset_full_path.as_deref(),
            Some("C_Torso_Ctrl_Offset_Grp1")
        );
        assert_eq!(doc.full_path("C_Torso_Ctrl").unwrap(), id.full_path);
    }

    #[test]
    fn test_set_parent_idempotent() {
        let mut doc = MemoryDocument::new();
        doc.create_transform("Rig_Grp", None).unwrap();
        let mut ctl = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        assert!(ctl.set_parent(&mut doc, "Rig_Grp").unwrap());
        let rev = doc.revision();
        assert!(!ctl.set_parent(&mut doc, "Rig_Grp").unwrap());
        assert_eq!(doc.revision(), rev);
    }

    #[test]
    fn test_set_parent_world_detaches() {
        let mut doc = MemoryDocument::new();
        doc.create_transform("Rig_Grp", None).unwrap();
        let mut ctl = ControlEntity::create(
            &mut doc,
            &ControlSpec {
                parent: Some("Rig_Grp".to_string()),
                ..spec("Body")
            },
        )
        .unwrap();
        assert!(ctl.set_parent(&mut doc, "world").unwrap());
        assert_eq!(ctl.parent_path, "");
        assert_eq!(ctl.full_path, "C_Body_Ctrl_Offset_Grp|C_Body_Ctrl");
        // already at the root: second call is a no-op
        assert!(!ctl.set_parent(&mut doc, "world").unwrap());
    }

    #[test]
    fn test_set_parent_missing_target_fails() {
        let mut doc = MemoryDocument::new();
        let mut ctl = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        assert!(matches!(
            ctl.set_parent(&mut doc, "Ghost_Grp"),
            Err(RigError::UnresolvedParent { .. })
        ));
    }

    #[test]
    fn test_set_direct_parent_bypasses_offset() {
        let mut doc = MemoryDocument::new();
        doc.create_transform("Row_Ctl", None).unwrap();
        let mut ctl = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        assert!(ctl.set_direct_parent(&mut doc, "Row_Ctl").unwrap());
        assert_eq!(doc.parent_of("C_Body_Ctrl").as_deref(), Some("Row_Ctl"));
        // offset group stays where it was
        assert_eq!(doc.parent_of("C_Body_Ctrl_Offset_Grp"), None);
        assert!(!ctl.set_direct_parent(&mut doc, "Row_Ctl").unwrap());
    }

    #[test]
    fn test_gimbal_child() {
        let mut doc = MemoryDocument::new();
        let ctl = ControlEntity::create(
            &mut doc,
            &ControlSpec {
                gimbal: true,
                ..spec("Body")
            },
        )
        .unwrap();
        let gimbal = ctl.gimbal.as_ref().unwrap();
        assert_eq!(gimbal.name, "C_Body_Gimbal_Ctrl");
        // nested directly under the primary node via its offset group
        assert_eq!(
            doc.parent_of("C_Body_Gimbal_Ctrl_Offset_Grp").as_deref(),
            Some("C_Body_Ctrl")
        );
        // visibility toggle wired to the gimbal shapes
        let shape = &gimbal.shapes[0];
        assert_eq!(
            doc.incoming(&format!("{shape}.v")),
            Some("C_Body_Ctrl.GimbalVis")
        );
        // one level of recursion only
        assert!(gimbal.gimbal.is_none());
    }

    #[test]
    fn test_no_offset_parent_applies_to_node() {
        let mut doc = MemoryDocument::new();
        doc.create_transform("Rig_Grp", None).unwrap();
        let ctl = ControlEntity::create(
            &mut doc,
            &ControlSpec {
                create_offset: false,
                parent: Some("Rig_Grp".to_string()),
                ..spec("Body")
            },
        )
        .unwrap();
        assert_eq!(ctl.offset_name, None);
        assert_eq!(ctl.full_path, "Rig_Grp|C_Body_Ctrl");
        assert_eq!(doc.parent_of("C_Body_Ctrl").as_deref(), Some("Rig_Grp"));
    }

    #[test]
    fn test_replace_offset_style() {
        let mut doc = MemoryDocument::new();
        let ctl = ControlEntity::create(
            &mut doc,
            &ControlSpec {
                offset_style: OffsetStyle::Replace,
                ..spec("Body")
            },
        )
        .unwrap();
        assert_eq!(ctl.offset_name.as_deref(), Some("C_Body_Ofs"));
        assert_eq!(ctl.full_path, "C_Body_Ofs|C_Body_Ctrl");
    }

    #[test]
    fn test_rotate_order_stays_authorable() {
        let mut doc = MemoryDocument::new();
        let ctl = ControlEntity::create(&mut doc, &spec("Body")).unwrap();
        assert!(ctl.locked_hidden.contains(&Channel::Visibility));
        assert!(!ctl.locked_hidden.contains(&Channel::RotateOrder));
    }
}
