//! Scene document abstraction
//!
//! The rig builder never touches ambient global state: every create,
//! rename, reparent and connect goes through the [`SceneDocument`] trait,
//! which mirrors the primitives a host scene graph exposes. That keeps
//! naming and hierarchy logic testable against a mock, and lets the CLI
//! run the full build against the in-memory [`MemoryDocument`].
//!
//! # Document invariants
//!
//! - Node names are unique across the whole document (host short names),
//!   so a name identifies exactly one path segment. The control layer
//!   relies on this when it rebuilds path fields after a rename.
//! - A full path is the `|`-joined chain of names from a root node down,
//!   with no leading separator.
//! - World translation composes translations along the ancestor chain.
//!   Rotation is stored per node but not composed; nothing in the build
//!   algorithm reads a rotated ancestor frame.

use crate::core::color::ColorTag;
use crate::core::error::{Result, RigError};
use crate::core::geometry::{union_bounds, Bounds, Trs, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// A lockable/hidable transform channel group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    Translate,
    Rotate,
    Scale,
    Visibility,
    RotateOrder,
}

/// The three nodes a lattice deformer is made of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeHandles {
    /// The deformer node carrying outsideLattice / falloff / envelope
    pub deformer: String,
    /// The editable point cage
    pub cage: String,
    /// The undeformed reference copy of the cage
    pub base: String,
}

/// Kind of constraint recorded on the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintKind {
    Parent,
    Scale,
}

/// One constraint between a driver and a driven node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRecord {
    pub kind: ConstraintKind,
    pub driver: String,
    pub driven: String,
    pub maintain_offset: bool,
}

/// Host scene-graph primitives consumed by the rig builder
///
/// This is the collaborator contract: creation, identity, hierarchy,
/// transform, attribute and constraint primitives, each synchronous and
/// immediately visible to subsequent calls.
#[cfg_attr(test, automock)]
pub trait SceneDocument {
    // identity and queries
    fn exists(&self, name: &str) -> bool;
    fn full_path(&self, name: &str) -> Option<String>;
    fn parent_of(&self, name: &str) -> Option<String>;
    fn selection(&self) -> Vec<String>;
    fn set_selection(&mut self, names: &[String]);

    // node lifecycle and hierarchy
    fn create_transform<'a>(&mut self, name: &str, parent: Option<&'a str>) -> Result<String>;
    fn rename(&mut self, old: &str, new: &str) -> Result<String>;
    /// Reparent `node` under `parent`, or detach to the document root
    /// when `parent` is `None`.
    fn reparent<'a>(&mut self, node: &str, parent: Option<&'a str>) -> Result<()>;
    /// Create an empty group node and move `members` under it
    fn group(&mut self, name: &str, members: &[String]) -> Result<String>;

    // transforms
    fn world_translation(&self, node: &str) -> Result<Vec3>;
    fn set_world_translation(&mut self, node: &str, pos: Vec3) -> Result<()>;
    fn set_world_rotation(&mut self, node: &str, rot: Vec3) -> Result<()>;
    fn local_trs(&self, node: &str) -> Result<Trs>;
    fn set_local_trs(&mut self, node: &str, trs: Trs) -> Result<()>;
    fn bounding_box(&self, node: &str) -> Result<Bounds>;

    // curve shapes
    fn create_curve(&mut self, transform: &str, points: &[Vec3]) -> Result<String>;
    fn shapes_of(&self, transform: &str) -> Vec<String>;
    fn curve_points(&self, shape: &str) -> Result<Vec<Vec3>>;
    fn set_curve_points(&mut self, shape: &str, points: &[Vec3]) -> Result<()>;
    fn set_color(&mut self, node: &str, color: ColorTag) -> Result<()>;
    fn clear_color(&mut self, node: &str) -> Result<()>;
    fn color_of(&self, node: &str) -> Option<ColorTag>;

    // deformer
    /// Create a lattice deformer over the current selection. Node names
    /// are generated; callers rename them into their own convention.
    fn create_lattice(
        &mut self,
        divisions: (usize, usize, usize),
        object_centered: bool,
        outside_mode: i64,
    ) -> Result<LatticeHandles>;
    /// World position of one cage point, `pt[x][y][z]`
    fn lattice_point(&self, cage: &str, x: usize, y: usize, z: usize) -> Result<Vec3>;
    /// Create a proxy driver transform pinned to one cage point
    fn create_point_proxy(
        &mut self,
        cage: &str,
        index: (usize, usize, usize),
        name: &str,
    ) -> Result<String>;

    // attributes and connections
    fn add_enum_attr(&mut self, node: &str, attr: &str, options: &[String]) -> Result<String>;
    fn add_float_attr(
        &mut self,
        node: &str,
        attr: &str,
        min: Option<f64>,
        max: Option<f64>,
        default: f64,
    ) -> Result<String>;
    fn add_int_attr(
        &mut self,
        node: &str,
        attr: &str,
        min: i64,
        max: i64,
        keyable: bool,
    ) -> Result<String>;
    fn connect(&mut self, src_plug: &str, dst_plug: &str) -> Result<()>;

    // display state and constraints
    fn set_visibility(&mut self, node: &str, visible: bool) -> Result<()>;
    fn visibility(&self, node: &str) -> Result<bool>;
    fn lock_hide(&mut self, node: &str, channels: &[Channel]) -> Result<()>;
    fn unlock_show(&mut self, node: &str, channels: &[Channel]) -> Result<()>;
    fn locked_hidden(&self, node: &str) -> Vec<Channel>;
    fn parent_constrain(&mut self, driver: &str, driven: &str, maintain_offset: bool)
        -> Result<()>;
    fn scale_constrain(&mut self, driver: &str, driven: &str, maintain_offset: bool)
        -> Result<()>;
}

/// What a node is, beyond its transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NodeKind {
    Transform,
    /// A curve shape node (child of a transform), defined by its points
    Curve { points: Vec<Vec3> },
    /// Deformable geometry with a world-space bounding box
    Geometry { bbox_min: Vec3, bbox_max: Vec3 },
    /// Lattice deformer node
    Deformer,
    /// Lattice point cage holding the editable grid
    Cage {
        divisions: (usize, usize, usize),
        points: Vec<Vec3>,
    },
    /// Undeformed reference copy of the cage
    LatticeBase,
    /// Proxy driver bound to one cage point
    Proxy {
        cage: String,
        index: (usize, usize, usize),
    },
}

/// Stored value of a user-added attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum AttrValue {
    Float(f64),
    Int(i64),
    Enum(usize),
}

/// A user-added attribute with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrDef {
    pub value: AttrValue,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_keyable")]
    pub keyable: bool,
}

fn default_keyable() -> bool {
    true
}

/// One node in the in-memory document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// Parent node name; `None` for roots
    pub parent: Option<String>,
    /// Ordered child names
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub trs: Trs,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked_hidden: Vec<Channel>,
    #[serde(default)]
    pub color: Option<ColorTag>,
    #[serde(default)]
    pub attrs: BTreeMap<String, AttrDef>,
}

fn default_visible() -> bool {
    true
}

impl Node {
    fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            parent: None,
            children: Vec::new(),
            trs: Trs::default(),
            visible: true,
            locked_hidden: Vec::new(),
            color: None,
            attrs: BTreeMap::new(),
        }
    }
}

/// In-memory scene document
///
/// Serde round-trippable so the CLI can operate on a JSON scene file.
/// `revision` counts applied mutations, which lets tests assert that an
/// idempotent operation really touched nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDocument {
    nodes: BTreeMap<String, Node>,
    /// Ordered root node names
    roots: Vec<String>,
    #[serde(default)]
    selection: Vec<String>,
    #[serde(default)]
    connections: Vec<(String, String)>,
    #[serde(default)]
    constraints: Vec<ConstraintRecord>,
    /// Counter for generated deformer names (ffd1, ffd2, ...)
    #[serde(default)]
    lattice_counter: u32,
    #[serde(default)]
    revision: u64,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutations applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Total node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow a node by name
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// All recorded constraints driving `driven`
    pub fn constraints_on(&self, driven: &str) -> Vec<&ConstraintRecord> {
        self.constraints
            .iter()
            .filter(|c| c.driven == driven)
            .collect()
    }

    /// All attribute connections, in creation order
    pub fn connections(&self) -> &[(String, String)] {
        &self.connections
    }

    /// Source plug connected into `dst_plug`, if any
    pub fn incoming(&self, dst_plug: &str) -> Option<&str> {
        self.connections
            .iter()
            .find(|(_, dst)| dst == dst_plug)
            .map(|(src, _)| src.as_str())
    }

    /// Names of transform nodes whose name ends with `suffix`, sorted
    pub fn transforms_with_suffix(&self, suffix: &str) -> Vec<String> {
        self.nodes
            .values()
            .filter(|n| n.name.ends_with(suffix) && !matches!(n.kind, NodeKind::Curve { .. }))
            .map(|n| n.name.clone())
            .collect()
    }

    /// Seed a geometry node with a world-space bounding box
    pub fn create_geometry(&mut self, name: &str, bbox_min: Vec3, bbox_max: Vec3) -> Result<String> {
        self.insert_root(Node::new(
            name,
            NodeKind::Geometry { bbox_min, bbox_max },
        ))?;
        Ok(name.to_string())
    }

    /// Load a document from a JSON scene file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RigError::invalid_scene(format!(
                "scene file {} does not exist",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the document to a JSON scene file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn get(&self, name: &str) -> Result<&Node> {
        self.nodes
            .get(name)
            .ok_or_else(|| RigError::node_not_found(name))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Node> {
        self.nodes
            .get_mut(name)
            .ok_or_else(|| RigError::node_not_found(name))
    }

    fn insert_root(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.name) {
            return Err(RigError::name_taken(&node.name));
        }
        self.roots.push(node.name.clone());
        self.nodes.insert(node.name.clone(), node);
        self.touch();
        Ok(())
    }

    fn detach(&mut self, name: &str) {
        let parent = self.nodes.get(name).and_then(|n| n.parent.clone());
        match parent {
            Some(p) => {
                if let Some(pn) = self.nodes.get_mut(&p) {
                    pn.children.retain(|c| c != name);
                }
            }
            None => self.roots.retain(|r| r != name),
        }
    }

    fn attach(&mut self, name: &str, parent: Option<&str>) {
        match parent {
            Some(p) => {
                if let Some(pn) = self.nodes.get_mut(p) {
                    pn.children.push(name.to_string());
                }
                if let Some(n) = self.nodes.get_mut(name) {
                    n.parent = Some(p.to_string());
                }
            }
            None => {
                self.roots.push(name.to_string());
                if let Some(n) = self.nodes.get_mut(name) {
                    n.parent = None;
                }
            }
        }
    }

    /// Would parenting `node` under `candidate` create a cycle?
    fn is_descendant(&self, candidate: &str, node: &str) -> bool {
        let mut cur = Some(candidate.to_string());
        while let Some(c) = cur {
            if c == node {
                return true;
            }
            cur = self.nodes.get(&c).and_then(|n| n.parent.clone());
        }
        false
    }

    /// Resolve a plug string `node.attr` against the document
    fn resolve_plug(&self, plug: &str) -> Result<(String, String)> {
        let (node, attr) = plug
            .split_once('.')
            .ok_or_else(|| RigError::UnknownPlug {
                plug: plug.to_string(),
            })?;
        let n = self
            .nodes
            .get(node)
            .ok_or_else(|| RigError::UnknownPlug {
                plug: plug.to_string(),
            })?;
        let builtin = matches!(attr, "v" | "visibility");
        if !builtin && !n.attrs.contains_key(attr) {
            return Err(RigError::UnknownPlug {
                plug: plug.to_string(),
            });
        }
        Ok((node.to_string(), attr.to_string()))
    }

    fn add_attr(&mut self, node: &str, attr: &str, def: AttrDef) -> Result<String> {
        let n = self.get_mut(node)?;
        n.attrs.insert(attr.to_string(), def);
        self.touch();
        Ok(format!("{node}.{attr}"))
    }
}

impl SceneDocument for MemoryDocument {
    fn exists(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    fn full_path(&self, name: &str) -> Option<String> {
        if !self.nodes.contains_key(name) {
            return None;
        }
        let mut segments = vec![name.to_string()];
        let mut cur = self.nodes.get(name).and_then(|n| n.parent.clone());
        while let Some(p) = cur {
            segments.push(p.clone());
            cur = self.nodes.get(&p).and_then(|n| n.parent.clone());
        }
        segments.reverse();
        Some(segments.join("|"))
    }

    fn parent_of(&self, name: &str) -> Option<String> {
        self.nodes.get(name).and_then(|n| n.parent.clone())
    }

    fn selection(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn set_selection(&mut self, names: &[String]) {
        self.selection = names.to_vec();
    }

    fn create_transform<'a>(&mut self, name: &str, parent: Option<&'a str>) -> Result<String> {
        if self.nodes.contains_key(name) {
            return Err(RigError::name_taken(name));
        }
        if let Some(p) = parent {
            if !self.nodes.contains_key(p) {
                return Err(RigError::unresolved_parent(p));
            }
        }
        let mut node = Node::new(name, NodeKind::Transform);
        node.parent = parent.map(str::to_string);
        self.nodes.insert(name.to_string(), node);
        match parent {
            Some(p) => {
                if let Some(pn) = self.nodes.get_mut(p) {
                    pn.children.push(name.to_string());
                }
            }
            None => self.roots.push(name.to_string()),
        }
        self.touch();
        Ok(name.to_string())
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<String> {
        if old == new {
            return Ok(new.to_string());
        }
        if self.nodes.contains_key(new) {
            return Err(RigError::name_taken(new));
        }
        let Some(mut node) = self.nodes.remove(old) else {
            return Err(RigError::node_not_found(old));
        };
        node.name = new.to_string();
        // repair links that refer to the old identity
        let parent = node.parent.clone();
        let children = node.children.clone();
        self.nodes.insert(new.to_string(), node);
        match parent {
            Some(p) => {
                if let Some(pn) = self.nodes.get_mut(&p) {
                    for c in pn.children.iter_mut() {
                        if c == old {
                            *c = new.to_string();
                        }
                    }
                }
            }
            None => {
                for r in self.roots.iter_mut() {
                    if r == old {
                        *r = new.to_string();
                    }
                }
            }
        }
        for child in children {
            if let Some(cn) = self.nodes.get_mut(&child) {
                cn.parent = Some(new.to_string());
            }
        }
        for sel in self.selection.iter_mut() {
            if sel == old {
                *sel = new.to_string();
            }
        }
        let prefix = format!("{old}.");
        for (src, dst) in self.connections.iter_mut() {
            if let Some(rest) = src.strip_prefix(&prefix) {
                *src = format!("{new}.{rest}");
            }
            if let Some(rest) = dst.strip_prefix(&prefix) {
                *dst = format!("{new}.{rest}");
            }
        }
        for c in self.constraints.iter_mut() {
            if c.driver == old {
                c.driver = new.to_string();
            }
            if c.driven == old {
                c.driven = new.to_string();
            }
        }
        self.touch();
        Ok(new.to_string())
    }

    fn reparent<'a>(&mut self, node: &str, parent: Option<&'a str>) -> Result<()> {
        if !self.nodes.contains_key(node) {
            return Err(RigError::node_not_found(node));
        }
        if let Some(p) = parent {
            if !self.nodes.contains_key(p) {
                return Err(RigError::unresolved_parent(p));
            }
            if self.is_descendant(p, node) {
                return Err(RigError::unresolved_parent(p));
            }
        }
        let current = self.nodes.get(node).and_then(|n| n.parent.as_deref());
        if current == parent {
            return Ok(());
        }
        // host semantics: a reparent keeps the node's world position by
        // recomputing its local translation under the new parent
        let world = self.world_translation(node)?;
        self.detach(node);
        self.attach(node, parent);
        let parent_world = match parent {
            Some(p) => self.world_translation(p)?,
            None => Vec3::ZERO,
        };
        if let Some(n) = self.nodes.get_mut(node) {
            n.trs.translate = world - parent_world;
        }
        self.touch();
        Ok(())
    }

    fn group(&mut self, name: &str, members: &[String]) -> Result<String> {
        self.create_transform(name, None)?;
        for m in members {
            self.reparent(m, Some(name))?;
        }
        Ok(name.to_string())
    }

    fn world_translation(&self, node: &str) -> Result<Vec3> {
        let mut pos = Vec3::ZERO;
        let mut cur = Some(node.to_string());
        while let Some(c) = cur {
            let n = self.get(&c)?;
            pos = pos + n.trs.translate;
            cur = n.parent.clone();
        }
        Ok(pos)
    }

    fn set_world_translation(&mut self, node: &str, pos: Vec3) -> Result<()> {
        let parent_world = match self.parent_of(node) {
            Some(p) => self.world_translation(&p)?,
            None => Vec3::ZERO,
        };
        let n = self.get_mut(node)?;
        n.trs.translate = pos - parent_world;
        self.touch();
        Ok(())
    }

    fn set_world_rotation(&mut self, node: &str, rot: Vec3) -> Result<()> {
        let n = self.get_mut(node)?;
        n.trs.rotate = rot;
        self.touch();
        Ok(())
    }

    fn local_trs(&self, node: &str) -> Result<Trs> {
        Ok(self.get(node)?.trs)
    }

    fn set_local_trs(&mut self, node: &str, trs: Trs) -> Result<()> {
        let n = self.get_mut(node)?;
        n.trs = trs;
        self.touch();
        Ok(())
    }

    fn bounding_box(&self, node: &str) -> Result<Bounds> {
        let n = self.get(node)?;
        let world = self.world_translation(node)?;
        match &n.kind {
            NodeKind::Geometry { bbox_min, bbox_max } => Ok((*bbox_min, *bbox_max)),
            NodeKind::Cage { points, .. } => {
                let mut min = points.first().copied().unwrap_or(Vec3::ZERO);
                let mut max = min;
                for p in points {
                    min = min.min(*p);
                    max = max.max(*p);
                }
                Ok((min + world, max + world))
            }
            _ => {
                let mut bounds: Option<Bounds> = None;
                for child in &n.children {
                    let b = self.bounding_box(child)?;
                    bounds = Some(match bounds {
                        Some(acc) => union_bounds(acc, b),
                        None => b,
                    });
                }
                Ok(bounds.unwrap_or((world, world)))
            }
        }
    }

    fn create_curve(&mut self, transform: &str, points: &[Vec3]) -> Result<String> {
        if !self.nodes.contains_key(transform) {
            return Err(RigError::node_not_found(transform));
        }
        let existing = self.shapes_of(transform).len();
        let shape_name = if existing == 0 {
            format!("{transform}Shape")
        } else {
            format!("{transform}Shape{}", existing + 1)
        };
        if self.nodes.contains_key(&shape_name) {
            return Err(RigError::name_taken(&shape_name));
        }
        let mut node = Node::new(
            &shape_name,
            NodeKind::Curve {
                points: points.to_vec(),
            },
        );
        node.parent = Some(transform.to_string());
        self.nodes.insert(shape_name.clone(), node);
        if let Some(t) = self.nodes.get_mut(transform) {
            t.children.push(shape_name.clone());
        }
        self.touch();
        Ok(shape_name)
    }

    fn shapes_of(&self, transform: &str) -> Vec<String> {
        let Some(n) = self.nodes.get(transform) else {
            return Vec::new();
        };
        n.children
            .iter()
            .filter(|c| {
                matches!(
                    self.nodes.get(*c).map(|cn| &cn.kind),
                    Some(NodeKind::Curve { .. })
                )
            })
            .cloned()
            .collect()
    }

    fn curve_points(&self, shape: &str) -> Result<Vec<Vec3>> {
        match &self.get(shape)?.kind {
            NodeKind::Curve { points } => Ok(points.clone()),
            _ => Err(RigError::WrongKind {
                node: shape.to_string(),
                expected: "curve shape",
            }),
        }
    }

    fn set_curve_points(&mut self, shape: &str, points: &[Vec3]) -> Result<()> {
        let n = self.get_mut(shape)?;
        match &mut n.kind {
            NodeKind::Curve { points: stored } => {
                *stored = points.to_vec();
                self.touch();
                Ok(())
            }
            _ => Err(RigError::WrongKind {
                node: shape.to_string(),
                expected: "curve shape",
            }),
        }
    }

    fn set_color(&mut self, node: &str, color: ColorTag) -> Result<()> {
        let n = self.get_mut(node)?;
        n.color = Some(color);
        self.touch();
        Ok(())
    }

    fn clear_color(&mut self, node: &str) -> Result<()> {
        let n = self.get_mut(node)?;
        n.color = None;
        self.touch();
        Ok(())
    }

    fn color_of(&self, node: &str) -> Option<ColorTag> {
        self.nodes.get(node).and_then(|n| n.color)
    }

    fn create_lattice(
        &mut self,
        divisions: (usize, usize, usize),
        object_centered: bool,
        outside_mode: i64,
    ) -> Result<LatticeHandles> {
        if self.selection.is_empty() {
            return Err(RigError::EmptySelection);
        }
        // combined bounds of the selected geometry
        let mut bounds: Option<Bounds> = None;
        for sel in self.selection.clone() {
            let b = self.bounding_box(&sel)?;
            bounds = Some(match bounds {
                Some(acc) => union_bounds(acc, b),
                None => b,
            });
        }
        let (min, max) = bounds.expect("selection is non-empty");
        // object_centered pins the cage to the geometry bounds; the
        // fallback is a unit cage at the origin
        let (min, max) = if object_centered {
            (min, max)
        } else {
            (Vec3::splat(-0.5), Vec3::splat(0.5))
        };

        let (dx, dy, dz) = divisions;
        let mut points = Vec::with_capacity(dx * dy * dz);
        let span = max - min;
        let step = |count: usize, axis: f64, origin: f64, i: usize| {
            if count <= 1 {
                origin + axis * 0.5
            } else {
                origin + axis * (i as f64 / (count - 1) as f64)
            }
        };
        // storage order matches pt[x][y][z]: x outer, then y, then z
        for x in 0..dx {
            for y in 0..dy {
                for z in 0..dz {
                    points.push(Vec3::new(
                        step(dx, span.x, min.x, x),
                        step(dy, span.y, min.y, y),
                        step(dz, span.z, min.z, z),
                    ));
                }
            }
        }

        self.lattice_counter += 1;
        let deformer = format!("ffd{}", self.lattice_counter);
        let cage = format!("ffd{}Lattice", self.lattice_counter);
        let base = format!("ffd{}Base", self.lattice_counter);
        for name in [&deformer, &cage, &base] {
            if self.nodes.contains_key(name.as_str()) {
                return Err(RigError::name_taken(name.as_str()));
            }
        }

        let mut deformer_node = Node::new(&deformer, NodeKind::Deformer);
        deformer_node.attrs.insert(
            "outsideLattice".to_string(),
            AttrDef {
                value: AttrValue::Int(outside_mode),
                min: Some(0.0),
                max: Some(2.0),
                options: Vec::new(),
                keyable: true,
            },
        );
        deformer_node.attrs.insert(
            "outsideFalloffDist".to_string(),
            AttrDef {
                value: AttrValue::Float(1.0),
                min: Some(0.0),
                max: None,
                options: Vec::new(),
                keyable: true,
            },
        );
        deformer_node.attrs.insert(
            "envelope".to_string(),
            AttrDef {
                value: AttrValue::Float(1.0),
                min: Some(0.0),
                max: Some(1.0),
                options: Vec::new(),
                keyable: true,
            },
        );
        self.insert_root(deformer_node)?;
        self.insert_root(Node::new(
            &cage,
            NodeKind::Cage {
                divisions,
                points: points.clone(),
            },
        ))?;
        self.insert_root(Node::new(&base, NodeKind::LatticeBase))?;
        Ok(LatticeHandles {
            deformer,
            cage,
            base,
        })
    }

    fn lattice_point(&self, cage: &str, x: usize, y: usize, z: usize) -> Result<Vec3> {
        let world = self.world_translation(cage)?;
        let n = self.get(cage)?;
        match &n.kind {
            NodeKind::Cage { divisions, points } => {
                let (dx, dy, dz) = *divisions;
                if x >= dx || y >= dy || z >= dz {
                    return Err(RigError::PointOutOfRange {
                        cage: cage.to_string(),
                        x,
                        y,
                        z,
                    });
                }
                Ok(points[x * dy * dz + y * dz + z] + world)
            }
            _ => Err(RigError::WrongKind {
                node: cage.to_string(),
                expected: "lattice cage",
            }),
        }
    }

    fn create_point_proxy(
        &mut self,
        cage: &str,
        index: (usize, usize, usize),
        name: &str,
    ) -> Result<String> {
        let pos = self.lattice_point(cage, index.0, index.1, index.2)?;
        if self.nodes.contains_key(name) {
            return Err(RigError::name_taken(name));
        }
        let mut node = Node::new(
            name,
            NodeKind::Proxy {
                cage: cage.to_string(),
                index,
            },
        );
        node.trs.translate = pos;
        self.insert_root(node)?;
        Ok(name.to_string())
    }

    fn add_enum_attr(&mut self, node: &str, attr: &str, options: &[String]) -> Result<String> {
        self.add_attr(
            node,
            attr,
            AttrDef {
                value: AttrValue::Enum(0),
                min: None,
                max: None,
                options: options.to_vec(),
                keyable: true,
            },
        )
    }

    fn add_float_attr(
        &mut self,
        node: &str,
        attr: &str,
        min: Option<f64>,
        max: Option<f64>,
        default: f64,
    ) -> Result<String> {
        self.add_attr(
            node,
            attr,
            AttrDef {
                value: AttrValue::Float(default),
                min,
                max,
                options: Vec::new(),
                keyable: true,
            },
        )
    }

    fn add_int_attr(
        &mut self,
        node: &str,
        attr: &str,
        min: i64,
        max: i64,
        keyable: bool,
    ) -> Result<String> {
        self.add_attr(
            node,
            attr,
            AttrDef {
                value: AttrValue::Int(0),
                min: Some(min as f64),
                max: Some(max as f64),
                options: Vec::new(),
                keyable,
            },
        )
    }

    fn connect(&mut self, src_plug: &str, dst_plug: &str) -> Result<()> {
        self.resolve_plug(src_plug)?;
        self.resolve_plug(dst_plug)?;
        self.connections
            .push((src_plug.to_string(), dst_plug.to_string()));
        self.touch();
        Ok(())
    }

    fn set_visibility(&mut self, node: &str, visible: bool) -> Result<()> {
        let n = self.get_mut(node)?;
        n.visible = visible;
        self.touch();
        Ok(())
    }

    fn visibility(&self, node: &str) -> Result<bool> {
        Ok(self.get(node)?.visible)
    }

    fn lock_hide(&mut self, node: &str, channels: &[Channel]) -> Result<()> {
        let n = self.get_mut(node)?;
        for c in channels {
            if !n.locked_hidden.contains(c) {
                n.locked_hidden.push(*c);
            }
        }
        n.locked_hidden.sort();
        self.touch();
        Ok(())
    }

    fn unlock_show(&mut self, node: &str, channels: &[Channel]) -> Result<()> {
        let n = self.get_mut(node)?;
        n.locked_hidden.retain(|c| !channels.contains(c));
        self.touch();
        Ok(())
    }

    fn locked_hidden(&self, node: &str) -> Vec<Channel> {
        self.nodes
            .get(node)
            .map(|n| n.locked_hidden.clone())
            .unwrap_or_default()
    }

    fn parent_constrain(
        &mut self,
        driver: &str,
        driven: &str,
        maintain_offset: bool,
    ) -> Result<()> {
        if !self.nodes.contains_key(driver) {
            return Err(RigError::node_not_found(driver));
        }
        if !self.nodes.contains_key(driven) {
            return Err(RigError::node_not_found(driven));
        }
        self.constraints.push(ConstraintRecord {
            kind: ConstraintKind::Parent,
            driver: driver.to_string(),
            driven: driven.to_string(),
            maintain_offset,
        });
        self.touch();
        Ok(())
    }

    fn scale_constrain(
        &mut self,
        driver: &str,
        driven: &str,
        maintain_offset: bool,
    ) -> Result<()> {
        if !self.nodes.contains_key(driver) {
            return Err(RigError::node_not_found(driver));
        }
        if !self.nodes.contains_key(driven) {
            return Err(RigError::node_not_found(driven));
        }
        self.constraints.push(ConstraintRecord {
            kind: ConstraintKind::Scale,
            driver: driver.to_string(),
            driven: driven.to_string(),
            maintain_offset,
        });
        self.touch();
        Ok(())
    }
}
