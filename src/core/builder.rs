//! Procedural lattice control hierarchy
//!
//! [`HierarchyBuilder`] is the entry point: given a rig name and a
//! document with geometry selected, it creates a 3x3x3 lattice deformer,
//! partitions the cage into three rows, and assembles the control tree
//!
//! ```text
//! Base (master) -> Main -> {Upper, Mid, Lower} -> 27 leaf controls
//! ```
//!
//! with one hidden point proxy reparented under each leaf, then wires the
//! deformer parameters to attributes on the base control.

use crate::core::color::{ColorTag, Side};
use crate::core::control::{ControlEntity, ControlSpec};
use crate::core::document::{Channel, SceneDocument};
use crate::core::error::{Result, RigError};
use crate::core::geometry::{centroid, Vec3};
use crate::core::naming;
use crate::core::shapes::ShapeKind;
use log::{info, warn};

/// Fixed lattice division scheme
pub const DIVISIONS: (usize, usize, usize) = (3, 3, 3);

/// Outside-lattice falloff mode passed to the deformer at creation
const OUTSIDE_FALLOFF: i64 = 1;

/// One horizontal layer of the point grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTier {
    Upper,
    Mid,
    Lower,
}

impl RowTier {
    /// Build order: Upper, Mid, Lower. Must stay stable for
    /// reproducible naming and hierarchy shape
    pub const ALL: [RowTier; 3] = [RowTier::Upper, RowTier::Mid, RowTier::Lower];

    /// Name tag embedded in proxy and control names
    pub fn tag(&self) -> &'static str {
        match self {
            RowTier::Upper => "Upr",
            RowTier::Mid => "Mid",
            RowTier::Lower => "Lwr",
        }
    }

    /// Cage Y-layer for this row (top layer is the highest index)
    pub fn y_layer(&self) -> usize {
        match self {
            RowTier::Upper => 2,
            RowTier::Mid => 1,
            RowTier::Lower => 0,
        }
    }

    /// Recover a row from the tag embedded in a generated name
    pub fn from_name(name: &str) -> Option<RowTier> {
        RowTier::ALL
            .into_iter()
            .find(|row| name.contains(&format!("_{}_", row.tag())))
    }
}

/// One point-proxy driver, tagged with its row at creation time so the
/// role never has to be re-derived from the name
#[derive(Debug, Clone)]
pub struct ProxyHandle {
    /// Proxy node name, `{rig}_Lattice_{row}_{NN}_Proxy`
    pub name: String,
    pub row: RowTier,
    /// 1-based, row-local, row-major index
    pub index: usize,
    /// Leaf control the proxy ends up parented under
    pub leaf: Option<String>,
}

/// Conventional collaborator nodes the build looks for in the document
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Master visibility switch node; when present it gets a
    /// `{rig}_LatticeVis` toggle driving the base offset group
    pub vis_switch: String,
    /// Top-level utility group the lattice util group is filed under
    pub utility_group: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            vis_switch: "Control_Ctrl".to_string(),
            utility_group: "Utility_Grp".to_string(),
        }
    }
}

/// Everything a build created, plus non-fatal conditions it absorbed
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub rig_name: String,
    pub deformer: String,
    pub cage: String,
    pub base_node: String,
    pub util_group: String,
    pub base_ctl: String,
    pub base_ctl_offset: String,
    pub main_ctl: String,
    /// Row controls in build order (Upper, Mid, Lower)
    pub row_ctls: Vec<(RowTier, String)>,
    pub leaf_ctls: Vec<String>,
    pub proxies: Vec<ProxyHandle>,
    pub warnings: Vec<String>,
    /// Manual steps left to the user (missing conventional groups)
    pub follow_ups: Vec<String>,
}

/// Assembles the three-tier control hierarchy over a lattice deformer
pub struct HierarchyBuilder {
    options: BuildOptions,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

impl HierarchyBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Build the full control rig named `rig_name` over the current
    /// selection
    ///
    /// Aborts with [`RigError::EmptySelection`] before any document
    /// mutation when nothing is selected. Name collisions along the way
    /// are non-fatal: the colliding step is skipped, the pre-existing
    /// node is reused, and a warning lands in the report.
    pub fn build(&self, doc: &mut dyn SceneDocument, rig_name: &str) -> Result<BuildReport> {
        if doc.selection().is_empty() {
            warn!("please select one or more pieces of geometry before trying again");
            return Err(RigError::EmptySelection);
        }

        let mut warnings = Vec::new();
        let mut follow_ups = Vec::new();

        // lattice over the selection, renamed into the rig convention
        let handles = doc.create_lattice(DIVISIONS, true, OUTSIDE_FALLOFF)?;
        let deformer = {
            let name = naming::unique(doc, &format!("{rig_name}_Lattice_Node"));
            doc.rename(&handles.deformer, &name)?
        };
        let cage = {
            let name = naming::unique(doc, &format!("{rig_name}_Lattice_Cage"));
            doc.rename(&handles.cage, &name)?
        };
        let base_node = {
            let name = naming::unique(doc, &format!("{rig_name}_Lattice_Base"));
            doc.rename(&handles.base, &name)?
        };
        let util_group = {
            let name = naming::unique(doc, &format!("{rig_name}_Lattice_Util_Grp"));
            doc.group(&name, &[cage.clone(), base_node.clone()])?
        };

        // one proxy driver per cage point, row by row
        let mut proxies = Vec::with_capacity(27);
        for row in RowTier::ALL {
            for (i, (x, z)) in row_indices().enumerate() {
                let name = naming::unique(
                    doc,
                    &format!("{rig_name}_Lattice_{}_{:02}_Proxy", row.tag(), i + 1),
                );
                doc.create_point_proxy(&cage, (x, row.y_layer(), z), &name)?;
                proxies.push(ProxyHandle {
                    name,
                    row,
                    index: i + 1,
                    leaf: None,
                });
            }
        }

        // control sizing from the single-axis cage width
        let (bb_min, bb_max) = doc.bounding_box(&cage)?;
        let size = bb_max.x - bb_min.x;

        let row_centers = self.row_centers(doc, &cage)?;
        let mid_center = row_centers[1];

        // side and descriptor come from the rig name itself
        let side = rig_name
            .chars()
            .next()
            .map(|c| Side::parse_or_center(&c.to_string()))
            .unwrap_or_default();
        let stem = rig_name
            .char_indices()
            .nth(2)
            .map(|(i, _)| &rig_name[i..])
            .unwrap_or(rig_name);

        // master control, constrained to the lattice base so moving it
        // carries the whole deformation space
        let base_ctl = self.create_tier(
            doc,
            &mut warnings,
            ControlSpec {
                side: Some(side),
                translate: Some(mid_center),
                color: Some(ColorTag::GreyDark),
                shape: ShapeKind::Cube,
                size: size * 1.1,
                ..ControlSpec::new(format!("{stem}_Lattice_Base"))
            },
        )?;
        doc.parent_constrain(&base_ctl.name, &base_node, true)?;
        doc.scale_constrain(&base_ctl.name, &base_node, true)?;

        let main_ctl = self.create_tier(
            doc,
            &mut warnings,
            ControlSpec {
                side: Some(side),
                parent: Some(base_ctl.name.clone()),
                translate: Some(mid_center),
                shape: ShapeKind::Cube,
                size: size * 1.05,
                ..ControlSpec::new(format!("{stem}_Lattice_Main"))
            },
        )?;

        let mut row_ctls = Vec::with_capacity(3);
        for (row, center) in RowTier::ALL.into_iter().zip(row_centers) {
            let ctl = self.create_tier(
                doc,
                &mut warnings,
                ControlSpec {
                    side: Some(side),
                    parent: Some(main_ctl.name.clone()),
                    translate: Some(center),
                    shape: ShapeKind::Square,
                    size,
                    ..ControlSpec::new(format!("{stem}_{}", row.tag()))
                },
            )?;
            row_ctls.push((row, ctl));
        }

        // one leaf control per proxy, with the proxy hidden underneath
        let mut leaf_ctls = Vec::with_capacity(proxies.len());
        for proxy in proxies.iter_mut() {
            let row_ctl = row_ctls
                .iter()
                .find(|(row, _)| *row == proxy.row)
                .map(|(_, ctl)| ctl.name.clone())
                .ok_or_else(|| RigError::invalid_scene("row control missing"))?;

            // leaf identity comes from the tags carried on the handle,
            // never parsed back out of the proxy name
            let descriptor = format!(
                "{stem}_Lattice_{}_{:02}",
                proxy.row.tag(),
                proxy.index
            );

            let leaf = self.create_tier(
                doc,
                &mut warnings,
                ControlSpec {
                    side: Some(side),
                    parent: Some(row_ctl),
                    match_translate: Some(proxy.name.clone()),
                    lock_hide: vec![Channel::Rotate, Channel::Scale, Channel::Visibility],
                    shape: ShapeKind::Cube,
                    use_secondary: true,
                    size: size * 0.2,
                    ..ControlSpec::new(descriptor)
                },
            )?;
            doc.reparent(&proxy.name, Some(&leaf.name))?;
            doc.set_visibility(&proxy.name, false)?;
            proxy.leaf = Some(leaf.name.clone());
            leaf_ctls.push(leaf.name);
        }

        // authoring attributes on the master, wired to the deformer
        let outside = doc.add_enum_attr(
            &base_ctl.name,
            "outsideLattice",
            &["Inside".into(), "All".into(), "Falloff".into()],
        )?;
        doc.connect(&outside, &format!("{deformer}.outsideLattice"))?;
        let falloff = doc.add_float_attr(
            &base_ctl.name,
            "outsideFalloffDist",
            Some(0.0),
            None,
            0.0,
        )?;
        doc.connect(&falloff, &format!("{deformer}.outsideFalloffDist"))?;
        let envelope =
            doc.add_float_attr(&base_ctl.name, "envelope", Some(0.0), Some(1.0), 1.0)?;
        doc.connect(&envelope, &format!("{deformer}.envelope"))?;

        let base_ctl_offset = base_ctl
            .offset_name
            .clone()
            .unwrap_or_else(|| base_ctl.name.clone());

        // conventional collaborators, both optional
        if doc.exists(&self.options.vis_switch) {
            let vis = doc.add_enum_attr(
                &self.options.vis_switch,
                &format!("{rig_name}_LatticeVis"),
                &["Hide".into(), "Show".into()],
            )?;
            doc.connect(&vis, &format!("{base_ctl_offset}.v"))?;
        }
        if doc.exists(&self.options.utility_group) {
            doc.reparent(&util_group, Some(&self.options.utility_group))?;
        } else {
            let msg = format!(
                "standard rig template group \"{}\" is not present; parent {} manually",
                self.options.utility_group, util_group
            );
            info!("{msg}");
            follow_ups.push(msg);
        }

        Ok(BuildReport {
            rig_name: rig_name.to_string(),
            deformer,
            cage,
            base_node,
            util_group,
            base_ctl: base_ctl.name,
            base_ctl_offset,
            main_ctl: main_ctl.name,
            row_ctls: row_ctls
                .into_iter()
                .map(|(row, ctl)| (row, ctl.name))
                .collect(),
            leaf_ctls,
            proxies,
            warnings,
            follow_ups,
        })
    }

    /// World-space centroid of each row's nine points, in build order
    fn row_centers(&self, doc: &dyn SceneDocument, cage: &str) -> Result<[Vec3; 3]> {
        let mut centers = [Vec3::ZERO; 3];
        for (slot, row) in RowTier::ALL.into_iter().enumerate() {
            let mut points = Vec::with_capacity(9);
            for (x, z) in row_indices() {
                points.push(doc.lattice_point(cage, x, row.y_layer(), z)?);
            }
            centers[slot] = centroid(&points)?;
        }
        Ok(centers)
    }

    fn create_tier(
        &self,
        doc: &mut dyn SceneDocument,
        warnings: &mut Vec<String>,
        spec: ControlSpec,
    ) -> Result<ControlEntity> {
        let ctl = ControlEntity::create(doc, &spec)?;
        if ctl.reused {
            warnings.push(format!("\"{}\" already exists, skipped", ctl.name));
        }
        Ok(ctl)
    }
}

/// Row-major (x outer, z inner) traversal of one 3x3 row slice
fn row_indices() -> impl Iterator<Item = (usize, usize)> {
    (0..DIVISIONS.0).flat_map(|x| (0..DIVISIONS.2).map(move |z| (x, z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_tags() {
        assert_eq!(RowTier::Upper.tag(), "Upr");
        assert_eq!(RowTier::Mid.tag(), "Mid");
        assert_eq!(RowTier::Lower.tag(), "Lwr");
    }

    #[test]
    fn test_row_layers_top_down() {
        assert_eq!(RowTier::Upper.y_layer(), 2);
        assert_eq!(RowTier::Mid.y_layer(), 1);
        assert_eq!(RowTier::Lower.y_layer(), 0);
    }

    #[test]
    fn test_row_from_name() {
        assert_eq!(
            RowTier::from_name("C_Body_Lattice_Upr_04_Proxy"),
            Some(RowTier::Upper)
        );
        assert_eq!(
            RowTier::from_name("C_Body_Lattice_Lwr_09_Ctrl"),
            Some(RowTier::Lower)
        );
        assert_eq!(RowTier::from_name("C_Body_Lattice_Base_Ctrl"), None);
    }

    #[test]
    fn test_row_indices_are_row_major() {
        let order: Vec<(usize, usize)> = row_indices().collect();
        assert_eq!(order.len(), 9);
        assert_eq!(order[0], (0, 0));
        assert_eq!(order[1], (0, 1));
        assert_eq!(order[3], (1, 0));
        assert_eq!(order[8], (2, 2));
    }

    #[test]
    fn test_default_options_name_conventional_nodes() {
        let opts = BuildOptions::default();
        assert_eq!(opts.vis_switch, "Control_Ctrl");
        assert_eq!(opts.utility_group, "Utility_Grp");
    }
}
