//! Identity strings for rig nodes
//!
//! Every node this crate creates is named `{side}_{descriptor}_{suffix}`
//! (side omitted when absent). Uniqueness is resolved against a live
//! document handle rather than any ambient state, so collision handling
//! is testable in isolation.

use crate::core::color::Side;
use crate::core::document::SceneDocument;
use lazy_static::lazy_static;
use regex::Regex;

/// Default control suffix
pub const CONTROL_SUFFIX: &str = "Ctrl";

/// Default offset-group name tail, appended as `{name}_Offset_Grp`
pub const OFFSET_SUFFIX: &str = "Offset_Grp";

lazy_static! {
    /// `{side}_{descriptor}_{suffix}` with the side token optional.
    /// Descriptor is greedy; the suffix is the final underscore-free token.
    static ref NAME_RE: Regex =
        Regex::new(r"^(?:([LCR])_)?(.+)_([A-Za-z0-9]+)$").expect("static pattern");
}

/// A generated name split back into its semantic parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub side: Option<Side>,
    pub descriptor: String,
    pub suffix: String,
}

/// Compose a name from its parts: `{side}_{descriptor}_{suffix}`, or
/// `{descriptor}_{suffix}` when no side is given.
pub fn build_name(side: Option<Side>, descriptor: &str, suffix: &str) -> String {
    match side {
        Some(s) => format!("{}_{}_{}", s.token(), descriptor, suffix),
        None => format!("{descriptor}_{suffix}"),
    }
}

/// Parse a generated name back into side, descriptor and suffix
///
/// Returns `None` for strings with fewer than two tokens, which cannot
/// have come out of [`build_name`].
pub fn parse(name: &str) -> Option<ParsedName> {
    let caps = NAME_RE.captures(name)?;
    let side = caps.get(1).and_then(|m| Side::parse(m.as_str()));
    Some(ParsedName {
        side,
        descriptor: caps[2].to_string(),
        suffix: caps[3].to_string(),
    })
}

/// Resolve `candidate` to a name not present in the document
///
/// Applies a deterministic numeric counter: `name`, `name1`, `name2`, ...
pub fn unique(doc: &dyn SceneDocument, candidate: &str) -> String {
    if !doc.exists(candidate) {
        return candidate.to_string();
    }
    let mut counter = 1u32;
    loop {
        let attempt = format!("{candidate}{counter}");
        if !doc.exists(&attempt) {
            return attempt;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::MockSceneDocument;

    #[test]
    fn test_build_name_with_side() {
        assert_eq!(
            build_name(Some(Side::Center), "Body_Lattice_Base", "Ctrl"),
            "C_Body_Lattice_Base_Ctrl"
        );
        assert_eq!(build_name(Some(Side::Left), "Arm", "Ctrl"), "L_Arm_Ctrl");
        assert_eq!(build_name(Some(Side::Right), "Arm", "Ofs"), "R_Arm_Ofs");
    }

    #[test]
    fn test_build_name_without_side() {
        assert_eq!(build_name(None, "Body", "Ctrl"), "Body_Ctrl");
    }

    #[test]
    fn test_round_trip_all_sides() {
        for side in [
            None,
            Some(Side::Left),
            Some(Side::Center),
            Some(Side::Right),
        ] {
            let name = build_name(side, "Body_Lattice_Upr_01", "Ctrl");
            let parsed = parse(&name).unwrap();
            assert_eq!(parsed.side, side);
            assert_eq!(parsed.descriptor, "Body_Lattice_Upr_01");
            assert_eq!(parsed.suffix, "Ctrl");
        }
    }

    #[test]
    fn test_parse_rejects_single_token() {
        assert!(parse("Body").is_none());
    }

    #[test]
    fn test_parse_side_is_optional() {
        let parsed = parse("Spine_Main_Ctrl").unwrap();
        assert_eq!(parsed.side, None);
        assert_eq!(parsed.descriptor, "Spine_Main");
    }

    #[test]
    fn test_unique_passthrough_when_free() {
        let mut doc = MockSceneDocument::new();
        doc.expect_exists().return_const(false);
        assert_eq!(unique(&doc, "C_Body_Ctrl"), "C_Body_Ctrl");
    }

    #[test]
    fn test_unique_counts_deterministically() {
        let mut doc = MockSceneDocument::new();
        doc.expect_exists()
            .returning(|name| matches!(name, "C_Body_Ctrl" | "C_Body_Ctrl1" | "C_Body_Ctrl2"));
        assert_eq!(unique(&doc, "C_Body_Ctrl"), "C_Body_Ctrl3");
    }
}
