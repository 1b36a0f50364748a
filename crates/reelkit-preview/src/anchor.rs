//! Overlay anchor resolution.
//!
//! Overlay coordinates are percent of the preview container on both
//! axes. Custom coordinates position the element's center directly;
//! named presets pin one of nine alignment points near the container
//! edges with a fixed inset, or dead center.

use glam::DVec2;

use reelkit_timeline::{AnchorPreset, Placement};

/// Inset from the container edges for non-center presets, percent.
pub const PRESET_INSET: f64 = 4.0;

/// A placement resolved to concrete container coordinates.
///
/// `point` is where `align` of the element sits: for `Custom` the
/// element is centered on the point, for a preset the matching corner or
/// edge midpoint of the element is pinned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAnchor {
    /// Anchor point in percent-of-container coordinates.
    pub point: DVec2,
    /// Which part of the element is pinned to the point.
    pub align: AnchorPreset,
}

/// Resolve a placement to container coordinates.
///
/// Custom coordinates take precedence over any preset and use a
/// centered anchor.
pub fn resolve_placement(placement: Placement) -> ResolvedAnchor {
    match placement {
        Placement::Custom { x, y } => ResolvedAnchor {
            point: DVec2::new(x, y),
            align: AnchorPreset::Center,
        },
        Placement::Preset { anchor } => ResolvedAnchor {
            point: preset_point(anchor),
            align: anchor,
        },
    }
}

fn preset_point(anchor: AnchorPreset) -> DVec2 {
    let near = PRESET_INSET;
    let far = 100.0 - PRESET_INSET;
    let mid = 50.0;
    match anchor {
        AnchorPreset::TopLeft => DVec2::new(near, near),
        AnchorPreset::TopCenter => DVec2::new(mid, near),
        AnchorPreset::TopRight => DVec2::new(far, near),
        AnchorPreset::MiddleLeft => DVec2::new(near, mid),
        AnchorPreset::Center => DVec2::new(mid, mid),
        AnchorPreset::MiddleRight => DVec2::new(far, mid),
        AnchorPreset::BottomLeft => DVec2::new(near, far),
        AnchorPreset::BottomCenter => DVec2::new(mid, far),
        AnchorPreset::BottomRight => DVec2::new(far, far),
    }
}
