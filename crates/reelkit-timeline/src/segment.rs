//! Segment types for the timeline.
//!
//! Positions and sizes live in percent-space: a segment's `start` and
//! `width` are fractions (0-100) of the total project duration. Content
//! is a tagged union keyed by the segment kind, so kind-specific fields
//! cannot appear on the wrong segment.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum visible segment width after a resize, in percent.
pub const MIN_SEGMENT_WIDTH: f64 = 5.0;

/// Kind of segment; doubles as the track a segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Video,
    Audio,
    Text,
    Image,
}

impl SegmentKind {
    /// All kinds in track display order.
    pub const ALL: [SegmentKind; 4] = [Self::Video, Self::Audio, Self::Text, Self::Image];

    /// Only video and audio segments can be split or merged.
    pub fn is_splittable(self) -> bool {
        matches!(self, Self::Video | Self::Audio)
    }

    /// Text and image segments render as overlays on the preview.
    pub fn is_overlay(self) -> bool {
        matches!(self, Self::Text | Self::Image)
    }

    /// Stable id of the track holding this kind.
    pub fn track_id(self) -> &'static str {
        match self {
            Self::Video => "video-1",
            Self::Audio => "audio-1",
            Self::Text => "text-1",
            Self::Image => "image-1",
        }
    }

    /// Display name of the track holding this kind.
    pub fn track_name(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Text => "Text",
            Self::Image => "Image",
        }
    }
}

/// Named overlay anchor positions: four corners, four edge midpoints,
/// and the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPreset {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Where an overlay sits on the preview.
///
/// Custom coordinates (percent of the overlay container, centered anchor)
/// take precedence over a named preset; dragging an overlay always ends
/// in `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Placement {
    Preset { anchor: AnchorPreset },
    Custom { x: f64, y: f64 },
}

impl Placement {
    pub fn preset(anchor: AnchorPreset) -> Self {
        Self::Preset { anchor }
    }

    pub fn custom(x: f64, y: f64) -> Self {
        Self::Custom { x, y }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::Preset {
            anchor: AnchorPreset::Center,
        }
    }
}

/// Kind-specific segment payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SegmentContent {
    Video {
        /// Media source URL or path.
        source: String,
        thumbnail: Option<String>,
    },
    Audio {
        /// Volume, 0-100.
        volume: f64,
        /// Fade durations in seconds.
        fade_in: f64,
        fade_out: f64,
    },
    Text {
        text: String,
        font_size: f32,
        font_family: String,
        text_color: String,
        bg_color: String,
        placement: Placement,
    },
    Image {
        source: String,
        /// Rendered width, percent of the container.
        size: f64,
        /// Opacity, 0-100.
        opacity: f64,
        placement: Placement,
    },
}

impl SegmentContent {
    pub fn video(source: impl Into<String>) -> Self {
        Self::Video {
            source: source.into(),
            thumbnail: None,
        }
    }

    pub fn audio() -> Self {
        Self::Audio {
            volume: 100.0,
            fade_in: 0.0,
            fade_out: 0.0,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            font_size: 16.0,
            font_family: "Inter".into(),
            text_color: "#FFFFFF".into(),
            bg_color: "transparent".into(),
            placement: Placement::default(),
        }
    }

    pub fn image(source: impl Into<String>) -> Self {
        Self::Image {
            source: source.into(),
            size: 40.0,
            opacity: 100.0,
            placement: Placement::default(),
        }
    }

    /// The segment kind this content belongs to.
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Video { .. } => SegmentKind::Video,
            Self::Audio { .. } => SegmentKind::Audio,
            Self::Text { .. } => SegmentKind::Text,
            Self::Image { .. } => SegmentKind::Image,
        }
    }

    /// Overlay placement, if this content renders as an overlay.
    pub fn placement(&self) -> Option<Placement> {
        match self {
            Self::Text { placement, .. } | Self::Image { placement, .. } => Some(*placement),
            _ => None,
        }
    }

    /// Set the overlay placement. Returns false for non-overlay content.
    pub fn set_placement(&mut self, new: Placement) -> bool {
        match self {
            Self::Text { placement, .. } | Self::Image { placement, .. } => {
                *placement = new;
                true
            }
            _ => false,
        }
    }

    /// Merge a patch into this content, non-destructively.
    ///
    /// Fields absent from the patch are preserved. A patch whose variant
    /// does not match this content is ignored; returns whether anything
    /// was applied.
    pub fn apply(&mut self, patch: ContentPatch) -> bool {
        match (self, patch) {
            (
                Self::Video { source, thumbnail },
                ContentPatch::Video {
                    source: new_source,
                    thumbnail: new_thumbnail,
                },
            ) => {
                if let Some(s) = new_source {
                    *source = s;
                }
                if let Some(t) = new_thumbnail {
                    *thumbnail = Some(t);
                }
                true
            }
            (
                Self::Audio {
                    volume,
                    fade_in,
                    fade_out,
                },
                ContentPatch::Audio {
                    volume: new_volume,
                    fade_in: new_fade_in,
                    fade_out: new_fade_out,
                },
            ) => {
                if let Some(v) = new_volume {
                    *volume = v;
                }
                if let Some(f) = new_fade_in {
                    *fade_in = f;
                }
                if let Some(f) = new_fade_out {
                    *fade_out = f;
                }
                true
            }
            (
                Self::Text {
                    text,
                    font_size,
                    font_family,
                    text_color,
                    bg_color,
                    placement,
                },
                ContentPatch::Text {
                    text: new_text,
                    font_size: new_font_size,
                    font_family: new_font_family,
                    text_color: new_text_color,
                    bg_color: new_bg_color,
                    placement: new_placement,
                },
            ) => {
                if let Some(t) = new_text {
                    *text = t;
                }
                if let Some(s) = new_font_size {
                    *font_size = s;
                }
                if let Some(f) = new_font_family {
                    *font_family = f;
                }
                if let Some(c) = new_text_color {
                    *text_color = c;
                }
                if let Some(c) = new_bg_color {
                    *bg_color = c;
                }
                if let Some(p) = new_placement {
                    *placement = p;
                }
                true
            }
            (
                Self::Image {
                    source,
                    size,
                    opacity,
                    placement,
                },
                ContentPatch::Image {
                    source: new_source,
                    size: new_size,
                    opacity: new_opacity,
                    placement: new_placement,
                },
            ) => {
                if let Some(s) = new_source {
                    *source = s;
                }
                if let Some(s) = new_size {
                    *size = s;
                }
                if let Some(o) = new_opacity {
                    *opacity = o;
                }
                if let Some(p) = new_placement {
                    *placement = p;
                }
                true
            }
            _ => false,
        }
    }
}

/// Partial content update from the property-editor collaborator.
///
/// Every field is optional; only present fields overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentPatch {
    Video {
        source: Option<String>,
        thumbnail: Option<String>,
    },
    Audio {
        volume: Option<f64>,
        fade_in: Option<f64>,
        fade_out: Option<f64>,
    },
    Text {
        text: Option<String>,
        font_size: Option<f32>,
        font_family: Option<String>,
        text_color: Option<String>,
        bg_color: Option<String>,
        placement: Option<Placement>,
    },
    Image {
        source: Option<String>,
        size: Option<f64>,
        opacity: Option<f64>,
        placement: Option<Placement>,
    },
}

/// A segment on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique segment ID
    pub id: Uuid,
    /// Segment name (displayed in UI)
    pub name: String,
    /// Segment kind; fixes the track this segment lives on
    pub kind: SegmentKind,
    /// Start position, percent of total duration
    pub start: f64,
    /// Width, percent of total duration
    pub width: f64,
    /// Kind-specific payload
    pub content: SegmentContent,
    /// Source trim in point, seconds
    pub trim_start: Option<f64>,
    /// Source trim out point, seconds
    pub trim_end: Option<f64>,
    /// Source duration, seconds
    pub duration: Option<f64>,
}

impl Segment {
    /// Create a new segment; the kind is taken from the content.
    pub fn new(name: impl Into<String>, start: f64, width: f64, content: SegmentContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: content.kind(),
            start,
            width,
            content,
            trim_start: None,
            trim_end: None,
            duration: None,
        }
    }

    /// End position in percent-space.
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    /// Whether a percent-space position falls inside this segment.
    ///
    /// Half-open: the start boundary is inside, the end boundary is not.
    pub fn contains(&self, percent: f64) -> bool {
        percent >= self.start && percent < self.end()
    }

    /// The name with any `" (part N)"` / `" (merged)"` suffix stripped.
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }
}

/// Strip split/merge suffixes from a segment name.
pub fn base_name(name: &str) -> &str {
    for marker in [" (part ", " (merged)"] {
        if let Some(idx) = name.find(marker) {
            return &name[..idx];
        }
    }
    name
}
