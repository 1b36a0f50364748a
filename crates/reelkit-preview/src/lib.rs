//! ReelKit Preview - Overlay compositing for the media preview
//!
//! Projects timeline state onto the preview surface:
//! - Which text/image segments are active at the playhead
//! - Where each overlay is anchored on the container
//! - Drag-to-reposition for the selected overlay

pub mod anchor;
pub mod compositor;

pub use anchor::{resolve_placement, ResolvedAnchor, PRESET_INSET};
pub use compositor::{FrameSubscription, OverlayCompositor};
