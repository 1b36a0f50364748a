//! Project serialization with versioning and migration.
//!
//! Uses JSON with a schema version field for forward-compatible
//! persistence. The payload is the flattened segment list plus project
//! metadata, matching what the persistence collaborator consumes.

use serde::{Deserialize, Serialize};

use reelkit_core::{EditError, Result};

use crate::model::TimelineModel;
use crate::segment::Segment;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Snapshot of a project: metadata plus the flattened segment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    /// Project name
    pub name: String,
    /// Total duration in seconds
    pub duration_secs: f64,
    /// Playhead position in percent-space
    pub playhead: f64,
    /// Flattened segments across all tracks
    pub segments: Vec<Segment>,
}

impl ProjectData {
    /// Capture a snapshot of a model.
    pub fn capture(name: impl Into<String>, model: &TimelineModel, playhead: f64) -> Self {
        Self {
            name: name.into(),
            duration_secs: model.total_duration_secs(),
            playhead,
            segments: model.flattened_segments(),
        }
    }

    /// Rebuild the timeline model from this snapshot.
    pub fn restore(&self) -> TimelineModel {
        TimelineModel::from_segments(self.duration_secs, self.segments.clone())
    }
}

/// Versioned project file wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Schema version for migration.
    pub version: u32,
    /// The project data.
    pub project: ProjectData,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl ProjectFile {
    /// Create a new project file from a snapshot.
    pub fn new(project: ProjectData) -> Self {
        Self {
            version: CURRENT_VERSION,
            project,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| EditError::Serialization(format!("failed to serialize project: {e}")))
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| EditError::Serialization(format!("invalid JSON: {e}")))?;

        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0) as u32;
        if version > CURRENT_VERSION {
            return Err(EditError::Serialization(format!(
                "project file version {version} is newer than supported version {CURRENT_VERSION}"
            )));
        }

        let migrated = migrate(raw, version)?;
        serde_json::from_value(migrated)
            .map_err(|e| EditError::Serialization(format!("failed to parse project: {e}")))
    }

    /// Save project to a file path.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load project from a file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Apply sequential migrations from `from_version` to [`CURRENT_VERSION`].
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: bare ProjectData without the version wrapper.
                if data.get("version").is_none() {
                    data = serde_json::json!({
                        "version": 1,
                        "project": data,
                        "app_version": "0.1.0",
                    });
                }
                version = 1;
            }
            _ => {
                return Err(EditError::Serialization(format!(
                    "no migration path from version {version}"
                )));
            }
        }
    }

    Ok(data)
}
