//! JSON configuration and report helpers for distance map runs.

use std::fs;
use std::path::{Path, PathBuf};

use distmap_chamfer::{ChamferPreset, ChamferWeights, DistanceMap, DistanceMapParams};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum DistmapIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration of a single distance map run.
///
/// `preset`, when set, replaces `params.weights`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceMapConfig {
    #[serde(default)]
    pub input_path: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub report_path: Option<String>,
    #[serde(default)]
    pub preset: Option<ChamferPreset>,
    #[serde(default)]
    pub params: DistanceMapParams,
}

impl DistanceMapConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DistmapIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DistmapIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Effective parameters after applying `preset`.
    pub fn build_params(&self) -> DistanceMapParams {
        let mut params = self.params;
        if let Some(preset) = self.preset {
            params.weights = preset.weights();
        }
        params
    }

    /// Output raster path; defaults to `<input stem>_distmap.png` next to the input.
    pub fn output_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.output_path {
            return Some(PathBuf::from(path));
        }
        let input = Path::new(self.input_path.as_deref()?);
        let stem = input.file_stem()?.to_string_lossy();
        Some(input.with_file_name(format!("{stem}_distmap.png")))
    }
}

/// Summary of a computed map, written next to the output raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMapReport {
    #[serde(default)]
    pub input_path: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    pub width: usize,
    pub height: usize,
    pub weights: ChamferWeights,
    pub normalized: bool,
    pub foreground_label: u8,
    /// Upper bound of the display range `[0, max_distance]`.
    pub max_distance: u16,
    pub unreachable: usize,
}

impl DistanceMapReport {
    pub fn new(map: &DistanceMap, params: &DistanceMapParams) -> Self {
        Self {
            input_path: None,
            output_path: None,
            width: map.width(),
            height: map.height(),
            weights: map.weights,
            normalized: map.normalized,
            foreground_label: params.foreground_label,
            max_distance: map.max_distance,
            unreachable: map.unreachable,
        }
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DistmapIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DistmapIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_overrides_params_weights() {
        let cfg: DistanceMapConfig = serde_json::from_str(
            r#"{
                "input_path": "masks/cells.png",
                "preset": "chessboard",
                "params": { "weights": { "orthogonal": 5, "diagonal": 7 }, "normalize": false }
            }"#,
        )
        .expect("parse");
        let params = cfg.build_params();
        assert_eq!(params.weights, ChamferWeights::CHESSBOARD);
        assert!(!params.normalize);
        assert_eq!(params.foreground_label, 255);
    }

    #[test]
    fn output_path_defaults_next_to_input() {
        let cfg = DistanceMapConfig {
            input_path: Some("masks/cells.png".into()),
            ..DistanceMapConfig::default()
        };
        assert_eq!(
            cfg.output_path(),
            Some(PathBuf::from("masks/cells_distmap.png"))
        );
        assert_eq!(DistanceMapConfig::default().output_path(), None);
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cfg.json");
        let cfg = DistanceMapConfig {
            input_path: Some("a.png".into()),
            output_path: Some("b.png".into()),
            report_path: None,
            preset: Some(ChamferPreset::QuasiEuclidean),
            params: DistanceMapParams::new(ChamferWeights::BORGEFORS, false),
        };
        cfg.write_json(&path).expect("write");
        assert_eq!(DistanceMapConfig::load_json(&path).expect("load"), cfg);
    }
}
