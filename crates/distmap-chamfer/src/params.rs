use serde::{Deserialize, Serialize};

use crate::{ChamferWeights, DEFAULT_FOREGROUND_LABEL};

fn default_normalize() -> bool {
    true
}

fn default_foreground_label() -> u8 {
    DEFAULT_FOREGROUND_LABEL
}

/// Configuration of a chamfer distance map computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMapParams {
    /// Orthogonal and diagonal step costs.
    #[serde(default)]
    pub weights: ChamferWeights,
    /// Divide the final map by `weights.orthogonal`.
    ///
    /// Values then approximate distances in pixels, rounded down.
    #[serde(default = "default_normalize")]
    pub normalize: bool,
    /// Mask value treated as foreground.
    #[serde(default = "default_foreground_label")]
    pub foreground_label: u8,
}

impl Default for DistanceMapParams {
    fn default() -> Self {
        Self {
            weights: ChamferWeights::default(),
            normalize: default_normalize(),
            foreground_label: default_foreground_label(),
        }
    }
}

impl DistanceMapParams {
    pub fn new(weights: ChamferWeights, normalize: bool) -> Self {
        Self {
            weights,
            normalize,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let params: DistanceMapParams = serde_json::from_str("{}").expect("parse");
        assert_eq!(params, DistanceMapParams::default());
        assert_eq!(params.weights, ChamferWeights::BORGEFORS);
        assert!(params.normalize);
        assert_eq!(params.foreground_label, 255);

        let params: DistanceMapParams = serde_json::from_str(
            r#"{"weights":{"orthogonal":5,"diagonal":7},"normalize":false,"foreground_label":1}"#,
        )
        .expect("parse");
        assert_eq!(params.weights, ChamferWeights::WEIGHTS_57);
        assert!(!params.normalize);
        assert_eq!(params.foreground_label, 1);
    }
}
