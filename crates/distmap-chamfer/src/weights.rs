//! Chamfer step costs and the usual integer presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DistanceMapError;

/// Step costs of a 3x3 chamfer mask.
///
/// `orthogonal` is the cost of a horizontal or vertical move, `diagonal` the
/// cost of a diagonal move. Both must be strictly positive. By convention
/// `orthogonal <= diagonal`, but this is not enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChamferWeights {
    pub orthogonal: u16,
    pub diagonal: u16,
}

impl ChamferWeights {
    /// Chebyshev distance: every neighbor costs 1.
    pub const CHESSBOARD: Self = Self::raw(1, 1);
    /// Manhattan distance: diagonal moves cost two orthogonal steps.
    pub const CITY_BLOCK: Self = Self::raw(1, 2);
    /// Ten times the (1, sqrt 2) ratio, rounded.
    pub const QUASI_EUCLIDEAN: Self = Self::raw(10, 14);
    /// Borgefors (3, 4) weights.
    pub const BORGEFORS: Self = Self::raw(3, 4);
    pub const WEIGHTS_23: Self = Self::raw(2, 3);
    pub const WEIGHTS_57: Self = Self::raw(5, 7);

    const fn raw(orthogonal: u16, diagonal: u16) -> Self {
        Self {
            orthogonal,
            diagonal,
        }
    }

    /// Build a validated weight pair.
    pub fn new(orthogonal: u16, diagonal: u16) -> Result<Self, DistanceMapError> {
        let weights = Self::raw(orthogonal, diagonal);
        weights.validate()?;
        Ok(weights)
    }

    /// Build weights from a slice that must hold exactly two entries.
    pub fn from_slice(weights: &[u16]) -> Result<Self, DistanceMapError> {
        match *weights {
            [orthogonal, diagonal] => Self::new(orthogonal, diagonal),
            _ => Err(DistanceMapError::InvalidWeightCount { got: weights.len() }),
        }
    }

    /// Reject zero step costs.
    pub fn validate(&self) -> Result<(), DistanceMapError> {
        if self.orthogonal == 0 || self.diagonal == 0 {
            return Err(DistanceMapError::InvalidWeights {
                orthogonal: self.orthogonal,
                diagonal: self.diagonal,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn as_array(&self) -> [u16; 2] {
        [self.orthogonal, self.diagonal]
    }
}

impl Default for ChamferWeights {
    fn default() -> Self {
        Self::BORGEFORS
    }
}

impl fmt::Display for ChamferWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.orthogonal, self.diagonal)
    }
}

/// Accepts either a preset name (`borgefors`, `chessboard`, ...) or an
/// explicit `orthogonal,diagonal` pair such as `3,4`.
impl FromStr for ChamferWeights {
    type Err = DistanceMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(preset) = s.parse::<ChamferPreset>() {
            return Ok(preset.weights());
        }
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<u16>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| DistanceMapError::InvalidWeightSpec(s.to_string()))?;
        Self::from_slice(&values)
    }
}

impl From<ChamferPreset> for ChamferWeights {
    fn from(preset: ChamferPreset) -> Self {
        preset.weights()
    }
}

/// Named weight presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChamferPreset {
    Chessboard,
    CityBlock,
    QuasiEuclidean,
    #[default]
    Borgefors,
    #[serde(rename = "weights_23")]
    Weights23,
    #[serde(rename = "weights_57")]
    Weights57,
}

impl ChamferPreset {
    pub const ALL: [ChamferPreset; 6] = [
        ChamferPreset::Chessboard,
        ChamferPreset::CityBlock,
        ChamferPreset::QuasiEuclidean,
        ChamferPreset::Borgefors,
        ChamferPreset::Weights23,
        ChamferPreset::Weights57,
    ];

    pub fn weights(self) -> ChamferWeights {
        match self {
            ChamferPreset::Chessboard => ChamferWeights::CHESSBOARD,
            ChamferPreset::CityBlock => ChamferWeights::CITY_BLOCK,
            ChamferPreset::QuasiEuclidean => ChamferWeights::QUASI_EUCLIDEAN,
            ChamferPreset::Borgefors => ChamferWeights::BORGEFORS,
            ChamferPreset::Weights23 => ChamferWeights::WEIGHTS_23,
            ChamferPreset::Weights57 => ChamferWeights::WEIGHTS_57,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChamferPreset::Chessboard => "chessboard",
            ChamferPreset::CityBlock => "city_block",
            ChamferPreset::QuasiEuclidean => "quasi_euclidean",
            ChamferPreset::Borgefors => "borgefors",
            ChamferPreset::Weights23 => "weights_23",
            ChamferPreset::Weights57 => "weights_57",
        }
    }
}

impl fmt::Display for ChamferPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChamferPreset {
    type Err = DistanceMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        ChamferPreset::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| DistanceMapError::InvalidWeightSpec(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_weights_are_rejected() {
        assert!(matches!(
            ChamferWeights::new(0, 4),
            Err(DistanceMapError::InvalidWeights {
                orthogonal: 0,
                diagonal: 4
            })
        ));
        assert!(ChamferWeights::new(3, 0).is_err());
        assert!(ChamferWeights::new(3, 4).is_ok());
    }

    #[test]
    fn slice_must_hold_two_weights() {
        assert!(matches!(
            ChamferWeights::from_slice(&[3]),
            Err(DistanceMapError::InvalidWeightCount { got: 1 })
        ));
        assert!(matches!(
            ChamferWeights::from_slice(&[5, 7, 11]),
            Err(DistanceMapError::InvalidWeightCount { got: 3 })
        ));
        assert_eq!(
            ChamferWeights::from_slice(&[5, 7]).expect("pair"),
            ChamferWeights::WEIGHTS_57
        );
    }

    #[test]
    fn parses_presets_and_pairs() {
        assert_eq!(
            "borgefors".parse::<ChamferWeights>().expect("preset"),
            ChamferWeights::BORGEFORS
        );
        assert_eq!(
            "City-Block".parse::<ChamferWeights>().expect("preset"),
            ChamferWeights::CITY_BLOCK
        );
        assert_eq!(
            " 2, 3 ".parse::<ChamferWeights>().expect("pair"),
            ChamferWeights::WEIGHTS_23
        );
        assert!("3,x".parse::<ChamferWeights>().is_err());
        assert!("0,1".parse::<ChamferWeights>().is_err());
        assert!("euclid".parse::<ChamferPreset>().is_err());
    }

    #[test]
    fn preset_names_round_trip_through_serde() {
        for preset in ChamferPreset::ALL {
            let json = serde_json::to_string(&preset).expect("serialize");
            assert_eq!(json, format!("\"{}\"", preset.name()));
            let back: ChamferPreset = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, preset);
            assert_eq!(preset.name().parse::<ChamferPreset>().expect("parse"), preset);
        }
    }

    #[test]
    fn display_matches_pair_syntax() {
        let w = ChamferWeights::QUASI_EUCLIDEAN;
        assert_eq!(w.to_string(), "10,14");
        assert_eq!(w.to_string().parse::<ChamferWeights>().expect("parse"), w);
    }
}
