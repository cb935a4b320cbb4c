//! Board features used as placement outcomes
//!
//! The basic vector is ordered `[lines_cleared, holes, bumpiness, total_height]`.
//! The advanced vector appends
//! `[max_height, min_height, height_variance, complete_rows, weighted_holes, wells]`.

use crate::types::{ADVANCED_FEATURE_DIM, FEATURE_DIM};

/// Names of the feature vector entries, in order
pub const FEATURE_NAMES: [&str; FEATURE_DIM] =
    ["lines_cleared", "holes", "bumpiness", "total_height"];

/// Names of the advanced feature vector entries, in order
pub const ADVANCED_FEATURE_NAMES: [&str; ADVANCED_FEATURE_DIM] = [
    "lines_cleared",
    "holes",
    "bumpiness",
    "total_height",
    "max_height",
    "min_height",
    "height_variance",
    "complete_rows",
    "weighted_holes",
    "wells",
];

/// Outcome features of a board after a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoardFeatures {
    pub lines_cleared: u32,
    pub holes: u32,
    pub bumpiness: u32,
    pub total_height: u32,
}

impl BoardFeatures {
    pub fn to_array(&self) -> [f32; FEATURE_DIM] {
        [
            self.lines_cleared as f32,
            self.holes as f32,
            self.bumpiness as f32,
            self.total_height as f32,
        ]
    }

    /// Feature vector scaled into `[0, 1]` by `scale`, clipping outliers
    pub fn normalized(&self, scale: &FeatureScale) -> [f32; FEATURE_DIM] {
        let raw = self.to_array();
        let max = scale.to_array();
        let mut out = [0.0f32; FEATURE_DIM];
        for i in 0..FEATURE_DIM {
            let denom = if max[i] == 0.0 { 1.0 } else { max[i] };
            out[i] = (raw[i] / denom).clamp(0.0, 1.0);
        }
        out
    }
}

/// Basic features plus height statistics, depth-weighted holes, and wells
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdvancedFeatures {
    pub basic: BoardFeatures,
    pub max_height: u32,
    pub min_height: u32,
    /// Population variance of the column heights
    pub height_variance: f32,
    pub complete_rows: u32,
    /// Holes weighted by `(row + 1) / height`, so deeper holes count more
    pub weighted_holes: f32,
    /// Columns lower than both neighbours; the walls count as higher
    pub wells: u32,
}

impl AdvancedFeatures {
    pub fn to_array(&self) -> [f32; ADVANCED_FEATURE_DIM] {
        let [lines, holes, bumpiness, total] = self.basic.to_array();
        [
            lines,
            holes,
            bumpiness,
            total,
            self.max_height as f32,
            self.min_height as f32,
            self.height_variance,
            self.complete_rows as f32,
            self.weighted_holes,
            self.wells as f32,
        ]
    }

    /// Like [`AdvancedFeatures::to_array`], with the four basic entries scaled by `scale`
    pub fn normalized(&self, scale: &FeatureScale) -> [f32; ADVANCED_FEATURE_DIM] {
        let mut out = self.to_array();
        out[..FEATURE_DIM].copy_from_slice(&self.basic.normalized(scale));
        out
    }
}

/// Per-feature maxima used by [`BoardFeatures::normalized`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureScale {
    pub max_lines: f32,
    pub max_holes: f32,
    pub max_bumpiness: f32,
    pub max_height: f32,
}

impl FeatureScale {
    fn to_array(self) -> [f32; FEATURE_DIM] {
        [
            self.max_lines,
            self.max_holes,
            self.max_bumpiness,
            self.max_height,
        ]
    }
}

impl Default for FeatureScale {
    fn default() -> Self {
        Self {
            max_lines: 4.0,
            max_holes: 200.0,
            max_bumpiness: 200.0,
            max_height: 200.0,
        }
    }
}
