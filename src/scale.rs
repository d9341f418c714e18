//! Shade scale labels and the virtual white/black index mapping.

use serde::{Deserialize, Serialize};

/// Label of conceptual pure white on the 0-1000 shade numbering.
pub const WHITE_LABEL: f32 = 0.0;

/// Label of conceptual pure black on the 0-1000 shade numbering.
pub const BLACK_LABEL: f32 = 1000.0;

/// Standard Material-UI shade steps.
pub const MUI_LABELS: [u32; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

/// Ordered shade labels, lightest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadeScale {
    labels: Vec<u32>,
}

impl Default for ShadeScale {
    fn default() -> Self {
        Self {
            labels: MUI_LABELS.to_vec(),
        }
    }
}

impl ShadeScale {
    /// Build a scale from labels.
    ///
    /// Returns `None` when the labels are empty or not strictly increasing.
    pub fn new(labels: Vec<u32>) -> Option<Self> {
        if labels.is_empty() || labels.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }
        Some(Self { labels })
    }

    /// `count` labels spaced 100 apart (100, 200, ...).
    pub fn evenly_spaced(count: usize) -> Self {
        Self {
            labels: (1..=count as u32).map(|i| i * 100).collect(),
        }
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Index of the last shade.
    pub fn last_index(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    /// Ramp position of a label, if it is part of the scale.
    pub fn index_of(&self, label: u32) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    fn span(&self) -> Option<(f32, f32)> {
        let min = *self.labels.first()? as f32;
        let max = *self.labels.last()? as f32;
        (max > min).then_some((min, max))
    }

    /// Map a label on the 0-1000 numbering onto (fractional) index space.
    fn virtual_index(&self, label: f32, fallback: f32) -> f32 {
        match self.span() {
            Some((min, max)) => (label - min) / (max - min) * self.last_index() as f32,
            None => fallback,
        }
    }

    /// Virtual index where pure white (label 0) would sit.
    ///
    /// For the standard 50..900 scale this is slightly left of index 0.
    /// Single-label scales put it one step before the first shade.
    pub fn white_index(&self) -> f32 {
        self.virtual_index(WHITE_LABEL, -1.0)
    }

    /// Virtual index where pure black (label 1000) would sit.
    pub fn black_index(&self) -> f32 {
        self.virtual_index(BLACK_LABEL, self.len() as f32)
    }

    /// Every shade index as an evaluation target.
    pub fn targets(&self) -> Vec<f32> {
        (0..self.len()).map(|i| i as f32).collect()
    }
}
