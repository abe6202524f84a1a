use crate::model::Thickness;
use serde::{Deserialize, Serialize};

/// Packing configuration.
///
/// Key notes:
///   - `margin` is expressed in the caller's (top, right, bottom, left) order
///   - `collapse_margin` lets adjacent margins overlap by the lesser value;
///     it only ever reduces spacing between pieces, never increases it
///   - `parallel` affects strategy evaluation when the `parallel` feature is on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Padding around each piece.
    #[serde(default)]
    pub margin: Thickness,
    /// Adjacent margins overlap by the lesser value.
    #[serde(default)]
    pub collapse_margin: bool,
    /// Widen the container, before packing, to fit the widest margin-expanded piece.
    #[serde(default = "default_auto_size")]
    pub enable_auto_size: bool,
    /// Round final container dimensions up to powers of two.
    #[serde(default)]
    pub force_pow2: bool,
    /// Flip the vertical axis when compositing and exporting placements.
    #[serde(default = "default_flip_vertical")]
    pub flip_vertical: bool,
    /// Background color (RGBA) for composited pages.
    #[serde(default = "default_background")]
    pub background: [u8; 4],
    /// Evaluate orderings in parallel when feature "parallel" is on and the
    /// piece count reaches the dispatch threshold.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            margin: Thickness::default(),
            collapse_margin: false,
            enable_auto_size: default_auto_size(),
            force_pow2: false,
            flip_vertical: default_flip_vertical(),
            background: default_background(),
            parallel: default_parallel(),
        }
    }
}

fn default_auto_size() -> bool {
    true
}
fn default_flip_vertical() -> bool {
    true
}
fn default_background() -> [u8; 4] {
    [0, 0, 0, 255]
}
fn default_parallel() -> bool {
    true
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn margin(mut self, v: Thickness) -> Self {
        self.cfg.margin = v;
        self
    }
    pub fn collapse_margin(mut self, v: bool) -> Self {
        self.cfg.collapse_margin = v;
        self
    }
    pub fn auto_size(mut self, v: bool) -> Self {
        self.cfg.enable_auto_size = v;
        self
    }
    pub fn pow2(mut self, v: bool) -> Self {
        self.cfg.force_pow2 = v;
        self
    }
    pub fn flip_vertical(mut self, v: bool) -> Self {
        self.cfg.flip_vertical = v;
        self
    }
    pub fn background(mut self, v: [u8; 4]) -> Self {
        self.cfg.background = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}

impl PackerConfig {
    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}
