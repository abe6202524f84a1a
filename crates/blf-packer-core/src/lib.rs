//! Core library for packing rectangles into a texture atlas with the
//! bottom-left-fill heuristic.
//!
//! - Placement: frontier of stable points, lowest-then-leftmost anchor
//!   selection, margin-aware collision detection (optional margin collapsing)
//! - Solver: a fixed set of piece orderings (height / area / height-then-width,
//!   descending) scored by filling rate; optionally evaluated in parallel
//! - Pipeline: `pack_images` takes in-memory images and returns the layout
//!   plus a composited RGBA page; `pack_layout` is the layout-only entry point
//! - Data model is serde-serializable; a JSON manifest exporter is provided.
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use blf_packer_core::{InputImage, PackerConfig, pack_images};
//! # fn main() -> anyhow::Result<()> {
//! let img1 = ImageReader::open("a.png")?.decode()?;
//! let img2 = ImageReader::open("b.png")?.decode()?;
//! let inputs = vec![
//!   InputImage { key: "a".into(), image: img1 },
//!   InputImage { key: "b".into(), image: img2 },
//! ];
//! let cfg = PackerConfig::default();
//! let out = pack_images(inputs, 512, &cfg)?;
//! println!("{}x{}", out.layout.width, out.layout.height);
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod solver;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use pipeline::*;
pub use solver::*;

/// Convenience prelude for common types and functions.
/// Importing `blf_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackerConfig, PackerConfigBuilder};
    pub use crate::model::{AtlasLayout, Piece, Region, Size, Thickness};
    pub use crate::solver::{SortStrategy, solve};
    pub use crate::{InputImage, PackOutput, pack_images, pack_layout, to_json_manifest};
}
