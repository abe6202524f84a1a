use crate::compositing::blit_rgba;
use crate::config::PackerConfig;
use crate::error::{PackError, Result};
use crate::model::{AtlasLayout, Piece, Thickness};
use crate::solver::solve;
use image::{DynamicImage, Rgba, RgbaImage};
use std::collections::HashMap;
use tracing::instrument;

/// In-memory image to pack (key + decoded image).
pub struct InputImage {
    pub key: String,
    pub image: DynamicImage,
}

/// Output of a packing run: the layout and the composited RGBA page.
pub struct PackOutput {
    pub layout: AtlasLayout,
    pub rgba: RgbaImage,
}

impl PackOutput {
    /// Filling rate of the final page.
    pub fn occupancy(&self) -> f64 {
        self.layout.occupancy()
    }
}

#[instrument(skip_all)]
/// Measures `inputs` into pieces, solves the layout, and composites the
/// placed images into a single RGBA page of the final container size.
///
/// The returned layout is in the solver's bottom-left-origin coordinates;
/// compositing maps each region into image coordinates, flipping the vertical
/// axis when `cfg.flip_vertical` is set (the default). The user-facing margin
/// order (top, right, bottom, left) follows the flip, so the visual top margin
/// stays on top of the rendered page.
pub fn pack_images(
    inputs: Vec<InputImage>,
    container_width: u32,
    cfg: &PackerConfig,
) -> Result<PackOutput> {
    if inputs.is_empty() {
        return Err(PackError::InvalidInput("nothing to pack".into()));
    }

    let pieces: Vec<Piece> = inputs
        .iter()
        .map(|inp| Piece::new(inp.key.clone(), inp.image.width(), inp.image.height()))
        .collect();

    let layout = solve(&pieces, container_width, &oriented(cfg))?;

    let sources: HashMap<&str, RgbaImage> = inputs
        .iter()
        .map(|inp| (inp.key.as_str(), inp.image.to_rgba8()))
        .collect();

    let mut canvas =
        RgbaImage::from_pixel(layout.width, layout.height, Rgba(cfg.background));
    for region in &layout.regions {
        let Some(src) = sources.get(region.key.as_str()) else {
            continue;
        };
        let dx = region.left as u32;
        let dy = if cfg.flip_vertical {
            region.bottom as u32
        } else {
            layout.height - region.top as u32
        };
        blit_rgba(src, &mut canvas, dx, dy);
    }

    Ok(PackOutput {
        layout,
        rgba: canvas,
    })
}

/// Packs sizes without compositing pixel data. Inputs are (key, width,
/// height); the margin is applied exactly as configured, with no axis flip.
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    container_width: u32,
    cfg: &PackerConfig,
) -> Result<AtlasLayout<String>> {
    let pieces: Vec<Piece> = inputs
        .into_iter()
        .map(|(k, w, h)| Piece::new(k.into(), w, h))
        .collect();
    solve(&pieces, container_width, cfg)
}

/// Margin as seen by the solver. Under a vertical flip the user's top margin
/// faces the container floor, so top and bottom swap before packing.
fn oriented(cfg: &PackerConfig) -> PackerConfig {
    let mut cfg = cfg.clone();
    if cfg.flip_vertical {
        cfg.margin = Thickness::new(
            cfg.margin.bottom,
            cfg.margin.right,
            cfg.margin.top,
            cfg.margin.left,
        );
    }
    cfg
}
