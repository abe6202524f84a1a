use super::anchor::select_anchor;
use super::correction::CorrectionInfo;
use super::frontier::{generate_stable_points, seed_point};
use super::next_pow2;
use crate::config::PackerConfig;
use crate::error::{PackError, Result};
use crate::model::{Piece, Region};

/// Result of one bottom-left-fill run: the regions in placement order and the
/// container width the run actually used (possibly widened before packing).
#[derive(Debug, Clone)]
pub struct BlfRun<K = String> {
    pub container_width: u32,
    pub regions: Vec<Region<K>>,
}

/// Place `pieces`, in the order supplied by the caller, into a container of
/// the given width.
///
/// With `enable_auto_size` the width is first raised (never lowered) to fit
/// the widest margin-expanded piece; with `force_pow2` the working width is
/// then rounded up to the next power of two. Fails with `PlacementImpossible`
/// on the first piece for which no legal anchor exists; the failure is local
/// to this ordering and width.
pub fn pack_run<K: Clone>(
    pieces: &[Piece<K>],
    container_width: u32,
    cfg: &PackerConfig,
) -> Result<BlfRun<K>> {
    let ci = CorrectionInfo::new(cfg.margin, cfg.collapse_margin);

    let mut container_width = container_width;
    if cfg.enable_auto_size {
        if let Some(widest) = pieces.iter().map(|p| p.size.width).max() {
            container_width = container_width.max(widest + cfg.margin.horizontal());
        }
    }
    if cfg.force_pow2 {
        container_width = next_pow2(container_width);
    }
    let width_limit = container_width as i32;

    let mut regions: Vec<Region<K>> = Vec::with_capacity(pieces.len());
    let mut frontier = vec![seed_point(&ci)];

    for piece in pieces {
        let index = select_anchor(&frontier, piece.size, &regions, width_limit, &ci).ok_or(
            PackError::PlacementImpossible {
                width: piece.size.width,
                height: piece.size.height,
            },
        )?;
        let point = frontier.remove(index);

        let region = Region::from_anchor_and_size(
            piece.key.clone(),
            point.x,
            point.y,
            piece.size.width,
            piece.size.height,
        );
        frontier.extend(generate_stable_points(&region, &regions, &ci));
        regions.push(region);
    }

    Ok(BlfRun {
        container_width,
        regions,
    })
}
