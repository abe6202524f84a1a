use crate::config::PackerConfig;
use crate::error::{PackError, Result};
use crate::model::{AtlasLayout, Piece, Region, Size, Thickness};
use crate::packer::blf::pack_run;
use crate::packer::next_pow2;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Piece count at which orderings are dispatched to the worker pool instead of
/// running sequentially (requires the `parallel` feature and `cfg.parallel`).
pub const PARALLEL_PIECE_THRESHOLD: usize = 100;

/// Piece orderings tried by the solver, in fixed priority order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    HeightDesc,
    AreaDesc,
    HeightThenWidthDesc,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 3] = [
        SortStrategy::HeightDesc,
        SortStrategy::AreaDesc,
        SortStrategy::HeightThenWidthDesc,
    ];

    /// Reorder `pieces` in place. Sorts are stable, so pieces comparing equal
    /// keep their input order.
    pub fn apply<K>(&self, pieces: &mut [Piece<K>]) {
        match self {
            SortStrategy::HeightDesc => {
                pieces.sort_by(|a, b| b.size.height.cmp(&a.size.height));
            }
            SortStrategy::AreaDesc => {
                pieces.sort_by(|a, b| b.size.area().cmp(&a.size.area()));
            }
            SortStrategy::HeightThenWidthDesc => {
                pieces.sort_by(|a, b| {
                    b.size
                        .height
                        .cmp(&a.size.height)
                        .then(b.size.width.cmp(&a.size.width))
                });
            }
        }
    }
}

/// One scored ordering result.
#[derive(Debug, Clone)]
pub struct ScoredRun<K = String> {
    pub strategy: SortStrategy,
    pub filling_rate: f64,
    pub layout: AtlasLayout<K>,
}

/// Tight container size enclosing `regions`: `max(right) + margin.right` by
/// `max(top) + margin.top`.
pub fn minimum_container_size<K>(regions: &[Region<K>], margin: Thickness) -> Size {
    let mut max_right = 0i32;
    let mut max_top = 0i32;
    for region in regions {
        max_right = max_right.max(region.right);
        max_top = max_top.max(region.top);
    }
    Size::new(
        (max_right + margin.right as i32) as u32,
        (max_top + margin.top as i32) as u32,
    )
}

/// Final container size for a completed run. Auto-size keeps the tight width,
/// otherwise the working width stands; height is always tight. Both dimensions
/// are rounded up to powers of two under `force_pow2`.
pub fn container_size<K>(
    container_width: u32,
    regions: &[Region<K>],
    cfg: &PackerConfig,
) -> Size {
    let tight = minimum_container_size(regions, cfg.margin);
    let (mut width, mut height) = if cfg.enable_auto_size {
        (tight.width, tight.height)
    } else {
        (container_width, tight.height)
    };
    if cfg.force_pow2 {
        width = next_pow2(width);
        height = next_pow2(height);
    }
    Size::new(width, height)
}

/// Ratio of total region area to container area.
pub fn filling_rate<K>(container: Size, regions: &[Region<K>]) -> f64 {
    let used: u64 = regions.iter().map(|r| r.area()).sum();
    used as f64 / container.area() as f64
}

/// Run one ordering on a private copy of the piece set and score it.
pub fn run_strategy<K: Clone>(
    strategy: SortStrategy,
    pieces: &[Piece<K>],
    container_width: u32,
    cfg: &PackerConfig,
) -> Result<ScoredRun<K>> {
    let mut ordered = pieces.to_vec();
    strategy.apply(&mut ordered);

    let run = pack_run(&ordered, container_width, cfg)?;
    let size = container_size(run.container_width, &run.regions, cfg);
    let rate = filling_rate(size, &run.regions);

    Ok(ScoredRun {
        strategy,
        filling_rate: rate,
        layout: AtlasLayout {
            width: size.width,
            height: size.height,
            regions: run.regions,
        },
    })
}

/// Obtain the highest-filling-rate placement across all orderings.
///
/// Each ordering packs an independent copy of `pieces`; a candidate replaces
/// the incumbent only on a strictly greater filling rate, so the first-listed
/// ordering wins exact ties in both sequential and parallel execution. An
/// ordering failing with `PlacementImpossible` contributes no candidate; the
/// error propagates only when every ordering fails.
pub fn solve<K: Clone + Send + Sync>(
    pieces: &[Piece<K>],
    container_width: u32,
    cfg: &PackerConfig,
) -> Result<AtlasLayout<K>> {
    validate_inputs(pieces, container_width)?;

    let outcomes = evaluate_strategies(pieces, container_width, cfg);

    let mut best: Option<ScoredRun<K>> = None;
    let mut last_err: Option<PackError> = None;
    for outcome in outcomes {
        match outcome {
            Ok(run) => {
                debug!(
                    strategy = ?run.strategy,
                    filling_rate = run.filling_rate,
                    width = run.layout.width,
                    height = run.layout.height,
                    "strategy result"
                );
                match &best {
                    Some(incumbent) if run.filling_rate <= incumbent.filling_rate => {}
                    _ => best = Some(run),
                }
            }
            Err(e) => {
                debug!(error = %e, "strategy failed");
                last_err = Some(e);
            }
        }
    }

    match best {
        Some(run) => {
            debug!(
                strategy = ?run.strategy,
                filling_rate = run.filling_rate,
                "final result"
            );
            Ok(run.layout)
        }
        None => Err(last_err.expect("at least one ordering was evaluated")),
    }
}

/// Evaluate every ordering, preserving the `SortStrategy::ALL` enumeration
/// order in the returned outcomes so the reduction is deterministic.
fn evaluate_strategies<K: Clone + Send + Sync>(
    pieces: &[Piece<K>],
    container_width: u32,
    cfg: &PackerConfig,
) -> Vec<Result<ScoredRun<K>>> {
    #[cfg(feature = "parallel")]
    {
        if cfg.parallel && pieces.len() >= PARALLEL_PIECE_THRESHOLD {
            return SortStrategy::ALL
                .par_iter()
                .map(|&strategy| run_strategy(strategy, pieces, container_width, cfg))
                .collect();
        }
    }

    SortStrategy::ALL
        .iter()
        .map(|&strategy| run_strategy(strategy, pieces, container_width, cfg))
        .collect()
}

fn validate_inputs<K>(pieces: &[Piece<K>], container_width: u32) -> Result<()> {
    if pieces.is_empty() {
        return Err(PackError::InvalidInput("empty piece collection".into()));
    }
    if container_width == 0 {
        return Err(PackError::InvalidInput(
            "container width must be positive".into(),
        ));
    }
    for piece in pieces {
        if piece.size.width == 0 || piece.size.height == 0 {
            return Err(PackError::InvalidInput(format!(
                "piece sizes must be positive, got {}x{}",
                piece.size.width, piece.size.height
            )));
        }
    }
    Ok(())
}
