use super::correction::CorrectionInfo;
use crate::model::Region;

/// A candidate bottom-left anchor where a future piece could be placed.
///
/// `gap_width`/`gap_height` record the clearance between the two rectangles
/// (or the container wall) whose junction produced this point. A piece rests
/// here only if its margin-expanded size exceeds both gaps; smaller pieces
/// would fall further and are rejected before any collision check. Points are
/// feasibility snapshots taken at generation time: later placements may
/// invalidate them, so every candidate is re-validated at selection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StablePoint {
    pub x: i32,
    pub y: i32,
    pub gap_width: i32,
    pub gap_height: i32,
}

impl StablePoint {
    pub fn new(x: i32, y: i32, gap_width: i32, gap_height: i32) -> Self {
        Self {
            x,
            y,
            gap_width,
            gap_height,
        }
    }
}

/// The initial frontier: a single point at the margin-adjusted origin.
pub fn seed_point(ci: &CorrectionInfo) -> StablePoint {
    StablePoint::new(ci.margin.left as i32, ci.margin.bottom as i32, 0, 0)
}

/// Emit the candidate anchors opened up by placing `current` among `others`.
///
/// Two boundary points come from the container itself: one to the right of
/// `current` on the floor, one above it at the left wall. One corner point is
/// added per previously placed region whose directional relationship with
/// `current` forms a junction, with gaps measured from the margin-corrected
/// edges and clamped to zero when there is no clearance.
pub fn generate_stable_points<K>(
    current: &Region<K>,
    others: &[Region<K>],
    ci: &CorrectionInfo,
) -> Vec<StablePoint> {
    let margin = ci.margin;
    let mut points = Vec::with_capacity(others.len() + 2);

    points.push(StablePoint::new(
        current.right + ci.offset_x,
        margin.bottom as i32,
        0,
        current.bottom - margin.bottom as i32 + ci.v_overlap,
    ));
    points.push(StablePoint::new(
        margin.left as i32,
        current.top + ci.offset_y,
        current.left - margin.left as i32 + ci.h_overlap,
        0,
    ));

    for other in others {
        if current.right + ci.offset_x <= other.left && current.top > other.top {
            // current sits to the left of `other` and reaches above it
            let h = if current.bottom + ci.offset_h > other.top {
                current.bottom - other.top + ci.offset_h
            } else {
                0
            };
            points.push(StablePoint::new(
                current.right + ci.offset_x,
                other.top + ci.offset_y,
                other.left - current.right + ci.offset_w,
                h,
            ));
        } else if current.left - ci.offset_x >= other.right && current.top < other.top {
            // current sits to the right of `other` and stays below its top
            let h = if current.top - ci.offset_h < other.bottom {
                other.bottom - current.top + ci.offset_h
            } else {
                0
            };
            points.push(StablePoint::new(
                other.right + ci.offset_x,
                current.top + ci.offset_y,
                current.left - other.right + ci.offset_w,
                h,
            ));
        } else if current.top + ci.offset_y <= other.bottom && current.right > other.right {
            // current sits below `other` and extends past its right edge
            let w = if current.left + ci.offset_w > other.right {
                current.left - other.right + ci.offset_w
            } else {
                0
            };
            points.push(StablePoint::new(
                other.right + ci.offset_x,
                current.top + ci.offset_y,
                w,
                other.bottom - current.top + ci.offset_h,
            ));
        } else if current.bottom - ci.offset_y >= other.top && current.right < other.right {
            // current sits above `other` and stops short of its right edge
            let w = if current.right - ci.offset_w < other.left {
                other.left - current.right + ci.offset_w
            } else {
                0
            };
            points.push(StablePoint::new(
                current.right + ci.offset_x,
                other.top + ci.offset_y,
                w,
                current.bottom - other.top + ci.offset_h,
            ));
        }
    }

    points
}
