use super::correction::CorrectionInfo;
use super::frontier::StablePoint;
use crate::model::{Region, Size};

/// Select the frontier index of the legal lowest-then-leftmost anchor for a
/// piece of `size`, or `None` when no point survives.
///
/// A point is rejected when its gaps disqualify the piece, when the expanded
/// piece would cross the container bounds, or when the expanded piece overlaps
/// any placed region (open-interval test on margin-corrected boxes). Among
/// survivors the minimum `y` wins, ties broken by minimum `x`; the first point
/// seen at an exactly equal position is kept.
pub fn select_anchor<K>(
    points: &[StablePoint],
    size: Size,
    placed: &[Region<K>],
    container_width: i32,
    ci: &CorrectionInfo,
) -> Option<usize> {
    let w = size.width as i32;
    let h = size.height as i32;
    let margin_right = ci.margin.right as i32;

    let mut best: Option<(i32, i32, usize)> = None;

    for (i, point) in points.iter().enumerate() {
        if w + ci.h_spacing <= point.gap_width || h + ci.v_spacing <= point.gap_height {
            continue;
        }
        if point.x < 0 || point.y < 0 || point.x + w + margin_right > container_width {
            continue;
        }
        if collides(point, w, h, placed, ci) {
            continue;
        }
        match best {
            Some((by, bx, _)) if point.y < by || (point.y == by && point.x < bx) => {
                best = Some((point.y, point.x, i));
            }
            None => best = Some((point.y, point.x, i)),
            _ => {}
        }
    }

    best.map(|(_, _, i)| i)
}

/// Whether a piece of `w` x `h` anchored at `point` overlaps any placed
/// region once both sides are margin-corrected. Touching edges do not count.
fn collides<K>(
    point: &StablePoint,
    w: i32,
    h: i32,
    placed: &[Region<K>],
    ci: &CorrectionInfo,
) -> bool {
    for other in placed {
        if point.x - ci.offset_x >= other.right {
            continue;
        }
        if point.x + w + ci.offset_x <= other.left {
            continue;
        }
        if point.y - ci.offset_y >= other.top {
            continue;
        }
        if point.y + h + ci.offset_y <= other.bottom {
            continue;
        }
        return true;
    }
    false
}
