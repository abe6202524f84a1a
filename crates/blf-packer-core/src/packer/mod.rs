pub mod anchor;
pub mod blf;
pub mod correction;
pub mod frontier;

pub use anchor::select_anchor;
pub use blf::{BlfRun, pack_run};
pub use correction::CorrectionInfo;
pub use frontier::StablePoint;

/// Round `v` up to the next power of two (`v <= 1` maps to 1).
pub fn next_pow2(mut v: u32) -> u32 {
    if v <= 1 {
        return 1;
    }
    v -= 1;
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v + 1
}
