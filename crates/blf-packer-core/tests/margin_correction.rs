use blf_packer_core::model::Thickness;
use blf_packer_core::packer::CorrectionInfo;

#[test]
fn no_collapse_charges_full_spacing() {
    let m = Thickness::new(1, 2, 3, 4);
    let ci = CorrectionInfo::new(m, false);

    assert_eq!(ci.h_spacing, 6); // left 4 + right 2
    assert_eq!(ci.v_spacing, 4); // bottom 3 + top 1
    assert_eq!(ci.h_overlap, 0);
    assert_eq!(ci.v_overlap, 0);
    assert_eq!(ci.offset_x, 6);
    assert_eq!(ci.offset_y, 4);
    assert_eq!(ci.offset_w, -6);
    assert_eq!(ci.offset_h, -4);
}

#[test]
fn collapse_shares_lesser_margin() {
    let m = Thickness::new(1, 2, 3, 4);
    let ci = CorrectionInfo::new(m, true);

    assert_eq!(ci.h_overlap, 2); // min(left 4, right 2)
    assert_eq!(ci.v_overlap, 1); // min(bottom 3, top 1)
    assert_eq!(ci.offset_x, 4);
    assert_eq!(ci.offset_y, 3);
    assert_eq!(ci.offset_w, -2);
    assert_eq!(ci.offset_h, -2);
}

#[test]
fn zero_margin_is_neutral() {
    for collapse in [false, true] {
        let ci = CorrectionInfo::new(Thickness::default(), collapse);
        assert_eq!(ci.h_spacing, 0);
        assert_eq!(ci.v_spacing, 0);
        assert_eq!(ci.offset_x, 0);
        assert_eq!(ci.offset_y, 0);
        assert_eq!(ci.offset_w, 0);
        assert_eq!(ci.offset_h, 0);
    }
}

/// Enabling collapse only ever reduces spacing, for every margin combination.
#[test]
fn collapse_never_increases_spacing() {
    for top in 0..5u32 {
        for right in 0..5u32 {
            for bottom in 0..5u32 {
                for left in 0..5u32 {
                    let m = Thickness::new(top, right, bottom, left);
                    let plain = CorrectionInfo::new(m, false);
                    let collapsed = CorrectionInfo::new(m, true);

                    assert!(collapsed.offset_x <= plain.offset_x);
                    assert!(collapsed.offset_y <= plain.offset_y);
                    assert!(collapsed.offset_x >= 0);
                    assert!(collapsed.offset_y >= 0);
                    assert!(collapsed.offset_w <= 0);
                    assert!(collapsed.offset_h <= 0);
                }
            }
        }
    }
}
