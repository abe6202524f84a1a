use blf_packer_core::error::PackError;
use blf_packer_core::prelude::*;
use blf_packer_core::solver::run_strategy;

fn pieces(dims: &[(u32, u32)]) -> Vec<Piece> {
    dims.iter()
        .enumerate()
        .map(|(i, &(w, h))| Piece::new(format!("p{i}"), w, h))
        .collect()
}

fn disjoint(regions: &[Region]) -> bool {
    for i in 0..regions.len() {
        for j in (i + 1)..regions.len() {
            let a = &regions[i];
            let b = &regions[j];
            let overlap =
                a.left < b.right && a.right > b.left && a.bottom < b.top && a.top > b.bottom;
            if overlap {
                return false;
            }
        }
    }
    true
}

#[test]
fn two_pieces_share_one_row() {
    let layout = solve(&pieces(&[(10, 10), (10, 5)]), 20, &PackerConfig::default()).unwrap();
    assert_eq!(layout.regions.len(), 2);
    assert_eq!(layout.height, 10);
    assert!(disjoint(&layout.regions));
}

#[test]
fn auto_size_widens_to_single_piece() {
    let layout = solve(&pieces(&[(5, 5)]), 1, &PackerConfig::default()).unwrap();
    assert_eq!((layout.width, layout.height), (5, 5));
    let r = &layout.regions[0];
    assert_eq!((r.left, r.bottom), (0, 0));
}

#[test]
fn margin_grid_tight_fit() {
    let cfg = PackerConfig::builder()
        .margin(Thickness::uniform(1))
        .auto_size(false)
        .build();
    let ps: Vec<Piece> = (0..100)
        .map(|i| Piece::new(format!("p{i}"), 64, 64))
        .collect();

    // 66 columns hold exactly one margin-expanded 64x64 piece
    let layout = solve(&ps, 66, &cfg).unwrap();
    assert_eq!(layout.regions.len(), 100);
    assert!(disjoint(&layout.regions));

    assert!(matches!(
        solve(&ps, 64, &cfg),
        Err(PackError::PlacementImpossible { .. })
    ));
}

#[test]
fn solver_matches_best_ordering() {
    let ps = pieces(&[(7, 3), (4, 9), (12, 2), (5, 5), (9, 4), (3, 8)]);
    let cfg = PackerConfig::default();

    let best = solve(&ps, 16, &cfg).unwrap();
    for strategy in SortStrategy::ALL {
        let run = run_strategy(strategy, &ps, 16, &cfg).unwrap();
        assert!(best.occupancy() >= run.filling_rate - 1e-12);
    }
}

#[test]
fn force_pow2_dimensions() {
    let cfg = PackerConfig::builder().pow2(true).build();
    let layout = solve(&pieces(&[(5, 5), (6, 3), (3, 7)]), 7, &cfg).unwrap();

    assert!(layout.width.is_power_of_two());
    assert!(layout.height.is_power_of_two());

    let max_right = layout.regions.iter().map(|r| r.right).max().unwrap();
    let max_top = layout.regions.iter().map(|r| r.top).max().unwrap();
    assert!(layout.width as i32 >= max_right);
    assert!(layout.height as i32 >= max_top);
}

#[test]
fn collapse_margin_never_yields_larger_container() {
    let area = |l: &AtlasLayout| (l.width as u64) * (l.height as u64);

    // auto-size widens to exactly one margin-expanded piece, forcing a single
    // column whose height shrinks with the collapsed vertical spacing
    let ps = pieces(&[(10, 4), (10, 7), (10, 3), (10, 9)]);
    let margins = [
        Thickness::uniform(1),
        Thickness::uniform(3),
        Thickness::new(1, 3, 2, 0),
        Thickness::new(4, 1, 1, 4),
    ];
    for margin in margins {
        let plain = PackerConfig::builder().margin(margin).build();
        let collapsed = PackerConfig::builder()
            .margin(margin)
            .collapse_margin(true)
            .build();

        let a = solve(&ps, 1, &plain).unwrap();
        let b = solve(&ps, 1, &collapsed).unwrap();
        assert!(
            area(&b) <= area(&a),
            "collapse grew the container for margin {margin:?}"
        );
    }

    // same-size grid: collapsing fits three columns per row where full
    // margins only fit two
    let grid: Vec<Piece> = (0..6).map(|i| Piece::new(format!("g{i}"), 64, 64)).collect();
    let margin = Thickness::uniform(2);
    let a = solve(&grid, 200, &PackerConfig::builder().margin(margin).build()).unwrap();
    let b = solve(
        &grid,
        200,
        &PackerConfig::builder()
            .margin(margin)
            .collapse_margin(true)
            .build(),
    )
    .unwrap();
    assert!(area(&b) <= area(&a));
}
