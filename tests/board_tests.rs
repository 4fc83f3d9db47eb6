//! Board grid tests - views, swaps and compaction

use proptest::prelude::*;
use word_slide::core::{BoardGrid, HeadlessTileFactory, TileFactory};
use word_slide::types::{GridPos, Line, TileId};

fn grid(rows: &[&str]) -> (BoardGrid, HeadlessTileFactory) {
    let mut factory = HeadlessTileFactory::new();
    let grid = BoardGrid::from_rows(rows, &mut factory);
    (grid, factory)
}

#[test]
fn test_grid_new_empty() {
    let grid = BoardGrid::new(4, 5);
    assert_eq!(grid.rows(), 4);
    assert_eq!(grid.columns(), 5);
    assert_eq!(grid.empty_cells().len(), 20);
    assert!(!grid.is_full());
    assert!(grid.get(3, 4).is_none());
}

#[test]
fn test_grid_get_out_of_bounds() {
    let (grid, _) = grid(&["ab", "cd"]);
    assert!(grid.get(2, 0).is_none());
    assert!(grid.get(0, 2).is_none());
    assert!(grid.line(Line::Column(5)).is_none());
}

#[test]
fn test_all_lines_rows_then_columns() {
    let (grid, _) = grid(&["abc", "def"]);
    let texts: Vec<String> = grid.all_sequences().iter().map(|s| s.text()).collect();
    assert_eq!(texts, ["abc", "def", "ad", "be", "cf"]);
}

#[test]
fn test_swap_vertical_neighbours() {
    let (mut grid, _) = grid(&["ab", "cd"]);
    assert!(grid.swap(GridPos::new(0, 1), GridPos::new(1, 1)));
    assert_eq!(grid.row(0).unwrap().text(), "ad");
    assert_eq!(grid.column(1).unwrap().text(), "db");
    assert!(grid.check_consistency().is_ok());
}

#[test]
fn test_set_character_keeps_identity() {
    let (mut grid, _) = grid(&["ab"]);
    let id = grid.get(0, 1).unwrap().id;
    assert!(grid.set_character(GridPos::new(0, 1), 'z'));
    assert_eq!(grid.get(0, 1).map(|t| (t.id, t.character)), Some((id, 'z')));
}

#[test]
fn test_compaction_then_refill() {
    let (mut grid, mut factory) = grid(&["abc", "def", "ghi"]);
    let out = grid.remove_and_compact([GridPos::new(2, 0), GridPos::new(1, 0), GridPos::new(2, 2)]);

    for tile in &out.removed {
        factory.release_tile(tile.id);
    }
    assert_eq!(factory.live_count(), 6);
    assert_eq!(out.vacated.len(), 3);

    for pos in out.vacated.clone() {
        assert!(grid.spawn_replacement(pos, '*', &mut factory).is_some());
    }
    assert!(grid.is_full());
    assert_eq!(grid.column(0).unwrap().text(), "**a");
    assert_eq!(grid.column(2).unwrap().text(), "*cf");
    assert_eq!(grid.column(1).unwrap().text(), "beh");
    assert!(!out.affected.contains_column(1));
    assert!(grid.check_consistency().is_ok());
}

#[test]
fn test_sequences_in_region() {
    let (grid, _) = grid(&["abc", "def", "ghi"]);
    let region = word_slide::core::AffectedRegion::from_positions([GridPos::new(1, 2)]);
    let texts: Vec<String> = grid.sequences_in(&region).iter().map(|s| s.text()).collect();
    assert_eq!(texts, ["def", "cfi"]);
}

#[test]
fn test_snapshot_serializes() {
    let (grid, _) = grid(&["ab", "cd"]);
    let json = serde_json::to_string(&grid.snapshot()).unwrap();
    let back: word_slide::core::GridSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.render(), "ab\ncd");
    assert_eq!(back.letter_at(1, 0), Some('c'));
    assert_eq!(back.empty_count(), 0);
}

proptest! {
    #[test]
    fn prop_compaction_keeps_survivors_ordered_at_bottom(
        rows in 1usize..7,
        columns in 1usize..7,
        mask in prop::collection::vec(any::<bool>(), 36),
    ) {
        let mut factory = HeadlessTileFactory::new();
        let mut grid = BoardGrid::new(rows, columns);
        let positions: Vec<GridPos> = grid.positions().collect();
        for &pos in &positions {
            grid.spawn_replacement(pos, 'a', &mut factory);
        }

        let before: Vec<Vec<TileId>> = (0..columns)
            .map(|c| (0..rows).map(|r| grid.get(r, c).unwrap().id).collect())
            .collect();
        let removed: Vec<GridPos> = positions
            .iter()
            .zip(mask.iter())
            .filter(|(_, m)| **m)
            .map(|(&p, _)| p)
            .collect();

        let removed_ids: Vec<TileId> = removed
            .iter()
            .map(|p| grid.get_pos(*p).unwrap().id)
            .collect();

        let out = grid.remove_and_compact(removed.iter().copied());
        prop_assert_eq!(out.removed.len(), removed.len());
        prop_assert!(grid.check_consistency().is_ok());

        for c in 0..columns {
            let survivors: Vec<TileId> = before[c]
                .iter()
                .copied()
                .filter(|id| !removed_ids.contains(id))
                .collect();
            let gap = rows - survivors.len();

            for r in 0..gap {
                prop_assert!(grid.get(r, c).is_none());
            }
            let column: Vec<TileId> = (gap..rows).map(|r| grid.get(r, c).unwrap().id).collect();
            prop_assert_eq!(column, survivors);
        }
    }
}
