use super::*;
use crate::test_utils::sq;

fn names(cells: &[Coord]) -> Vec<String> {
    cells.iter().map(|c| c.notation()).collect()
}

/// White pawn e2 boxed in by its own army, knight on e3, bishop on f3; d3 is
/// the only free cell next to the knight.
fn boxed_pawn() -> Board {
    Board::from_fen_placement("rnbqkbnr/pppppppp/8/8/8/4NB2/PPPPPPPP/RNBQKBNR").unwrap()
}

#[test]
fn test_detect_blockers_in_discovery_order() {
    let board = boxed_pawn();
    let blockers = detect_blockers(&board, sq("e2"), sq("e4"));
    assert_eq!(names(&blockers), vec!["d2", "f2", "e3", "e1"]);
}

#[test]
fn test_detect_blockers_skips_origin_and_destination() {
    // Rook on a1 walled in; destination a2 is occupied but never a blocker.
    let board = Board::from_fen_placement("8/8/8/8/8/8/P7/RN6").unwrap();
    let blockers = detect_blockers(&board, sq("a1"), sq("a2"));
    assert_eq!(names(&blockers), vec!["b1"]);

    let board = Board::from_fen_placement("8/8/8/8/8/1P6/P1P5/1P6").unwrap();
    // Origin b2 is empty here; the cells around it are recorded once each.
    let blockers = detect_blockers(&board, sq("b2"), sq("h8"));
    assert_eq!(names(&blockers), vec!["a2", "c2", "b3", "b1"]);
}

#[test]
fn test_parking_spots_bounded_and_breadth_first() {
    let board = Board::empty().with_piece(sq("d4"), crate::types::Piece::new('N').unwrap());
    let one = find_parking_spots(&board, sq("d4"), sq("h8"), 1);
    assert_eq!(one.len(), 4);
    assert!(one.iter().all(|p| p.steps() == 1 && p.start() == sq("d4")));

    let two = find_parking_spots(&board, sq("d4"), sq("h8"), 2);
    assert_eq!(two.len(), 12);
    let steps: Vec<usize> = two.iter().map(|p| p.steps()).collect();
    assert!(steps.windows(2).all(|w| w[0] <= w[1]));

    assert!(find_parking_spots(&board, sq("d4"), sq("h8"), 0).is_empty());
}

#[test]
fn test_parking_spots_never_use_destination() {
    let board = boxed_pawn();
    let spots = find_parking_spots(&board, sq("e3"), sq("e4"), 2);
    let ends: Vec<String> = spots.iter().map(|p| p.end().notation()).collect();
    assert_eq!(ends, vec!["d3", "c3", "d4"]);
    assert_eq!(spots[2].notation(), vec!["e3", "d3", "d4"]);
}

#[test]
fn test_resolves_boxed_pawn_with_one_step_detour() {
    let mut board = boxed_pawn();
    let before = board;
    let mut resolver = ObstructionResolver::default();

    let plan = resolver.resolve(&mut board, sq("e2"), sq("e4")).unwrap();

    assert_eq!(plan.blocker, sq("e3"));
    assert_eq!(plan.parking_path.notation(), vec!["e3", "d3"]);
    assert_eq!(plan.principal_path.notation(), vec!["e2", "e3", "e4"]);
    assert_eq!(plan.restore_path.notation(), vec!["d3", "e3"]);
    assert_eq!(board, before);
}

#[test]
fn test_prefers_fewer_parking_steps_over_discovery_order() {
    // d2 is discovered first but only clears the way when parked two steps
    // out (on c3); e3 needs a single step.
    let mut board = boxed_pawn();
    let mut resolver = ObstructionResolver::default();

    let plan = resolver.resolve(&mut board, sq("e2"), sq("e4")).unwrap();
    assert_eq!(plan.relocation_steps(), 1);
    assert_eq!(plan.blocker, sq("e3"));

    let stats = resolver.stats();
    assert_eq!(stats.blockers, 4);
    assert!(stats.candidates_accepted >= 2);
}

#[test]
fn test_unresolvable_when_only_escape_is_destination() {
    // The knight on e3 could only step onto e4, which is where the pawn goes.
    let mut board =
        Board::from_fen_placement("rnbqkbnr/pppppppp/8/8/8/3PNB2/PPPPPPPP/RNBQKBNR").unwrap();
    let before = board;
    let mut resolver = ObstructionResolver::default();

    let err = resolver.resolve(&mut board, sq("e2"), sq("e4")).unwrap_err();
    assert!(matches!(err, MoveError::Unresolvable { .. }));
    assert_eq!(board, before);
}

#[test]
fn test_two_step_detour_when_one_step_keeps_corridor_shut() {
    // Same wall, pawn heading for e5: parking on e4 would still block, so the
    // knight has to go on to d4.
    let mut board =
        Board::from_fen_placement("rnbqkbnr/pppppppp/8/8/8/3PNB2/PPPPPPPP/RNBQKBNR").unwrap();
    let before = board;
    let mut resolver = ObstructionResolver::default();

    let plan = resolver.resolve(&mut board, sq("e2"), sq("e5")).unwrap();
    assert_eq!(plan.blocker, sq("e3"));
    assert_eq!(plan.parking_path.notation(), vec!["e3", "e4", "d4"]);
    assert_eq!(plan.principal_path.notation(), vec!["e2", "e3", "e4", "e5"]);
    assert_eq!(plan.restore_path.notation(), vec!["d4", "e4", "e3"]);
    assert_eq!(board, before);
}

#[test]
fn test_enclosed_blockers_are_unresolvable() {
    let mut board = Board::from_fen_placement("8/8/8/8/8/P7/PP6/RNB5").unwrap();
    let before = board;
    let mut resolver = ObstructionResolver::default();

    let err = resolver.resolve(&mut board, sq("a1"), sq("a4")).unwrap_err();
    assert!(matches!(
        err,
        MoveError::Unresolvable { origin, destination } if origin == sq("a1") && destination == sq("a4")
    ));
    assert_eq!(resolver.stats().candidates_evaluated, 0);
    assert_eq!(board, before);
}

#[test]
fn test_failed_candidates_leave_board_untouched() {
    // Plenty of parking room near a1, but the destination h8 is sealed off by
    // pieces that are not adjacent to the reachable region.
    let mut board = Board::from_fen_placement("6np/7p/8/8/8/8/P7/RN6").unwrap();
    let before = board;
    let mut resolver = ObstructionResolver::default();

    let err = resolver.resolve(&mut board, sq("a1"), sq("h8")).unwrap_err();
    assert!(matches!(err, MoveError::Unresolvable { .. }));
    assert!(resolver.stats().candidates_evaluated > 0);
    assert_eq!(resolver.stats().candidates_accepted, 0);
    assert_eq!(board, before);
}
