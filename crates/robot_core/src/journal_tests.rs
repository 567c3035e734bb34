use super::*;
use crate::path::Path;
use crate::test_utils::sq;

fn direct_plan() -> Vec<Leg> {
    let principal = Path::new(vec![sq("e2"), sq("e3"), sq("e4")]).unwrap();
    vec![
        Leg::new(LegKind::ApproachPrincipal, Path::straight(sq("e4"), sq("e2"))),
        Leg::new(LegKind::Principal, principal),
        Leg::new(LegKind::ReturnHome, Path::single(sq("e4"))),
    ]
}

#[test]
fn test_fresh_log_is_pending() {
    let log = ExecutionLog::new(sq("e2"), sq("e4"), sq("e4"));
    assert_eq!(log.outcome, JournalOutcome::Pending);
    assert!(!log.is_complete());
    assert!(log.remaining_legs().is_empty());
    assert_eq!(log.robot_position(), Some(sq("e4")));
}

#[test]
fn test_remaining_legs_and_position() {
    let mut log = ExecutionLog::new(sq("e2"), sq("e4"), sq("e4"));
    log.set_plan(direct_plan());
    assert_eq!(log.remaining_legs().len(), 3);

    log.complete_leg(
        LegKind::ApproachPrincipal,
        vec![Direction::Down, Direction::Down],
        None,
    );
    log.interrupt(LegKind::Principal, vec![Direction::Up]);

    assert_eq!(log.remaining_legs().len(), 2);
    assert_eq!(log.remaining_legs()[0].kind, LegKind::Principal);
    assert_eq!(log.robot_position(), Some(sq("e3")));
    assert!(log.committed_moves().is_empty());
}

#[test]
fn test_committed_moves_in_order() {
    let mut log = ExecutionLog::new(sq("e2"), sq("e4"), sq("e4"));
    log.complete_leg(LegKind::ApproachBlocker, vec![Direction::Down], None);
    log.complete_leg(
        LegKind::RelocateBlocker,
        vec![Direction::Left],
        Some(BoardMove { from: sq("e3"), to: sq("d3") }),
    );
    log.complete_leg(
        LegKind::Principal,
        vec![Direction::Up, Direction::Up],
        Some(BoardMove { from: sq("e2"), to: sq("e4") }),
    );

    let moves = log.committed_moves();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0].to, sq("d3"));
    assert_eq!(moves[1].from, sq("e2"));
}

#[test]
fn test_position_off_board_is_none() {
    let mut log = ExecutionLog::new(sq("a1"), sq("a2"), sq("a1"));
    log.complete_leg(LegKind::ApproachPrincipal, vec![Direction::Left], None);
    assert_eq!(log.robot_position(), None);
}

#[test]
fn test_outcome_transitions() {
    let mut log = ExecutionLog::new(sq("e2"), sq("e4"), sq("e4"));
    log.finish();
    assert!(log.is_complete());

    log.fail("actuator", "motor stalled".to_string());
    assert!(!log.is_complete());
    assert_eq!(
        log.outcome,
        JournalOutcome::Failed {
            kind: "actuator".to_string(),
            message: "motor stalled".to_string(),
        }
    );
}

#[test]
fn test_generate_report() {
    let mut log = ExecutionLog::new(sq("e2"), sq("e4"), sq("e4"));
    log.set_plan(direct_plan());
    log.complete_leg(
        LegKind::ApproachPrincipal,
        vec![Direction::Down, Direction::Down],
        None,
    );
    log.interrupt(LegKind::Principal, vec![Direction::Up]);
    log.fail("actuator", "motor stalled".to_string());

    let report = log.generate_report();
    assert!(report.starts_with("=== Maneuver e2e4 (home e4) ==="));
    assert!(report.contains("done ss"));
    assert!(report.contains("interrupted after \"w\""));
    assert!(report.contains("pending"));
    assert!(report.contains("Outcome: failed (actuator): motor stalled"));
    // Title, column header, rule, three legs, outcome.
    assert_eq!(report.lines().count(), 7);
}
