use super::*;
use crate::journal_store::load_journal;
use crate::request::Status;

fn boxed_pawn_request(mv: &str) -> MoveRequest {
    let board = Board::from_fen_placement("rnbqkbnr/pppppppp/8/8/8/4NB2/PPPPPPPP/RNBQKBNR").unwrap();
    MoveRequest::new(mv, board.to_grid())
}

fn quiet_config() -> ControllerConfig {
    ControllerConfig {
        settle: Duration::ZERO,
        ..Default::default()
    }
}

#[test]
fn test_execute_without_device_reports_commands() {
    let mut runner = Runner::new(ControllerConfig::default(), None);
    assert_eq!(runner.controller_config().settle, Duration::ZERO);

    let response = runner.execute(&boxed_pawn_request("e2e4"));

    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.commands, "sasdwwsadw");
    assert_eq!(response.legs.len(), 7);
    let obstruction = response.obstruction.as_ref().unwrap();
    assert_eq!(obstruction.blocker.notation(), "e3");
    assert_eq!(obstruction.parking.notation(), "d3");
    // Row 4 is rank 4, row 5 rank 3, row 6 rank 2.
    assert_eq!(response.board[4][4], "P");
    assert_eq!(response.board[5][4], "N");
    assert_eq!(response.board[6][4], ".");
}

#[test]
fn test_device_failure_returns_partial_board() {
    let device: Box<dyn ActuatorSink> = Box::new(RecordingSink::failing_after(4));
    let mut runner = Runner::new(quiet_config(), Some(device));

    let response = runner.execute(&boxed_pawn_request("e2e4"));

    assert_eq!(response.status, Status::Error);
    assert_eq!(response.error.as_ref().unwrap().kind, "actuator");
    assert_eq!(response.commands, "sasd");
    assert_eq!(response.legs.len(), 3);
    assert!(response.legs[1].committed);
    assert_eq!(response.board[5][3], "N");
    assert_eq!(response.board[5][4], ".");
    assert_eq!(response.board[6][4], "P");
}

#[test]
fn test_bad_board_and_bad_move() {
    let mut runner = Runner::new(quiet_config(), None);

    let short = MoveRequest::new("e2e4", vec![vec![".".to_string(); 8]; 7]);
    let response = runner.execute(&short);
    assert_eq!(response.error.unwrap().kind, "invalid_board");
    assert_eq!(response.board, short.board);

    let response = runner.execute(&boxed_pawn_request("e2x4"));
    assert_eq!(response.error.unwrap().kind, "invalid_notation");

    let response = runner.plan(&boxed_pawn_request("e5e6"));
    assert_eq!(response.error.unwrap().kind, "empty_origin");
}

#[test]
fn test_plan_leaves_board_as_requested() {
    let runner = Runner::new(quiet_config(), None);
    let request = boxed_pawn_request("e2e4");
    let response = runner.plan(&request);
    assert!(response.is_ok());
    assert_eq!(response.commands, "sasdwwsadw");
    assert_eq!(response.board, request.board);
}

#[test]
fn test_journal_written_after_each_request() {
    let path = std::env::temp_dir().join(format!("robot_runner_journal_{}.json", std::process::id()));
    let mut runner = Runner::new(quiet_config(), None);
    runner.set_journal_path(Some(path.clone()));

    runner.execute(&boxed_pawn_request("e2e4"));
    let journal = load_journal(&path).unwrap();
    assert!(journal.is_complete());
    assert_eq!(journal.committed_moves().len(), 3);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_stdio_loop() {
    let request = serde_json::to_string(&boxed_pawn_request("e2e4")).unwrap();
    let input = format!("{request}\n\nnot json\nquit\n{request}\n");
    let mut output = Vec::new();
    let mut runner = Runner::new(quiet_config(), None);

    let answered = run_stdio(input.as_bytes(), &mut output, &mut runner, false).unwrap();
    assert_eq!(answered, 2);

    let text = String::from_utf8(output).unwrap();
    let responses: Vec<MoveResponse> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].commands, "sasdwwsadw");
    assert_eq!(responses[1].error.as_ref().unwrap().kind, "invalid_request");
}
