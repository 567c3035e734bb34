use super::*;

fn start_grid() -> Vec<Vec<String>> {
    robot_core::Board::startpos().to_grid()
}

#[test]
fn test_request_wire_names() {
    let request = MoveRequest::new("e2e4", start_grid());
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["move"], "e2e4");
    assert_eq!(json["board"][0][0], "r");
    assert_eq!(json["board"][4][4], ".");
}

#[test]
fn test_request_accepts_legacy_field_names() {
    let json = r#"{"movimiento": "g1f3", "estado_tablero": [[" "," "," "," "," "," "," "," "]]}"#;
    let request: MoveRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.mv, "g1f3");
    assert_eq!(request.board.len(), 1);
}

#[test]
fn test_rejected_response_shape() {
    let response = MoveResponse::rejected("invalid_request", "expected value".to_string());
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["kind"], "invalid_request");
    assert!(json.get("obstruction").is_none());
    assert!(!response.is_ok());
}

#[test]
fn test_planned_response_lists_every_leg() {
    let path = robot_core::Path::straight(
        "e2".parse().unwrap(),
        "e4".parse().unwrap(),
    );
    let maneuver = Maneuver::Direct { path };
    let response = MoveResponse::planned(&maneuver, Coord::E4, start_grid()).unwrap();

    assert!(response.is_ok());
    assert_eq!(response.commands, "ssww");
    assert_eq!(response.legs.len(), 3);
    assert!(response.legs.iter().all(|l| !l.committed));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["legs"][1]["kind"], "principal");
    assert_eq!(json["legs"][1]["from"], "e2");
    assert_eq!(json["legs"][2]["commands"], "");
    assert!(json.get("error").is_none());

    let back: MoveResponse = serde_json::from_value(json).unwrap();
    assert_eq!(back, response);
}
