use super::*;
use chessai_core::GameState;

#[test]
fn test_parse_plain_commands() {
    assert_eq!(Command::parse("xboard"), Command::Xboard);
    assert_eq!(Command::parse("new\n"), Command::New);
    assert_eq!(Command::parse("  force "), Command::Force);
    assert_eq!(Command::parse("go"), Command::Go);
    assert_eq!(Command::parse("quit"), Command::Quit);
    assert_eq!(Command::parse("white"), Command::White);
    assert_eq!(Command::parse("black"), Command::Black);
    assert_eq!(Command::parse("?"), Command::MoveNow);
}

#[test]
fn test_parse_commands_with_arguments() {
    assert_eq!(Command::parse("protover 2"), Command::Protover(2));
    assert_eq!(Command::parse("st 10"), Command::SetTime(Duration::from_secs(10)));
    assert_eq!(Command::parse("sd 4"), Command::SetDepth(4));
    assert_eq!(Command::parse("ping 17"), Command::Ping("17".to_string()));
}

#[test]
fn test_parse_bad_arguments() {
    for line in ["st", "st 0", "st soon", "sd 300", "sd 0", "protover x"] {
        match Command::parse(line) {
            Command::Invalid { line: echoed, .. } => assert_eq!(echoed, line),
            other => panic!("{line} parsed as {other:?}"),
        }
    }
}

#[test]
fn test_parse_moves() {
    assert_eq!(Command::parse("e2e4"), Command::Move("e2e4".to_string()));
    assert_eq!(Command::parse("a7a8q"), Command::Move("a7a8q".to_string()));
    assert_eq!(Command::parse("E2E4"), Command::Move("E2E4".to_string()));
    // Off-board squares are left for the session to reject as illegal.
    assert_eq!(Command::parse("e9e4"), Command::Move("e9e4".to_string()));
    assert_eq!(Command::parse("a7a8x"), Command::Move("a7a8x".to_string()));
    assert_eq!(Command::parse("hello"), Command::Unknown("hello".to_string()));
    assert_eq!(Command::parse(""), Command::Unknown(String::new()));
}

#[test]
fn test_move_strings() {
    assert!(is_move_string("g1f3"));
    assert!(is_move_string("b7b8n"));
    assert!(!is_move_string("g1f"));
    assert!(!is_move_string("g1f3qq"));
    assert!(!is_move_string("g1-f3"));
    assert!(!is_move_string("1g3f"));
    assert!(!is_move_string("ping"));
}

#[test]
fn test_response_lines() {
    let state = GameState::new_game(Color::Black);
    let mv = Move::parse("e2e4", &state).unwrap();
    assert_eq!(Response::Move(mv).to_string(), "move e2e4");
    assert_eq!(
        Response::Error {
            reason: "unknown command".to_string(),
            command: "hello".to_string(),
        }
        .to_string(),
        "Error (unknown command): hello"
    );
    assert_eq!(
        Response::IllegalMove("e9e4".to_string()).to_string(),
        "Illegal move: e9e4"
    );
    assert_eq!(Response::Pong("3".to_string()).to_string(), "pong 3");
    assert_eq!(
        Response::GameResult {
            winner: Color::White,
            message: "White captured the king".to_string(),
        }
        .to_string(),
        "1-0 {White captured the king}"
    );
    assert_eq!(
        Response::GameResult {
            winner: Color::Black,
            message: "Black captured the king".to_string(),
        }
        .to_string(),
        "0-1 {Black captured the king}"
    );
    let features = Response::Features {
        name: "MinMax".to_string(),
    }
    .to_string();
    assert!(features.starts_with("feature myname=\"MinMax\""));
    assert!(features.ends_with("done=1"));
}
