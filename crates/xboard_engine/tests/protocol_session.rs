//! Drives the binary over stdin/stdout the way a GUI would.

use std::io::Write;
use std::process::{Command, Stdio};

fn run(input: &str) -> Vec<String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chessai"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env("RUST_LOG", "off")
        .spawn()
        .expect("engine starts");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("engine reads input");
    let output = child.wait_with_output().expect("engine exits");
    assert!(output.status.success());
    String::from_utf8(output.stdout)
        .expect("utf-8 output")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn answers_a_move_after_the_handshake() {
    let lines = run("xboard\nprotover 2\nnew\nsd 2\nping 1\ne2e4\n");
    assert!(lines[0].starts_with("feature myname=\"MinMax\""));
    assert_eq!(lines[1], "pong 1");
    assert_eq!(lines.len(), 3, "{lines:?}");
    let reply = lines[2].strip_prefix("move ").expect("a move line");
    assert_eq!(reply.len(), 4);
    // Black answers from ranks 8 or 7 for its first move.
    assert!(matches!(reply.as_bytes()[1], b'7' | b'8'), "{reply}");
}

#[test]
fn reports_illegal_and_unknown_input() {
    let lines = run("new\nforce\ne9e4\nfoo\nquit\ne2e4\n");
    assert_eq!(
        lines,
        vec![
            "Illegal move: e9e4".to_string(),
            "Error (unknown command): foo".to_string(),
        ]
    );
}

#[test]
fn reports_the_result_when_a_king_falls() {
    let lines = run("new\nforce\ne2e3\nf7f6\nd1h5\na7a6\nh5e8\nquit\n");
    assert_eq!(lines, vec!["1-0 {White captured the king}".to_string()]);
}

#[test]
fn rejects_a_missing_config_file() {
    let status = Command::new(env!("CARGO_BIN_EXE_chessai"))
        .args(["--config", "/nonexistent/chessai.toml"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("engine starts");
    assert!(!status.success());
}
