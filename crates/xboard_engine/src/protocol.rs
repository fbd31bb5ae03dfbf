//! The subset of the xboard text protocol this engine speaks.
//!
//! Input lines become [`Command`]s and everything the engine says is a
//! [`Response`] whose `Display` is the exact line to print.

use std::fmt;
use std::time::Duration;

use chessai_core::{Color, Move};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Xboard,
    Protover(u32),
    New,
    Force,
    Go,
    Quit,
    /// White moves next; the engine takes Black
    White,
    /// Black moves next; the engine takes White
    Black,
    /// `st N`: fixed time per move
    SetTime(Duration),
    /// `sd N`: depth limit
    SetDepth(u8),
    Ping(String),
    /// `?`: move now
    MoveNow,
    Move(String),
    /// A known command with an argument that does not parse
    Invalid { line: String, reason: &'static str },
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Command::Unknown(String::new());
        };
        let arg = parts.next();
        let invalid = |reason| Command::Invalid {
            line: line.to_string(),
            reason,
        };

        match name {
            "xboard" => Command::Xboard,
            "protover" => match arg.and_then(|a| a.parse().ok()) {
                Some(version) => Command::Protover(version),
                None => invalid("expected a version number"),
            },
            "new" => Command::New,
            "force" => Command::Force,
            "go" => Command::Go,
            "quit" => Command::Quit,
            "white" => Command::White,
            "black" => Command::Black,
            "st" => match arg.and_then(|a| a.parse::<u64>().ok()) {
                Some(secs) if secs > 0 => Command::SetTime(Duration::from_secs(secs)),
                _ => invalid("expected a positive number of seconds"),
            },
            "sd" => match arg.and_then(|a| a.parse::<u8>().ok()) {
                Some(depth) if depth > 0 => Command::SetDepth(depth),
                _ => invalid("expected a depth between 1 and 255"),
            },
            "ping" => Command::Ping(arg.unwrap_or_default().to_string()),
            "?" => Command::MoveNow,
            _ if is_move_string(name) => Command::Move(name.to_string()),
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Shaped like coordinate notation: letter, digit, letter, digit and an
/// optional promotion letter. Whether the squares exist is decided when the
/// move is parsed against a position.
pub fn is_move_string(text: &str) -> bool {
    let bytes = text.as_bytes();
    if !(4..=5).contains(&bytes.len()) {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        1 | 3 => b.is_ascii_digit(),
        _ => b.is_ascii_alphabetic(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Move(Move),
    Error { reason: String, command: String },
    IllegalMove(String),
    Pong(String),
    Features { name: String },
    GameResult { winner: Color, message: String },
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Move(mv) => write!(f, "move {mv}"),
            Response::Error { reason, command } => write!(f, "Error ({reason}): {command}"),
            Response::IllegalMove(text) => write!(f, "Illegal move: {text}"),
            Response::Pong(n) => write!(f, "pong {n}"),
            Response::Features { name } => write!(
                f,
                "feature myname=\"{name}\" ping=1 usermove=0 setboard=0 colors=1 \
                 sigint=0 sigterm=0 done=1"
            ),
            Response::GameResult { winner, message } => {
                let score = match winner {
                    Color::White => "1-0",
                    Color::Black => "0-1",
                };
                write!(f, "{score} {{{message}}}")
            }
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
