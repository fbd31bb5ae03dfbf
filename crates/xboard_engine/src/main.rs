use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;
use xboard_engine::{Command, EngineConfig, Response, Session};

/// How often the main loop looks for a finished search while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

fn print_usage() {
    eprintln!("ChessAI xboard engine");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  chessai [--config <file.toml>]");
}

fn parse_args() -> anyhow::Result<Option<PathBuf>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--config needs a file name");
                };
                config = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument `{other}`"),
        }
        i += 1;
    }
    Ok(config)
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn emit(out: &mut impl Write, responses: &[Response]) -> io::Result<()> {
    if responses.is_empty() {
        return Ok(());
    }
    for response in responses {
        writeln!(out, "{response}")?;
    }
    out.flush()
}

fn main() -> anyhow::Result<()> {
    let config = match parse_args()? {
        Some(path) => EngineConfig::load(&path)?,
        None => EngineConfig::default(),
    };
    init_tracing(&config.log_level);
    info!(?config, "starting");

    // stdin is read on its own thread so `?` and `quit` arrive mid-search.
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut session = Session::new(config);
    let mut out = io::stdout();

    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                let responses = session.handle(Command::parse(&line));
                emit(&mut out, &responses).context("writing to stdout")?;
                if session.is_quitting() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // Input closed: let a running search answer, then leave.
                let responses = session.wait();
                emit(&mut out, &responses).context("writing to stdout")?;
                break;
            }
        }
        let responses = session.poll();
        emit(&mut out, &responses).context("writing to stdout")?;
    }

    info!("bye");
    Ok(())
}
