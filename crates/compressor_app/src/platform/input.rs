use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use engine_logging::engine_debug;

/// User actions fed into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Drop(Vec<PathBuf>),
    Cancel,
    Reload,
    Quit,
}

/// Parses one interactive command. A bare line is taken as a single dropped path.
pub fn parse_command(line: &str) -> Option<Input> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed {
        "cancel" => Some(Input::Cancel),
        "reload" => Some(Input::Reload),
        "quit" | "exit" => Some(Input::Quit),
        _ => match trimmed.strip_prefix("drop ") {
            Some(rest) => Some(Input::Drop(
                rest.split_whitespace().map(PathBuf::from).collect(),
            )),
            None => Some(Input::Drop(vec![PathBuf::from(trimmed)])),
        },
    }
}

/// Forwards stdin commands until EOF or `quit`.
pub(crate) fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let Some(input) = parse_command(&line) else {
                continue;
            };
            engine_debug!("stdin command: {:?}", input);
            let quit = input == Input::Quit;
            if tx.send(input).is_err() || quit {
                return;
            }
        }
        let _ = tx.send(Input::Quit);
    });
}
