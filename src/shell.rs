//! Line-oriented console standing in for the two input buttons.
//!
//! Each line holds any number of `0`/`1` symbols (spaces allowed), or one of
//! `quit` and `help`.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::buffer::BitSink;
use crate::sync::CloseSignal;
use crate::types::Bit;

pub const HELP: &str = "\
Enter 0 and 1 to press the two buttons; several per line are fine.
The first symbol picks your side: 0 plays white, 1 plays black.
quit   end the session
help   show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Bits(Vec<Bit>),
    Quit,
    Help,
    Unknown(String),
}

pub fn parse_input_line(line: &str) -> Option<ShellCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cmd = match trimmed.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "help" | "?" => ShellCommand::Help,
        _ => match Bit::parse_str(trimmed) {
            Some(bits) => ShellCommand::Bits(bits),
            None => ShellCommand::Unknown(trimmed.to_string()),
        },
    };

    Some(cmd)
}

/// Feed lines from `reader` into `sink` until `quit` or end of input, then
/// close the session.
pub async fn run_console<R>(reader: R, sink: BitSink, close: CloseSignal) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let result = loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        };
        match parse_input_line(&line) {
            None => {}
            Some(ShellCommand::Bits(bits)) => {
                log::debug!("input: {} symbol(s)", bits.len());
                for bit in bits {
                    sink.push(bit);
                }
            }
            Some(ShellCommand::Help) => println!("{HELP}"),
            Some(ShellCommand::Quit) => break Ok(()),
            Some(ShellCommand::Unknown(text)) => {
                log::warn!("ignoring '{text}': expected 0, 1, quit or help");
            }
        }
    };
    log::debug!("console closed");
    close.close();
    result
}
