//! Command loop: reads lines, dispatches to the workspace, writes one reply
//! line per command. Errors become `error: ...` replies and never end the loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use core_state::{EngineError, Workspace};
use tracing::{debug, info};

use crate::command::{CommandParser, ParsedCommand, encode_escapes};

pub const HELP: &str = "commands: new <name> [text] | get <name> | set <name> <text> | \
insert <name> <offset> <text> | delete <name> <start> <end> | undo <name> | redo <name> | \
search <name> <pattern> | complete <prefix> | spell <text> | list | remove <name> | quit";

pub enum Step {
    Reply(String),
    Quit,
}

pub fn execute(ws: &Workspace, command: ParsedCommand) -> Step {
    let reply = match command {
        ParsedCommand::Quit => return Step::Quit,
        ParsedCommand::Empty => return Step::Reply(String::new()),
        ParsedCommand::Help => Ok(HELP.to_string()),
        ParsedCommand::List => Ok(ws.names().join(" ")),
        ParsedCommand::New { name, text } => ws
            .create_document(&name, &text)
            .map(|_| format!("created {name}")),
        ParsedCommand::Get(name) => ws.get_text(&name).map(|t| encode_escapes(&t)),
        ParsedCommand::Set { name, text } => ws.apply_edit(&name, &text).map(|changed| {
            if changed { "ok".to_string() } else { "unchanged".to_string() }
        }),
        ParsedCommand::Insert { name, offset, text } => ws
            .insert(&name, offset, &text)
            .map(|t| encode_escapes(&t)),
        ParsedCommand::Delete { name, start, end } => ws
            .delete(&name, start, end)
            .map(|t| encode_escapes(&t)),
        ParsedCommand::Undo(name) => ws.undo(&name).map(|t| encode_escapes(&t)),
        ParsedCommand::Redo(name) => ws.redo(&name).map(|t| encode_escapes(&t)),
        ParsedCommand::Search { name, pattern } => {
            ws.search_document(&name, &pattern).map(|hits| join_offsets(&hits))
        }
        ParsedCommand::Complete(prefix) => Ok(ws.autocomplete(&prefix).join(" ")),
        ParsedCommand::Spell(text) => Ok(ws.check_spelling(&text).join(" ")),
        ParsedCommand::Remove(name) => ws.remove(&name).map(|_| format!("removed {name}")),
        ParsedCommand::Invalid(hint) => Ok(format!("error: {hint}")),
        ParsedCommand::Unknown(verb) => Ok(format!("error: unknown command `{verb}`")),
    };
    Step::Reply(reply.unwrap_or_else(|e: EngineError| format!("error: {e}")))
}

fn join_offsets(hits: &[usize]) -> String {
    hits.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run until `quit` or end of input. Returns the number of commands handled.
pub fn run<R: BufRead, W: Write>(ws: &Workspace, input: R, mut output: W) -> Result<usize> {
    let mut handled = 0usize;
    for line in input.lines() {
        let command = CommandParser::parse(&line?);
        if command == ParsedCommand::Empty {
            continue;
        }
        handled += 1;
        debug!(target: "runtime.session", verb = command.verb(), "dispatch");
        match execute(ws, command) {
            Step::Reply(reply) => {
                writeln!(output, "{reply}")?;
                output.flush()?;
            }
            Step::Quit => break,
        }
    }
    info!(target: "runtime.session", handled, "session_end");
    Ok(handled)
}
