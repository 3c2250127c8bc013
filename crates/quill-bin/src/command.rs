//! Line command parsing for the shell.
//!
//! Converts one input line into a `ParsedCommand`. Parsing is pure: no
//! workspace access, no I/O. Free-text arguments (document text, fragments,
//! patterns) run to the end of the line with their spacing intact, and the
//! escapes `\n`, `\t` and `\\` are decoded.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    New { name: String, text: String },
    Get(String),
    Set { name: String, text: String },
    Insert { name: String, offset: usize, text: String },
    Delete { name: String, start: usize, end: usize },
    Undo(String),
    Redo(String),
    Search { name: String, pattern: String },
    Complete(String),
    Spell(String),
    List,
    Remove(String),
    Help,
    Quit,
    Empty,
    /// Known verb, malformed arguments; carries a usage hint.
    Invalid(String),
    Unknown(String),
}

impl ParsedCommand {
    /// Verb name for logging; never includes arguments.
    pub fn verb(&self) -> &'static str {
        match self {
            ParsedCommand::New { .. } => "new",
            ParsedCommand::Get(_) => "get",
            ParsedCommand::Set { .. } => "set",
            ParsedCommand::Insert { .. } => "insert",
            ParsedCommand::Delete { .. } => "delete",
            ParsedCommand::Undo(_) => "undo",
            ParsedCommand::Redo(_) => "redo",
            ParsedCommand::Search { .. } => "search",
            ParsedCommand::Complete(_) => "complete",
            ParsedCommand::Spell(_) => "spell",
            ParsedCommand::List => "list",
            ParsedCommand::Remove(_) => "remove",
            ParsedCommand::Help => "help",
            ParsedCommand::Quit => "quit",
            ParsedCommand::Empty => "empty",
            ParsedCommand::Invalid(_) => "invalid",
            ParsedCommand::Unknown(_) => "unknown",
        }
    }
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let line = raw.trim_end_matches(['\r', '\n']);
        let Some((verb, rest)) = next_token(line) else {
            return ParsedCommand::Empty;
        };
        match verb {
            "quit" | "exit" => ParsedCommand::Quit,
            "help" => ParsedCommand::Help,
            "list" => ParsedCommand::List,
            "new" => match next_token(rest) {
                Some((name, text)) => ParsedCommand::New {
                    name: name.to_string(),
                    text: decode_escapes(text),
                },
                None => usage("new <name> [text]"),
            },
            "set" => match next_token(rest) {
                Some((name, text)) => ParsedCommand::Set {
                    name: name.to_string(),
                    text: decode_escapes(text),
                },
                None => usage("set <name> <text>"),
            },
            "get" => single_name(rest, ParsedCommand::Get, "get <name>"),
            "undo" => single_name(rest, ParsedCommand::Undo, "undo <name>"),
            "redo" => single_name(rest, ParsedCommand::Redo, "redo <name>"),
            "remove" => single_name(rest, ParsedCommand::Remove, "remove <name>"),
            "insert" => {
                let parsed = next_token(rest).and_then(|(name, rest)| {
                    let (offset, text) = next_token(rest)?;
                    Some(ParsedCommand::Insert {
                        name: name.to_string(),
                        offset: offset.parse().ok()?,
                        text: decode_escapes(text),
                    })
                });
                parsed.unwrap_or_else(|| usage("insert <name> <offset> <text>"))
            }
            "delete" => {
                let parsed = next_token(rest).and_then(|(name, rest)| {
                    let (start, rest) = next_token(rest)?;
                    let (end, _) = next_token(rest)?;
                    Some(ParsedCommand::Delete {
                        name: name.to_string(),
                        start: start.parse().ok()?,
                        end: end.parse().ok()?,
                    })
                });
                parsed.unwrap_or_else(|| usage("delete <name> <start> <end>"))
            }
            "search" => match next_token(rest) {
                Some((name, pattern)) => ParsedCommand::Search {
                    name: name.to_string(),
                    pattern: decode_escapes(pattern),
                },
                None => usage("search <name> <pattern>"),
            },
            "complete" => ParsedCommand::Complete(rest.trim().to_string()),
            "spell" => ParsedCommand::Spell(decode_escapes(rest)),
            other => ParsedCommand::Unknown(other.to_string()),
        }
    }
}

fn usage(hint: &str) -> ParsedCommand {
    ParsedCommand::Invalid(format!("usage: {hint}"))
}

fn single_name(rest: &str, make: fn(String) -> ParsedCommand, hint: &str) -> ParsedCommand {
    match next_token(rest) {
        Some((name, _)) => make(name.to_string()),
        None => usage(hint),
    }
}

/// Split off the next space-delimited token. The remainder keeps everything
/// after the single separating space.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start_matches(' ');
    if s.is_empty() {
        return None;
    }
    match s.find(' ') {
        Some(idx) => Some((&s[..idx], &s[idx + 1..])),
        None => Some((s, "")),
    }
}

pub fn decode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Inverse of [`decode_escapes`], used to keep replies on one line.
pub fn encode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit() {
        assert_eq!(CommandParser::parse("quit"), ParsedCommand::Quit);
        assert_eq!(CommandParser::parse("exit\n"), ParsedCommand::Quit);
    }

    #[test]
    fn parse_empty_line() {
        assert_eq!(CommandParser::parse("   "), ParsedCommand::Empty);
    }

    #[test]
    fn parse_new_keeps_text_spacing() {
        assert_eq!(
            CommandParser::parse("new notes Welcome to  the Editor."),
            ParsedCommand::New {
                name: "notes".into(),
                text: "Welcome to  the Editor.".into()
            }
        );
        assert_eq!(
            CommandParser::parse("new blank"),
            ParsedCommand::New {
                name: "blank".into(),
                text: String::new()
            }
        );
    }

    #[test]
    fn parse_insert_preserves_trailing_space() {
        assert_eq!(
            CommandParser::parse("insert notes 8 back "),
            ParsedCommand::Insert {
                name: "notes".into(),
                offset: 8,
                text: "back ".into()
            }
        );
    }

    #[test]
    fn parse_insert_rejects_bad_offset() {
        assert_eq!(
            CommandParser::parse("insert notes eight x"),
            ParsedCommand::Invalid("usage: insert <name> <offset> <text>".into())
        );
    }

    #[test]
    fn parse_delete() {
        assert_eq!(
            CommandParser::parse("delete notes 8 13"),
            ParsedCommand::Delete {
                name: "notes".into(),
                start: 8,
                end: 13
            }
        );
        assert!(matches!(
            CommandParser::parse("delete notes 8"),
            ParsedCommand::Invalid(_)
        ));
    }

    #[test]
    fn parse_set_decodes_escapes() {
        assert_eq!(
            CommandParser::parse(r"set d line one\nline\ttwo \\ done"),
            ParsedCommand::Set {
                name: "d".into(),
                text: "line one\nline\ttwo \\ done".into()
            }
        );
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            CommandParser::parse("frobnicate x"),
            ParsedCommand::Unknown("frobnicate".into())
        );
    }

    #[test]
    fn escapes_round_trip() {
        let s = "a\nb\tc\\d";
        assert_eq!(decode_escapes(&encode_escapes(s)), s);
    }
}
