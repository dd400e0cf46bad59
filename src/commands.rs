//! Line-oriented command parsing for headless mode
//!
//! One command per stdin line. Most commands map directly to a wizard
//! [`Message`]; `blueprints`, `show` and `wait` are handled by the runner.

use cdraft_app::{EditTarget, Message};
use cdraft_core::prelude::*;
use cdraft_core::{ExportFormat, SectionId};

/// A parsed stdin command
#[derive(Debug, Clone)]
pub enum Command {
    /// List the blueprint library
    Blueprints,
    /// Print the current draft as plain text
    Show,
    /// Stop reading input until no timer or write is outstanding
    Wait,
    /// Forward to the engine
    Send(Message),
}

/// Parse one input line; `Ok(None)` for blank lines and `#` comments
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "blueprints" => Command::Blueprints,
        "show" => Command::Show,
        "wait" => Command::Wait,
        "select" => Command::Send(Message::SelectBlueprint { id: parse_id(rest)? }),
        "toggle" => Command::Send(Message::ToggleCount { id: parse_id(rest)? }),
        "add" => Command::Send(Message::AddCustomCount),
        "delete" => Command::Send(Message::DeleteCount { id: parse_id(rest)? }),
        "title" => {
            let (id, title) = split_id_and_text(rest)?;
            Command::Send(Message::EditCountTitle { id, title })
        }
        "describe" => {
            let (id, description) = split_id_and_text(rest)?;
            Command::Send(Message::EditCountDescription { id, description })
        }
        "back" => Command::Send(Message::Back),
        "generate" => Command::Send(Message::Generate),
        "section" => Command::Send(Message::SelectSection {
            id: parse_section(rest)?,
        }),
        "edit" => Command::Send(Message::BeginEdit {
            target: EditTarget::Content(parse_section(rest)?),
        }),
        "edit-title" => {
            let number = rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| Error::command(format!("expected a count number, got '{rest}'")))?;
            Command::Send(Message::BeginEdit {
                target: EditTarget::CountTitle(number),
            })
        }
        "text" => Command::Send(Message::UpdateEditBuffer {
            text: unescape(rest),
        }),
        "commit" => Command::Send(Message::CommitEdit),
        "cancel" => Command::Send(Message::CancelEdit),
        "save" => Command::Send(Message::SaveDraft),
        "export" => {
            let format = if rest.is_empty() {
                None
            } else {
                Some(rest.parse::<ExportFormat>()?)
            };
            Command::Send(Message::ExportDraft { format })
        }
        "dismiss" => Command::Send(Message::DismissNotice),
        "quit" | "q" => Command::Send(Message::Shutdown),
        other => return Err(Error::command(format!("unknown command '{other}'"))),
    };

    Ok(Some(command))
}

fn parse_id(text: &str) -> Result<u32> {
    text.parse()
        .map_err(|_| Error::command(format!("expected a numeric id, got '{text}'")))
}

fn parse_section(text: &str) -> Result<SectionId> {
    if text.is_empty() {
        return Err(Error::command("expected a section id"));
    }
    text.parse()
}

fn split_id_and_text(rest: &str) -> Result<(u32, String)> {
    let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    Ok((parse_id(id)?, unescape(text.trim())))
}

/// Expand `\n` and `\\` so multi-line text fits on one input line
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn send(line: &str) -> Message {
        match parse_command(line).unwrap() {
            Some(Command::Send(msg)) => msg,
            other => panic!("expected a message for '{line}', got {other:?}"),
        }
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert!(parse_command("").unwrap().is_none());
        assert!(parse_command("   ").unwrap().is_none());
        assert!(parse_command("# setup").unwrap().is_none());
    }

    #[test]
    fn test_wizard_commands() {
        assert!(matches!(send("select 1"), Message::SelectBlueprint { id: 1 }));
        assert!(matches!(send("toggle 3"), Message::ToggleCount { id: 3 }));
        assert!(matches!(send("generate"), Message::Generate));
        assert!(matches!(send("quit"), Message::Shutdown));
        assert!(matches!(
            parse_command("blueprints").unwrap(),
            Some(Command::Blueprints)
        ));
    }

    #[test]
    fn test_title_keeps_spaces() {
        match send("title 2 Premises Liability") {
            Message::EditCountTitle { id, title } => {
                assert_eq!(id, 2);
                assert_eq!(title, "Premises Liability");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_section_targets() {
        assert!(matches!(
            send("section count-2"),
            Message::SelectSection {
                id: SectionId::Count(2)
            }
        ));
        assert!(matches!(
            send("edit jury-demand"),
            Message::BeginEdit {
                target: EditTarget::Content(SectionId::JuryDemand)
            }
        ));
        assert!(matches!(
            send("edit-title 1"),
            Message::BeginEdit {
                target: EditTarget::CountTitle(1)
            }
        ));
        assert!(parse_command("edit-title 0").is_err());
        assert!(matches!(
            parse_command("section count-0"),
            Err(Error::SectionNotFound { .. })
        ));
    }

    #[test]
    fn test_text_unescapes_newlines() {
        match send(r"text 12. First.\n\n13. Second \\n") {
            Message::UpdateEditBuffer { text } => {
                assert_eq!(text, "12. First.\n\n13. Second \\n");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_export_format() {
        assert!(matches!(
            send("export"),
            Message::ExportDraft { format: None }
        ));
        assert!(matches!(
            send("export md"),
            Message::ExportDraft {
                format: Some(ExportFormat::Markdown)
            }
        ));
        assert!(matches!(
            parse_command("export docx"),
            Err(Error::UnknownExportFormat(_))
        ));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(parse_command("fly"), Err(Error::Command { .. })));
        assert!(matches!(
            parse_command("toggle abc"),
            Err(Error::Command { .. })
        ));
        assert!(parse_command("select").is_err());
    }
}
