//! `:`-command parsing (spec §6): a hand-rolled line parser, not a
//! grammar — grounded on the teacher's head/tail command split, extended
//! with this spec's `:set`/`:s///` forms.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstituteRange {
    CurrentLine,
    WholeFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Quit { force: bool },
    QuitAll { force: bool },
    Write { force: bool, path: Option<String> },
    WriteQuit { force: bool },
    Edit { force: bool, path: Option<String> },
    TabNew(Option<String>),
    TabNext,
    TabPrev,
    Split,
    VSplit,
    Set { option: String, value: Option<String> },
    NoHighlight,
    GotoLine(u32),
    Substitute {
        range: SubstituteRange,
        pattern: String,
        replacement: String,
        global: bool,
        ignore_case: bool,
    },
    Unknown(String),
}

fn split_head(raw: &str) -> (&str, &str) {
    match raw.find(char::is_whitespace) {
        Some(i) => (&raw[..i], raw[i..].trim_start()),
        None => (raw, ""),
    }
}

fn parse_path(rest: &str) -> Option<String> {
    let rest = rest.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

fn parse_substitute(raw: &str) -> Option<ParsedCommand> {
    let (range, body) = if let Some(b) = raw.strip_prefix("%s") {
        (SubstituteRange::WholeFile, b)
    } else if let Some(b) = raw.strip_prefix('s') {
        (SubstituteRange::CurrentLine, b)
    } else {
        return None;
    };
    let mut chars = body.chars();
    let delim = chars.next()?;
    if delim.is_alphanumeric() {
        return None;
    }
    let rest: String = chars.collect();
    let parts: Vec<&str> = rest.splitn(3, delim).collect();
    let pattern = parts.first().copied().unwrap_or("").to_string();
    let replacement = parts.get(1).copied().unwrap_or("").to_string();
    let flags = parts.get(2).copied().unwrap_or("");
    Some(ParsedCommand::Substitute {
        range,
        pattern,
        replacement,
        global: flags.contains('g'),
        ignore_case: flags.contains('i'),
    })
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let raw = raw.strip_prefix(':').unwrap_or(raw);
        if raw.is_empty() {
            return ParsedCommand::Unknown(String::new());
        }
        if let Some(n) = raw.parse::<u32>().ok() {
            return ParsedCommand::GotoLine(n);
        }
        if let Some(cmd) = parse_substitute(raw) {
            return cmd;
        }
        let (head, tail) = split_head(raw);
        match head {
            "q" => ParsedCommand::Quit { force: false },
            "q!" => ParsedCommand::Quit { force: true },
            "qa" => ParsedCommand::QuitAll { force: false },
            "qa!" => ParsedCommand::QuitAll { force: true },
            "w" => ParsedCommand::Write { force: false, path: parse_path(tail) },
            "w!" => ParsedCommand::Write { force: true, path: parse_path(tail) },
            "wq" => ParsedCommand::WriteQuit { force: false },
            "wq!" => ParsedCommand::WriteQuit { force: true },
            "e" => ParsedCommand::Edit { force: false, path: parse_path(tail) },
            "e!" => ParsedCommand::Edit { force: true, path: parse_path(tail) },
            "tabnew" => ParsedCommand::TabNew(parse_path(tail)),
            "tabn" => ParsedCommand::TabNext,
            "tabp" => ParsedCommand::TabPrev,
            "split" => ParsedCommand::Split,
            "vsplit" => ParsedCommand::VSplit,
            "noh" => ParsedCommand::NoHighlight,
            "set" => {
                let mut parts = tail.splitn(2, '=');
                let option = parts.next().unwrap_or("").trim().to_string();
                let value = parts.next().map(|v| v.trim().to_string());
                ParsedCommand::Set { option, value }
            }
            _ => ParsedCommand::Unknown(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quit_and_force_quit() {
        assert_eq!(CommandParser::parse(":q"), ParsedCommand::Quit { force: false });
        assert_eq!(CommandParser::parse(":q!"), ParsedCommand::Quit { force: true });
    }

    #[test]
    fn parses_write_with_path() {
        assert_eq!(
            CommandParser::parse(":w notes.txt"),
            ParsedCommand::Write { force: false, path: Some("notes.txt".to_string()) }
        );
    }

    #[test]
    fn parses_set_with_value() {
        assert_eq!(
            CommandParser::parse(":set tabstop=4"),
            ParsedCommand::Set { option: "tabstop".to_string(), value: Some("4".to_string()) }
        );
    }

    #[test]
    fn parses_set_without_value() {
        assert_eq!(
            CommandParser::parse(":set number"),
            ParsedCommand::Set { option: "number".to_string(), value: None }
        );
    }

    #[test]
    fn parses_goto_line() {
        assert_eq!(CommandParser::parse(":42"), ParsedCommand::GotoLine(42));
    }

    #[test]
    fn parses_substitute_whole_file_with_flags() {
        assert_eq!(
            CommandParser::parse(":%s/foo/bar/gi"),
            ParsedCommand::Substitute {
                range: SubstituteRange::WholeFile,
                pattern: "foo".to_string(),
                replacement: "bar".to_string(),
                global: true,
                ignore_case: true,
            }
        );
    }

    #[test]
    fn parses_substitute_current_line() {
        assert_eq!(
            CommandParser::parse(":s/a/b/"),
            ParsedCommand::Substitute {
                range: SubstituteRange::CurrentLine,
                pattern: "a".to_string(),
                replacement: "b".to_string(),
                global: false,
                ignore_case: false,
            }
        );
    }

    #[test]
    fn unknown_command_is_preserved_verbatim() {
        assert_eq!(CommandParser::parse(":bogus"), ParsedCommand::Unknown("bogus".to_string()));
    }
}
