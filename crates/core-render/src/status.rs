//! Status line and command line composition (spec §4.5). Kept as a
//! two-stage pipeline — build segments, then render them — so a caller
//! can introspect what would be shown without re-deriving the string.

use core_state::Mode;

/// Everything the status line needs that isn't already visible as plain
/// `Buffer` fields; `core-render` has no dependency on `core-actions`, so
/// the caller (the main loop) hands over the few extras (yank count)
/// that live in the dispatcher's registers instead.
pub struct StatusContext<'a> {
    pub syntax_name: Option<&'a str>,
    pub modified: bool,
    pub readonly: bool,
    pub use_spaces: bool,
    pub tabstop: u8,
    pub yank_lines: usize,
    pub auto_indent: bool,
    pub file_name: Option<&'a str>,
    pub line_no: usize,
    pub line_count: usize,
    pub col_no: usize,
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment {
    FileName(String),
    SyntaxName(String),
    Modified,
    ReadOnly,
    Indent(String),
    YankCount(usize),
    AutoIndent,
}

/// Build the ordered left-hand segment list (spec §4.5: "syntax name,
/// `[+]`, `[ro]`, tabs/spaces indicator, yank count, indent flag").
pub fn compose_status(ctx: &StatusContext) -> Vec<StatusSegment> {
    let mut segs = Vec::with_capacity(6);
    segs.push(StatusSegment::FileName(truncate_filename(ctx.file_name, ctx.width / 3)));
    if let Some(name) = ctx.syntax_name {
        segs.push(StatusSegment::SyntaxName(name.to_string()));
    }
    if ctx.modified {
        segs.push(StatusSegment::Modified);
    }
    if ctx.readonly {
        segs.push(StatusSegment::ReadOnly);
    }
    let indent = if ctx.use_spaces {
        format!("spaces:{}", ctx.tabstop)
    } else {
        format!("tabs:{}", ctx.tabstop)
    };
    segs.push(StatusSegment::Indent(indent));
    if ctx.yank_lines > 0 {
        segs.push(StatusSegment::YankCount(ctx.yank_lines));
    }
    if ctx.auto_indent {
        segs.push(StatusSegment::AutoIndent);
    }
    segs
}

/// Render the left-hand segments plus the right-aligned `Line L/N Col C`
/// field, padded/truncated to `ctx.width` columns.
pub fn format_status(ctx: &StatusContext, segs: &[StatusSegment]) -> String {
    let mut left = String::new();
    for seg in segs {
        if !left.is_empty() {
            left.push(' ');
        }
        match seg {
            StatusSegment::FileName(name) => left.push_str(name),
            StatusSegment::SyntaxName(name) => left.push_str(name),
            StatusSegment::Modified => left.push_str("[+]"),
            StatusSegment::ReadOnly => left.push_str("[ro]"),
            StatusSegment::Indent(label) => left.push_str(label),
            StatusSegment::YankCount(n) => {
                use std::fmt::Write as _;
                let _ = write!(left, "{n} yanked");
            }
            StatusSegment::AutoIndent => left.push_str("ai"),
        }
    }
    let right = format!("Line {}/{} Col {}", ctx.line_no, ctx.line_count, ctx.col_no);
    pad_between(&left, &right, ctx.width)
}

/// Truncate a file name from the left with a `<` prefix if it would
/// overflow `max_width`; `[No Name]` for an unsaved buffer.
fn truncate_filename(file_name: Option<&str>, max_width: usize) -> String {
    let name = file_name.unwrap_or("[No Name]");
    if name.chars().count() <= max_width || max_width == 0 {
        return name.to_string();
    }
    let keep = max_width.saturating_sub(1);
    let tail: String = name.chars().rev().take(keep).collect::<Vec<_>>().into_iter().rev().collect();
    format!("<{tail}")
}

fn pad_between(left: &str, right: &str, width: usize) -> String {
    let left_len = left.chars().count();
    let right_len = right.chars().count();
    if left_len + right_len >= width {
        return format!("{left} {right}");
    }
    let gap = width - left_len - right_len;
    format!("{left}{}{right}", " ".repeat(gap))
}

/// The command-line row (spec §4.5): the current mode's label, an open
/// `:`/`/`/`?` prompt echo, or a transient status/error message.
pub enum CommandLine<'a> {
    Mode(Mode),
    Prompt(&'a str),
    Message(&'a str),
}

pub fn format_command_line(content: &CommandLine<'_>) -> String {
    match content {
        CommandLine::Mode(mode) => mode.label().to_string(),
        CommandLine::Prompt(text) => text.to_string(),
        CommandLine::Message(text) => text.to_string(),
    }
}
