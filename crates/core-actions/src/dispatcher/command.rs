//! The `:`/`/`/`?` prompt (spec §4.8, §6): accumulates the prompt
//! buffer a character at a time, then executes it on Enter.

use thiserror::Error;

use core_keymap::Action;
use core_state::Buffer;

use super::command_parser::{CommandParser, ParsedCommand, SubstituteRange};
use super::{DispatchOutcome, EditorContext, Prompt};
use crate::{io_ops, search};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no file name")]
    NoFileName,
    #[error("{0}")]
    Io(#[from] anyhow::Error),
}

pub(crate) fn handle_prompt_action(action: Action, ctx: &mut EditorContext) -> DispatchOutcome {
    match action {
        Action::Escape => {
            ctx.prompt = Prompt::None;
            DispatchOutcome::dirty()
        }
        Action::Literal('\r') | Action::Literal('\n') => submit(ctx),
        Action::Literal('\u{7f}') | Action::Literal('\u{8}') => {
            backspace_prompt(ctx);
            DispatchOutcome::dirty()
        }
        Action::Literal(c) => {
            push_prompt(ctx, c);
            DispatchOutcome::dirty()
        }
        _ => DispatchOutcome::clean(),
    }
}

fn push_prompt(ctx: &mut EditorContext, c: char) {
    match &mut ctx.prompt {
        Prompt::Command(s) | Prompt::SearchForward(s) | Prompt::SearchBackward(s) => s.push(c),
        Prompt::None => {}
    }
    if let Prompt::SearchForward(s) | Prompt::SearchBackward(s) = &ctx.prompt {
        let needle: Vec<char> = s.chars().collect();
        search::mark_matches(ctx.model.registry.active_mut(), &needle);
    }
}

fn backspace_prompt(ctx: &mut EditorContext) {
    match &mut ctx.prompt {
        Prompt::Command(s) | Prompt::SearchForward(s) | Prompt::SearchBackward(s) => {
            s.pop();
        }
        Prompt::None => {}
    }
}

fn submit(ctx: &mut EditorContext) -> DispatchOutcome {
    let prompt = std::mem::replace(&mut ctx.prompt, Prompt::None);
    match prompt {
        Prompt::Command(raw) => {
            ctx.command_history.push(raw.clone());
            let parsed = CommandParser::parse(&raw);
            execute_command(parsed, ctx);
        }
        Prompt::SearchForward(needle) => run_search(ctx, needle, true),
        Prompt::SearchBackward(needle) => run_search(ctx, needle, false),
        Prompt::None => {}
    }
    DispatchOutcome::dirty()
}

fn run_search(ctx: &mut EditorContext, raw: String, forward: bool) {
    let needle: Vec<char> = raw.chars().collect();
    let found = if forward {
        search::find_forward(ctx.model.registry.active(), &needle)
    } else {
        search::find_backward(ctx.model.registry.active(), &needle)
    };
    if let Some((line, col)) = found {
        let buffer = ctx.model.registry.active_mut();
        buffer.line_no = line;
        buffer.col_no = col;
        buffer.search_needle = Some(needle.clone());
    } else {
        ctx.status_message = Some(format!("pattern not found: {raw}"));
    }
    ctx.search = super::SearchState { needle: Some(needle), forward };
}

fn execute_command(cmd: ParsedCommand, ctx: &mut EditorContext) {
    match cmd {
        ParsedCommand::Quit { force } => try_quit(ctx, force),
        ParsedCommand::QuitAll { force } => {
            if force || !any_buffer_modified(ctx) {
                for buffer in ctx.model.registry.iter() {
                    if let Some(path) = buffer.file_name.clone() {
                        ctx.config.record_cursor(path, buffer.line_no, buffer.col_no);
                    }
                }
                if let Err(e) = ctx.config.save() {
                    ctx.status_message = Some(format!("failed to save biminfo: {e}"));
                }
                ctx.quit = true;
            } else {
                ctx.status_message = Some("E37: No write since last change".to_string());
            }
        }
        ParsedCommand::Write { force: _, path } => {
            if let Err(e) = do_write(ctx, path) {
                ctx.status_message = Some(e.to_string());
            }
        }
        ParsedCommand::WriteQuit { force } => {
            if do_write(ctx, None).is_ok() {
                try_quit(ctx, force);
            }
        }
        ParsedCommand::Edit { force, path } => {
            if let Some(path) = path {
                if force || !ctx.model.registry.active().modified() {
                    match io_ops::open_file_restoring_cursor(&path, &ctx.config) {
                        Ok(buffer) => {
                            ctx.model.open_tab(buffer);
                        }
                        Err(e) => ctx.status_message = Some(e.to_string()),
                    }
                } else {
                    ctx.status_message = Some("E37: No write since last change".to_string());
                }
            }
        }
        ParsedCommand::TabNew(path) => {
            let buffer = match path {
                Some(p) => io_ops::open_file_restoring_cursor(&p, &ctx.config)
                    .unwrap_or_else(|_| Buffer::with_file_name(p)),
                None => Buffer::new(),
            };
            ctx.model.open_tab(buffer);
        }
        ParsedCommand::TabNext => cycle_tab(ctx, 1),
        ParsedCommand::TabPrev => cycle_tab(ctx, -1),
        ParsedCommand::Split | ParsedCommand::VSplit => ctx.model.self_split(),
        ParsedCommand::Set { option, value } => apply_set(ctx, &option, value),
        ParsedCommand::NoHighlight => {
            search::clear_matches(ctx.model.registry.active_mut());
            ctx.model.registry.active_mut().search_needle = None;
        }
        ParsedCommand::GotoLine(n) => {
            let buffer = ctx.model.registry.active_mut();
            buffer.line_no = (n as usize).clamp(1, buffer.line_count());
            buffer.col_no = 1;
        }
        ParsedCommand::Substitute { range, pattern, replacement, global, ignore_case } => {
            apply_substitute(ctx, range, &pattern, &replacement, global, ignore_case);
        }
        ParsedCommand::Unknown(raw) => {
            ctx.status_message = Some(format!("E492: not an editor command: {raw}"));
        }
    }
}

fn try_quit(ctx: &mut EditorContext, force: bool) {
    if force || !ctx.model.registry.active().modified() {
        record_and_save_cursor(ctx);
        if !ctx.model.close_active() {
            ctx.quit = true;
        }
    } else {
        ctx.status_message = Some("E37: No write since last change".to_string());
    }
}

/// Persist the active buffer's cursor into `~/.biminfo` (spec §6) so the
/// next `:e`/startup on the same file can restore it. A buffer with no
/// file name (a scratch buffer) has nothing to key the record on.
fn record_and_save_cursor(ctx: &mut EditorContext) {
    let buffer = ctx.model.registry.active();
    let Some(path) = buffer.file_name.clone() else { return };
    let (line, col) = (buffer.line_no, buffer.col_no);
    ctx.config.record_cursor(path, line, col);
    if let Err(e) = ctx.config.save() {
        ctx.status_message = Some(format!("failed to save biminfo: {e}"));
    }
}

fn any_buffer_modified(ctx: &EditorContext) -> bool {
    ctx.model.registry.iter().any(|b| b.modified())
}

fn do_write(ctx: &mut EditorContext, path: Option<String>) -> Result<(), CommandError> {
    let buffer = ctx.model.registry.active_mut();
    let target = path.or_else(|| buffer.file_name.clone()).ok_or(CommandError::NoFileName)?;
    io_ops::write_file(buffer, &target)?;
    buffer.file_name = Some(target);
    Ok(())
}

fn cycle_tab(ctx: &mut EditorContext, delta: i32) {
    let len = ctx.model.registry.len();
    if len <= 1 {
        return;
    }
    let cur = ctx.model.registry.active_index() as i32;
    let next = (cur + delta).rem_euclid(len as i32) as usize;
    ctx.model.registry.set_active(next);
}

fn apply_set(ctx: &mut EditorContext, option: &str, value: Option<String>) {
    let buffer = ctx.model.registry.active_mut();
    match option {
        "number" | "nu" => {}
        "ts" | "tabstop" => {
            if let Some(v) = value.and_then(|v| v.parse().ok()) {
                buffer.tabstop = v;
                for i in 0..buffer.line_count() {
                    if let Some(l) = buffer.lines.get_mut(i) {
                        l.recompute_widths(buffer.tabstop);
                    }
                }
            }
        }
        "expandtab" | "et" => buffer.use_spaces = true,
        "noexpandtab" | "noet" => buffer.use_spaces = false,
        "autoindent" | "ai" => buffer.auto_indent = true,
        "noautoindent" | "noai" => buffer.auto_indent = false,
        "readonly" | "ro" => buffer.readonly = true,
        _ => {
            ctx.status_message = Some(format!("E518: Unknown option: {option}"));
        }
    }
}

fn apply_substitute(
    ctx: &mut EditorContext,
    range: SubstituteRange,
    pattern: &str,
    replacement: &str,
    global: bool,
    ignore_case: bool,
) {
    if pattern.is_empty() {
        return;
    }
    let buffer = ctx.model.registry.active_mut();
    let (lo, hi) = match range {
        SubstituteRange::CurrentLine => (buffer.line_no - 1, buffer.line_no - 1),
        SubstituteRange::WholeFile => (0, buffer.line_count() - 1),
    };
    for idx in lo..=hi {
        let Some(text) = buffer.lines.get(idx).map(|l| l.to_text()) else { continue };
        let replaced = substitute_line(&text, pattern, replacement, global, ignore_case);
        if replaced != text {
            let new_line = core_text::Line::from_str(&replaced);
            buffer.replace_line(idx, &new_line);
        }
    }
}

fn substitute_line(text: &str, pattern: &str, replacement: &str, global: bool, ignore_case: bool) -> String {
    let needle: Vec<char> = pattern.chars().collect();
    let hay: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    let mut did_one = false;
    while i < hay.len() {
        let matches = !did_one || global;
        if matches && matches_at(&hay, &needle, i, ignore_case) {
            out.push_str(replacement);
            i += needle.len().max(1);
            did_one = true;
        } else {
            out.push(hay[i]);
            i += 1;
        }
    }
    out
}

fn matches_at(hay: &[char], needle: &[char], start: usize, ignore_case: bool) -> bool {
    if needle.is_empty() || start + needle.len() > hay.len() {
        return false;
    }
    hay[start..start + needle.len()].iter().zip(needle).all(|(a, b)| {
        if ignore_case {
            a.to_lowercase().eq(b.to_lowercase())
        } else {
            a == b
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Model;

    fn ctx_with(lines: &[&str]) -> EditorContext {
        let mut model = Model::new();
        let buffer = model.registry.active_mut();
        for (i, text) in lines.iter().enumerate() {
            if i > 0 {
                buffer.add_line(i);
            }
            for (j, cp) in text.chars().enumerate() {
                buffer.insert(i, j, cp);
            }
        }
        EditorContext::new(model)
    }

    #[test]
    fn quit_on_unmodified_buffer_sets_quit_flag() {
        let mut ctx = ctx_with(&["hello"]);
        execute_command(ParsedCommand::Quit { force: false }, &mut ctx);
        assert!(ctx.quit);
    }

    #[test]
    fn substitute_replaces_first_match_by_default() {
        let mut ctx = ctx_with(&["foo foo"]);
        execute_command(
            ParsedCommand::Substitute {
                range: SubstituteRange::CurrentLine,
                pattern: "foo".to_string(),
                replacement: "bar".to_string(),
                global: false,
                ignore_case: false,
            },
            &mut ctx,
        );
        assert_eq!(ctx.model.registry.active_mut().current_line().to_text(), "bar foo");
    }

    #[test]
    fn substitute_global_replaces_every_match() {
        let mut ctx = ctx_with(&["foo foo"]);
        execute_command(
            ParsedCommand::Substitute {
                range: SubstituteRange::CurrentLine,
                pattern: "foo".to_string(),
                replacement: "bar".to_string(),
                global: true,
                ignore_case: false,
            },
            &mut ctx,
        );
        assert_eq!(ctx.model.registry.active_mut().current_line().to_text(), "bar bar");
    }

    #[test]
    fn unknown_command_sets_status_message() {
        let mut ctx = ctx_with(&["x"]);
        execute_command(ParsedCommand::Unknown("bogus".to_string()), &mut ctx);
        assert!(ctx.status_message.is_some());
    }
}
