//! Character/line mutation (spec §4.7): the single-key edits (`x`, `dd`,
//! `yy`, `dw`), the selection-mode range ops (`d`/`y`/Tab/Shift-Tab), and
//! plain character insertion.

use core_keymap::Action;
use core_state::{Mode, Yank};
use core_text::Line;

use super::{DispatchOutcome, EditorContext};
use crate::{indent, paste};

pub(crate) fn handle_edit(action: Action, ctx: &mut EditorContext) -> DispatchOutcome {
    match action {
        Action::DeleteCharUnderCursor => delete_char_under_cursor(ctx),
        Action::DeleteLine => delete_line(ctx),
        Action::YankLine => yank_line(ctx),
        Action::DeleteWord => delete_word(ctx),
        Action::DeleteRange => delete_range(ctx, true),
        Action::YankRange => delete_range(ctx, false),
        Action::IndentRange => indent_selection(ctx, true),
        Action::UnindentRange => indent_selection(ctx, false),
        Action::PasteAfter => {
            if let Some(yank) = ctx.model.registers.get().cloned() {
                paste::paste_after(ctx.model.registry.active_mut(), &yank);
            }
        }
        Action::PasteBefore => {
            if let Some(yank) = ctx.model.registers.get().cloned() {
                paste::paste_before(ctx.model.registry.active_mut(), &yank);
            }
        }
        Action::ReplaceChar(c) => replace_char(ctx, c),
        Action::Literal(c) => insert_literal(ctx, c),
        _ => {}
    }
    DispatchOutcome::dirty()
}

fn delete_char_under_cursor(ctx: &mut EditorContext) {
    let buffer = ctx.model.registry.active_mut();
    let idx = buffer.line_no - 1;
    let col = buffer.col_no;
    buffer.delete(idx, col);
    buffer.clamp_cursor();
}

fn delete_line(ctx: &mut EditorContext) {
    let buffer = ctx.model.registry.active_mut();
    let idx = buffer.line_no - 1;
    if let Some(line) = buffer.lines.get(idx).cloned() {
        ctx.model.registers.set(Yank::Lines(vec![line]));
    }
    buffer.remove_line(idx);
    buffer.clamp_cursor();
}

fn yank_line(ctx: &mut EditorContext) {
    let buffer = ctx.model.registry.active_mut();
    let idx = buffer.line_no - 1;
    if let Some(line) = buffer.lines.get(idx).cloned() {
        ctx.model.registers.set(Yank::Lines(vec![line]));
    }
}

/// `dw`: delete from the cursor to the start of the next word on the
/// same line (doesn't cross a line boundary, unlike the `w` motion).
fn delete_word(ctx: &mut EditorContext) {
    let buffer = ctx.model.registry.active_mut();
    let idx = buffer.line_no - 1;
    let start = buffer.col_no - 1;
    let Some(line) = buffer.lines.get(idx) else { return };
    let chars: Vec<char> = line.cells().iter().map(|c| c.codepoint).collect();
    if start >= chars.len() {
        return;
    }
    let start_class = classify(chars[start]);
    let mut end = start;
    while end < chars.len() && classify(chars[end]) == start_class {
        end += 1;
    }
    while end < chars.len() && chars[end].is_whitespace() {
        end += 1;
    }
    let text: String = chars[start..end].iter().collect();
    ctx.model.registers.set(Yank::Range(vec![Line::from_str(&text)]));
    for _ in start..end {
        buffer.delete(idx, start + 1);
    }
    buffer.clamp_cursor();
}

#[derive(PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Word,
    Punct,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

fn replace_char(ctx: &mut EditorContext, c: char) {
    let buffer = ctx.model.registry.active_mut();
    let idx = buffer.line_no - 1;
    let col = buffer.col_no - 1;
    buffer.replace(idx, col, c);
}

fn insert_literal(ctx: &mut EditorContext, c: char) {
    let col_insert_anchor = ctx.col_insert.as_ref().map(|s| s.anchor_line);
    let buffer = ctx.model.registry.active_mut();
    let idx = buffer.line_no - 1;
    let col = buffer.col_no - 1;
    match buffer.mode {
        Mode::Replace => {
            if buffer.current_line().cell(col).is_some() {
                buffer.replace(idx, col, c);
            } else {
                buffer.insert(idx, col, c);
            }
            buffer.col_no += 1;
        }
        Mode::Insert | Mode::ColInsert => {
            buffer.insert(idx, col, c);
            buffer.col_no += 1;
            if matches!(buffer.mode, Mode::ColInsert) && Some(buffer.line_no) == col_insert_anchor {
                if let Some(state) = ctx.col_insert.as_mut() {
                    state.inserted.push(c);
                }
            }
        }
        _ => {}
    }
    buffer.clamp_cursor();
}

/// The 1-based, document-ordered bounds of the active selection: the
/// anchor and the live cursor, normalized so the first pair precedes
/// the second.
fn selection_bounds(ctx: &EditorContext) -> Option<(usize, usize, usize, usize)> {
    let buffer = ctx.model.registry.active();
    let sel = buffer.selection?;
    let (a, b) = ((sel.start_line, sel.sel_col), (buffer.line_no, buffer.col_no));
    Some(if a <= b { (a.0, a.1, b.0, b.1) } else { (b.0, b.1, a.0, a.1) })
}

fn delete_range(ctx: &mut EditorContext, remove: bool) {
    let Some((sl, sc, el, ec)) = selection_bounds(ctx) else { return };
    let mode = ctx.model.registry.active().mode;
    let buffer = ctx.model.registry.active_mut();

    match mode {
        Mode::LineSelection => {
            let lines: Vec<Line> = (sl..=el)
                .filter_map(|l| buffer.lines.get(l - 1).cloned())
                .collect();
            ctx.model.registers.set(Yank::Lines(lines));
            if remove {
                for _ in sl..=el {
                    ctx.model.registry.active_mut().remove_line(sl - 1);
                }
            }
        }
        _ => {
            let yanked = yank_char_range(buffer, sl, sc, el, ec);
            ctx.model.registers.set(Yank::Range(yanked));
            if remove {
                if sl == el {
                    let n = ec - sc + 1;
                    for _ in 0..n {
                        buffer.delete(sl - 1, sc);
                    }
                } else {
                    let start_idx = sl - 1;
                    let start_len = buffer.lines.get(start_idx).map(|l| l.len()).unwrap_or(0);
                    for _ in 0..(start_len.saturating_sub(sc - 1)) {
                        buffer.delete(start_idx, sc);
                    }
                    for _ in 0..(el - sl).saturating_sub(1) {
                        buffer.remove_line(start_idx + 1);
                    }
                    for _ in 0..ec {
                        buffer.delete(start_idx + 1, 1);
                    }
                    buffer.merge_lines(start_idx + 1);
                }
            }
        }
    }
    let buffer = ctx.model.registry.active_mut();
    buffer.line_no = sl;
    buffer.col_no = sc;
    buffer.mode = Mode::Normal;
    buffer.selection = None;
    buffer.clamp_cursor();
}

fn yank_char_range(
    buffer: &core_state::Buffer,
    sl: usize,
    sc: usize,
    el: usize,
    ec: usize,
) -> Vec<Line> {
    if sl == el {
        let text: String = buffer
            .lines
            .get(sl - 1)
            .map(|l| l.cells()[sc - 1..ec.min(l.len())].iter().map(|c| c.codepoint).collect())
            .unwrap_or_default();
        return vec![Line::from_str(&text)];
    }
    let mut out = Vec::new();
    if let Some(l) = buffer.lines.get(sl - 1) {
        let text: String = l.cells()[(sc - 1).min(l.len())..].iter().map(|c| c.codepoint).collect();
        out.push(Line::from_str(&text));
    }
    for idx in sl..(el - 1) {
        if let Some(l) = buffer.lines.get(idx) {
            out.push(Line::from_str(&l.to_text()));
        }
    }
    if let Some(l) = buffer.lines.get(el - 1) {
        let text: String = l.cells()[..ec.min(l.len())].iter().map(|c| c.codepoint).collect();
        out.push(Line::from_str(&text));
    }
    out
}

fn indent_selection(ctx: &mut EditorContext, grow: bool) {
    let Some((sl, _, el, _)) = selection_bounds(ctx) else { return };
    let buffer = ctx.model.registry.active_mut();
    if grow {
        indent::indent_range(buffer, sl, el);
    } else {
        indent::unindent_range(buffer, sl, el);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Model;
    use core_state::Selection;

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
    fn delete_char_under_cursor_removes_one_cell() {
        let mut ctx = ctx_with(&["abc"]);
        ctx.model.registry.active_mut().col_no = 2;
        handle_edit(Action::DeleteCharUnderCursor, &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().current_line().to_text(), "ac");
    }

    #[test]
    fn dd_yanks_then_removes_the_line() {
        let mut ctx = ctx_with(&["one", "two"]);
        handle_edit(Action::DeleteLine, &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().line_count(), 1);
        assert_eq!(ctx.model.registry.active_mut().current_line().to_text(), "two");
        match ctx.model.registers.get().unwrap() {
            Yank::Lines(lines) => assert_eq!(lines[0].to_text(), "one"),
            _ => panic!("expected a line yank"),
        }
    }

    #[test]
    fn dw_deletes_to_next_word_start() {
        let mut ctx = ctx_with(&["foo bar"]);
        handle_edit(Action::DeleteWord, &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().current_line().to_text(), "bar");
    }

    #[test]
    fn replace_char_overwrites_in_place() {
        let mut ctx = ctx_with(&["abc"]);
        ctx.model.registry.active_mut().col_no = 2;
        handle_edit(Action::ReplaceChar('X'), &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().current_line().to_text(), "aXc");
    }

    #[test]
    fn line_selection_delete_range_removes_selected_lines() {
        let mut ctx = ctx_with(&["a", "b", "c"]);
        let buffer = ctx.model.registry.active_mut();
        buffer.mode = Mode::LineSelection;
        buffer.selection = Some(Selection { start_line: 1, sel_col: 1 });
        buffer.line_no = 2;
        handle_edit(Action::DeleteRange, &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().line_count(), 1);
        assert_eq!(ctx.model.registry.active_mut().current_line().to_text(), "c");
    }

    #[test]
    fn char_selection_delete_range_same_line() {
        let mut ctx = ctx_with(&["abcdef"]);
        let buffer = ctx.model.registry.active_mut();
        buffer.mode = Mode::CharSelection;
        buffer.selection = Some(Selection { start_line: 1, sel_col: 2 });
        buffer.col_no = 4;
        handle_edit(Action::DeleteRange, &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().current_line().to_text(), "aef");
    }
}
