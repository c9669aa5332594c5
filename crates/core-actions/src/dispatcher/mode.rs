//! Mode transitions (spec §4.7): INSERT/REPLACE entry and exit, the
//! three selection modes, and column-insert replication.

use core_keymap::{Action, SelectionKind};
use core_state::{Mode, Selection};

use super::{DispatchOutcome, EditorContext};

/// State kept only while COL_INSERT is active: the line range the insert
/// replicates across, the anchor column, and the text typed on the
/// anchor line so far (replayed onto the other lines at `Escape`).
#[derive(Debug, Clone)]
pub struct ColInsertState {
    pub lines: (usize, usize),
    pub col: usize,
    pub anchor_line: usize,
    pub inserted: String,
}

pub(crate) fn handle_mode_change(action: Action, ctx: &mut EditorContext) -> DispatchOutcome {
    let buffer = ctx.model.registry.active_mut();
    match action {
        Action::InsertBefore => {
            buffer.mode = Mode::Insert;
        }
        Action::InsertAfter => {
            buffer.mode = Mode::Insert;
            buffer.col_no += 1;
            buffer.clamp_cursor();
        }
        Action::OpenLineBelow => {
            buffer.add_line(buffer.line_no);
            buffer.line_no += 1;
            buffer.col_no = 1;
            buffer.mode = Mode::Insert;
        }
        Action::OpenLineAbove => {
            buffer.add_line(buffer.line_no - 1);
            buffer.col_no = 1;
            buffer.mode = Mode::Insert;
        }
        Action::EnterReplace => {
            buffer.mode = Mode::Replace;
        }
        Action::EnterSelection(kind) => {
            buffer.selection = Some(Selection { start_line: buffer.line_no, sel_col: buffer.col_no });
            buffer.mode = match kind {
                SelectionKind::Line => Mode::LineSelection,
                SelectionKind::Char => Mode::CharSelection,
                SelectionKind::Col => Mode::ColSelection,
            };
        }
        Action::ColInsertBefore | Action::ColInsertAfter => {
            if let Some(sel) = buffer.selection {
                let (lo, hi) = (sel.start_line.min(buffer.line_no), sel.start_line.max(buffer.line_no));
                let mut col = sel.sel_col.min(buffer.col_no);
                if matches!(action, Action::ColInsertAfter) {
                    col = sel.sel_col.max(buffer.col_no) + 1;
                }
                ctx.col_insert = Some(ColInsertState {
                    lines: (lo, hi),
                    col,
                    anchor_line: buffer.line_no,
                    inserted: String::new(),
                });
                buffer.col_no = col;
                buffer.mode = Mode::ColInsert;
            }
        }
        Action::Escape => return handle_escape(ctx),
        _ => {}
    }
    DispatchOutcome::dirty()
}

fn handle_escape(ctx: &mut EditorContext) -> DispatchOutcome {
    let was_col_insert = {
        let buffer = ctx.model.registry.active_mut();
        matches!(buffer.mode, Mode::ColInsert)
    };
    if was_col_insert {
        replicate_column_insert(ctx);
    }
    let buffer = ctx.model.registry.active_mut();
    let retreat = matches!(buffer.mode, Mode::Insert | Mode::Replace | Mode::ColInsert);
    buffer.mode = Mode::Normal;
    buffer.selection = None;
    if retreat && buffer.col_no > 1 {
        buffer.col_no -= 1;
    }
    buffer.clamp_cursor();
    DispatchOutcome::dirty()
}

fn replicate_column_insert(ctx: &mut EditorContext) {
    let Some(state) = ctx.col_insert.take() else { return };
    if state.inserted.is_empty() {
        return;
    }
    let buffer = ctx.model.registry.active_mut();
    for line in state.lines.0..=state.lines.1 {
        let idx = line - 1;
        if idx == state.anchor_line - 1 {
            continue;
        }
        if buffer.lines.get(idx).is_none() {
            continue;
        }
        let col = state.col.min(buffer.lines.get(idx).map(|l| l.len()).unwrap_or(0));
        for (i, cp) in state.inserted.chars().enumerate() {
            buffer.insert(idx, col + i, cp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Model;

    fn ctx() -> EditorContext {
        EditorContext::new(Model::new())
    }

    #[test]
    fn insert_before_enters_insert_mode_in_place() {
        let mut ctx = ctx();
        ctx.model.registry.active_mut().col_no = 1;
        handle_mode_change(Action::InsertBefore, &mut ctx);
        let buffer = ctx.model.registry.active_mut();
        assert_eq!(buffer.mode, Mode::Insert);
        assert_eq!(buffer.col_no, 1);
    }

    #[test]
    fn open_line_below_inserts_new_line_and_enters_insert() {
        let mut ctx = ctx();
        for (i, cp) in "abc".chars().enumerate() {
            ctx.model.registry.active_mut().insert(0, i, cp);
        }
        handle_mode_change(Action::OpenLineBelow, &mut ctx);
        let buffer = ctx.model.registry.active_mut();
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line_no, 2);
        assert_eq!(buffer.mode, Mode::Insert);
    }

    #[test]
    fn escape_from_insert_retreats_cursor_and_returns_to_normal() {
        let mut ctx = ctx();
        for (i, cp) in "abc".chars().enumerate() {
            ctx.model.registry.active_mut().insert(0, i, cp);
        }
        let buffer = ctx.model.registry.active_mut();
        buffer.mode = Mode::Insert;
        buffer.col_no = 4;
        handle_mode_change(Action::Escape, &mut ctx);
        let buffer = ctx.model.registry.active_mut();
        assert_eq!(buffer.mode, Mode::Normal);
        assert_eq!(buffer.col_no, 3);
    }

    #[test]
    fn enter_selection_records_anchor() {
        let mut ctx = ctx();
        handle_mode_change(Action::EnterSelection(SelectionKind::Line), &mut ctx);
        let buffer = ctx.model.registry.active_mut();
        assert_eq!(buffer.mode, Mode::LineSelection);
        assert!(buffer.selection.is_some());
    }
}
