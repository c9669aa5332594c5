//! `u`/Ctrl-R (spec §4.2, §4.7): delegate straight to the buffer's
//! journal and report whether anything actually changed.

use super::{DispatchOutcome, EditorContext};

pub(crate) fn handle_undo(ctx: &mut EditorContext) -> DispatchOutcome {
    let stats = ctx.model.registry.active_mut().undo();
    outcome_for(stats)
}

pub(crate) fn handle_redo(ctx: &mut EditorContext) -> DispatchOutcome {
    let stats = ctx.model.registry.active_mut().redo();
    outcome_for(stats)
}

fn outcome_for(stats: core_state::EditStats) -> DispatchOutcome {
    if stats.chars_changed == 0 && stats.lines_changed == 0 {
        DispatchOutcome::clean()
    } else {
        DispatchOutcome::dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Model;
    use core_state::Mode;

    #[test]
    fn undo_reverts_the_last_insert() {
        let mut ctx = EditorContext::new(Model::new());
        let buffer = ctx.model.registry.active_mut();
        buffer.mode = Mode::Insert;
        for (i, cp) in "hi".chars().enumerate() {
            buffer.insert(0, i, cp);
        }
        buffer.set_history_break();
        let outcome = handle_undo(&mut ctx);
        assert!(outcome.redraw);
        assert_eq!(ctx.model.registry.active_mut().current_line().to_text(), "");
    }

    #[test]
    fn undo_on_a_clean_buffer_reports_no_redraw() {
        let mut ctx = EditorContext::new(Model::new());
        let outcome = handle_undo(&mut ctx);
        assert!(!outcome.redraw);
    }
}
