//! Cursor motion (spec §4.7 plus the supplemented `gg`/`G`/`0`/`$`/`w`/`b`
//! motions from SPEC_FULL.md §F).

use core_keymap::{Action, Direction};
use core_state::Buffer;

use super::{DispatchOutcome, EditorContext};

pub(crate) fn handle_motion(action: Action, ctx: &mut EditorContext) -> DispatchOutcome {
    let buffer = ctx.model.registry.active_mut();
    let before = (buffer.line_no, buffer.col_no);
    match action {
        Action::Motion(Direction::Left) => {
            buffer.col_no = buffer.col_no.saturating_sub(1).max(1);
        }
        Action::Motion(Direction::Right) => {
            buffer.col_no = buffer.col_no.saturating_add(1);
        }
        Action::Motion(Direction::Up) => {
            if buffer.line_no > 1 {
                buffer.line_no -= 1;
            }
            buffer.col_no = buffer.preferred_col;
        }
        Action::Motion(Direction::Down) => {
            if buffer.line_no < buffer.line_count() {
                buffer.line_no += 1;
            }
            buffer.col_no = buffer.preferred_col;
        }
        Action::LineStart => buffer.col_no = 1,
        Action::LineEnd => buffer.col_no = buffer.current_line().len().max(1),
        Action::FirstLine => {
            buffer.line_no = 1;
            buffer.col_no = 1;
        }
        Action::LastLine => {
            buffer.line_no = buffer.line_count();
            buffer.col_no = 1;
        }
        Action::GotoLine(n) => {
            buffer.line_no = (n as usize).clamp(1, buffer.line_count());
            buffer.col_no = 1;
        }
        Action::WordForward => word_forward(buffer),
        Action::WordBackward => word_backward(buffer),
        _ => {}
    }
    buffer.clamp_cursor();
    if !matches!(action, Action::Motion(Direction::Up) | Action::Motion(Direction::Down)) {
        buffer.preferred_col = buffer.col_no;
    }
    if (buffer.line_no, buffer.col_no) != before {
        DispatchOutcome::dirty()
    } else {
        DispatchOutcome::clean()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
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

/// Advance `(line_no, col_no)` past the current word and any following
/// whitespace, crossing line boundaries (an empty line counts as a word
/// boundary of its own, matching vim's `w`).
fn word_forward(buffer: &mut Buffer) {
    let mut line = buffer.line_no - 1;
    let mut col = buffer.col_no - 1;
    let mut start_class = buffer
        .lines
        .get(line)
        .and_then(|l| l.cell(col))
        .map(|c| classify(c.codepoint));

    loop {
        let Some(l) = buffer.lines.get(line) else { break };
        if col >= l.len() {
            if line + 1 >= buffer.lines.len() {
                break;
            }
            line += 1;
            col = 0;
            if buffer.lines.get(line).map(|l| l.is_empty()).unwrap_or(false) {
                break;
            }
            start_class = None;
            continue;
        }
        let class = classify(l.cell(col).unwrap().codepoint);
        match start_class {
            None => {
                if class != CharClass::Whitespace {
                    break;
                }
                col += 1;
            }
            Some(sc) => {
                if class != sc {
                    start_class = None;
                } else {
                    col += 1;
                }
            }
        }
    }
    buffer.line_no = line + 1;
    buffer.col_no = col + 1;
}

/// Retreat to the start of the previous word, crossing line boundaries.
fn word_backward(buffer: &mut Buffer) {
    let mut line = buffer.line_no - 1;
    let mut col = buffer.col_no.saturating_sub(1);

    // Step back one cell to begin scanning from the char before the cursor.
    loop {
        if col == 0 {
            if line == 0 {
                buffer.line_no = 1;
                buffer.col_no = 1;
                return;
            }
            line -= 1;
            col = buffer.lines.get(line).map(|l| l.len()).unwrap_or(0);
            continue;
        }
        col -= 1;
        let class = buffer
            .lines
            .get(line)
            .and_then(|l| l.cell(col))
            .map(|c| classify(c.codepoint));
        if class != Some(CharClass::Whitespace) {
            break;
        }
    }
    // Walk back while the class stays the same as the word we landed in.
    let anchor_class = buffer.lines.get(line).and_then(|l| l.cell(col)).map(|c| classify(c.codepoint));
    while col > 0 {
        let prev_class = buffer
            .lines
            .get(line)
            .and_then(|l| l.cell(col - 1))
            .map(|c| classify(c.codepoint));
        if prev_class != anchor_class {
            break;
        }
        col -= 1;
    }
    buffer.line_no = line + 1;
    buffer.col_no = col + 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Model;

    fn ctx_with(text: &[&str]) -> EditorContext {
        let mut model = Model::new();
        let buffer = model.registry.active_mut();
        for (i, line) in text.iter().enumerate() {
            if i > 0 {
                buffer.add_line(i);
            }
            for (j, cp) in line.chars().enumerate() {
                buffer.insert(i, j, cp);
            }
        }
        buffer.line_no = 1;
        buffer.col_no = 1;
        EditorContext::new(model)
    }

    #[test]
    fn word_forward_skips_to_next_word() {
        let mut ctx = ctx_with(&["foo bar baz"]);
        handle_motion(Action::WordForward, &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().col_no, 5);
    }

    #[test]
    fn word_forward_crosses_line_boundary() {
        let mut ctx = ctx_with(&["foo", "bar"]);
        let buffer = ctx.model.registry.active_mut();
        buffer.col_no = 1;
        handle_motion(Action::WordForward, &mut ctx);
        let buffer = ctx.model.registry.active_mut();
        assert_eq!(buffer.line_no, 2);
        assert_eq!(buffer.col_no, 1);
    }

    #[test]
    fn word_backward_returns_to_word_start() {
        let mut ctx = ctx_with(&["foo bar baz"]);
        ctx.model.registry.active_mut().col_no = 9;
        handle_motion(Action::WordBackward, &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().col_no, 5);
    }

    #[test]
    fn goto_line_clamps_to_buffer() {
        let mut ctx = ctx_with(&["a", "b", "c"]);
        handle_motion(Action::GotoLine(99), &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().line_no, 3);
    }

    #[test]
    fn last_line_and_first_line() {
        let mut ctx = ctx_with(&["a", "b", "c"]);
        handle_motion(Action::LastLine, &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().line_no, 3);
        handle_motion(Action::FirstLine, &mut ctx);
        assert_eq!(ctx.model.registry.active_mut().line_no, 1);
    }
}
