//! Per-mode key tables (spec §4.7's transition table, plus the
//! supplemented motions/shorthands it leaves implicit).

use crate::action::{Action, Direction, KeyPattern as K, MappingSpec, SelectionKind};

const CTRL_R: char = '\u{12}';
const CTRL_V: char = '\u{16}';

fn m(sequence: Vec<K>, action: Action) -> MappingSpec {
    MappingSpec { sequence, action }
}

pub fn normal_mode_specs() -> Vec<MappingSpec> {
    vec![
        m(vec![K::Char('h')], Action::Motion(Direction::Left)),
        m(vec![K::Char('l')], Action::Motion(Direction::Right)),
        m(vec![K::Char('j')], Action::Motion(Direction::Down)),
        m(vec![K::Char('k')], Action::Motion(Direction::Up)),
        m(vec![K::Char('w')], Action::WordForward),
        m(vec![K::Char('b')], Action::WordBackward),
        m(vec![K::Char('0')], Action::LineStart),
        m(vec![K::Char('$')], Action::LineEnd),
        m(vec![K::Char('g'), K::Char('g')], Action::FirstLine),
        m(vec![K::Char('G')], Action::LastLine),
        m(vec![K::Char('i')], Action::InsertBefore),
        m(vec![K::Char('a')], Action::InsertAfter),
        m(vec![K::Char('o')], Action::OpenLineBelow),
        m(vec![K::Char('O')], Action::OpenLineAbove),
        m(vec![K::Char('R')], Action::EnterReplace),
        m(vec![K::Char('V')], Action::EnterSelection(SelectionKind::Line)),
        m(vec![K::Char('v')], Action::EnterSelection(SelectionKind::Char)),
        m(vec![K::Char(CTRL_V)], Action::EnterSelection(SelectionKind::Col)),
        m(vec![K::Char(':')], Action::CommandPrompt),
        m(vec![K::Char('/')], Action::SearchForward),
        m(vec![K::Char('?')], Action::SearchBackward),
        m(vec![K::Char('u')], Action::Undo),
        m(vec![K::Char(CTRL_R)], Action::Redo),
        m(vec![K::Char('p')], Action::PasteAfter),
        m(vec![K::Char('P')], Action::PasteBefore),
        m(vec![K::Char('r'), K::Any], Action::ReplaceChar('\0')),
        m(vec![K::Char('x')], Action::DeleteCharUnderCursor),
        m(vec![K::Char('d'), K::Char('d')], Action::DeleteLine),
        m(vec![K::Char('y'), K::Char('y')], Action::YankLine),
        m(vec![K::Char('d'), K::Char('w')], Action::DeleteWord),
    ]
}

pub fn insert_or_replace_mode_specs() -> Vec<MappingSpec> {
    vec![m(vec![K::Char('\u{1b}')], Action::Escape)]
}

pub fn line_selection_mode_specs() -> Vec<MappingSpec> {
    vec![
        m(vec![K::Char('d')], Action::DeleteRange),
        m(vec![K::Char('y')], Action::YankRange),
        m(vec![K::Char('V')], Action::Escape),
        m(vec![K::Char('\u{1b}')], Action::Escape),
        m(vec![K::Char('\t')], Action::IndentRange),
        // Shift-Tab arrives from core-input as a Nav event, not a plain
        // char; core-actions matches it directly rather than through this
        // trie (see `UnindentRange`'s doc comment for the reasoning).
    ]
}

pub fn char_or_col_selection_mode_specs() -> Vec<MappingSpec> {
    vec![
        m(vec![K::Char('d')], Action::DeleteRange),
        m(vec![K::Char('y')], Action::YankRange),
        m(vec![K::Char('\u{1b}')], Action::Escape),
        m(vec![K::Char('I')], Action::ColInsertBefore),
        m(vec![K::Char('a')], Action::ColInsertAfter),
    ]
}

pub fn col_insert_mode_specs() -> Vec<MappingSpec> {
    vec![m(vec![K::Char('\u{1b}')], Action::Escape)]
}
