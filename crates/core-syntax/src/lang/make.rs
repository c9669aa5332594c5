//! Makefile lexer. Recipe lines, variable references, and comments are all
//! resolved within a single line, so `istate` is always `0`.

use core_text::{Cell, SyntaxClass};

use crate::primitives::paint_class;
use crate::Syntax;

pub struct MakeSyntax;

impl Syntax for MakeSyntax {
    fn name(&self) -> &'static str {
        "make"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["mk"]
    }

    fn prefers_spaces(&self) -> bool {
        false
    }

    fn highlight_line(&self, cells: &mut [Cell], _istate: i32) -> i32 {
        highlight(cells)
    }
}

pub(crate) fn highlight(cells: &mut [Cell]) -> i32 {
    if cells.first().map(|c| c.codepoint) == Some('\t') {
        // Recipe line: just paint inline variable references.
        paint_variables(cells, 1);
        return 0;
    }

    let mut i = 0;
    while i < cells.len() {
        let c = cells[i].codepoint;
        if c == '#' {
            paint_class(cells, i, cells.len() - i, SyntaxClass::Comment);
            return 0;
        }
        if c == '$' && matches!(cells.get(i + 1).map(|c| c.codepoint), Some('(') | Some('{')) {
            let len = variable_len(cells, i);
            paint_class(cells, i, len, SyntaxClass::Pragma);
            i += len;
            continue;
        }
        if c == ':' {
            paint_class(cells, 0, i, SyntaxClass::Type);
            i += 1;
            continue;
        }
        i += 1;
    }
    0
}

fn paint_variables(cells: &mut [Cell], mut i: usize) {
    while i < cells.len() {
        if cells[i].codepoint == '$'
            && matches!(cells.get(i + 1).map(|c| c.codepoint), Some('(') | Some('{'))
        {
            let len = variable_len(cells, i);
            paint_class(cells, i, len, SyntaxClass::Pragma);
            i += len;
            continue;
        }
        i += 1;
    }
}

fn variable_len(cells: &[Cell], i: usize) -> usize {
    let close = if cells.get(i + 1).map(|c| c.codepoint) == Some('(') {
        ')'
    } else {
        '}'
    };
    let mut j = i + 2;
    while j < cells.len() && cells[j].codepoint != close {
        j += 1;
    }
    if j < cells.len() {
        j += 1;
    }
    j - i
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Line;

    #[test]
    fn target_and_variable() {
        let mut l = Line::from_str("all: $(OBJS)");
        highlight(l.cells_mut());
        assert_eq!(l.cells()[0].class, SyntaxClass::Type);
        let dollar = l.to_text().find('$').unwrap();
        assert_eq!(l.cells()[dollar].class, SyntaxClass::Pragma);
    }

    #[test]
    fn recipe_line_skips_target_rule() {
        let mut l = Line::from_str("\tgcc -o $(BIN) $(OBJS)");
        highlight(l.cells_mut());
        assert_eq!(l.cells()[0].class, SyntaxClass::None);
    }
}
