//! Paren matching within a single syntax class (spec §4.7's `hlparen`
//! option): scan forward or backward from the cursor for the bracket
//! that balances the one underneath it.

use core_state::Buffer;

const PAIRS: &[(char, char)] = &[('(', ')'), ('[', ']'), ('{', '}')];

fn pair_for(c: char) -> Option<(char, bool)> {
    for &(open, close) in PAIRS {
        if c == open {
            return Some((close, true));
        }
        if c == close {
            return Some((open, false));
        }
    }
    None
}

/// Returns the 1-based `(line, col)` of the bracket matching the one at
/// the cursor, or `None` if the cursor isn't on a bracket or no match is
/// found before the buffer's edge.
pub fn find_matching_paren(buffer: &Buffer) -> Option<(usize, usize)> {
    let line_idx = buffer.line_no - 1;
    let col_idx = buffer.col_no.checked_sub(1)?;
    let line = buffer.lines.get(line_idx)?;
    let cell = line.cell(col_idx)?;
    let (target, forward) = pair_for(cell.codepoint)?;
    let class = cell.class;

    let mut depth = 1i32;
    if forward {
        let mut li = line_idx;
        let mut ci = col_idx + 1;
        loop {
            let Some(l) = buffer.lines.get(li) else { return None };
            if ci >= l.len() {
                li += 1;
                ci = 0;
                if li >= buffer.lines.len() {
                    return None;
                }
                continue;
            }
            let c = l.cell(ci).unwrap();
            if c.class == class {
                if c.codepoint == target {
                    depth -= 1;
                    if depth == 0 {
                        return Some((li + 1, ci + 1));
                    }
                } else if c.codepoint == cell.codepoint {
                    depth += 1;
                }
            }
            ci += 1;
        }
    } else {
        let mut li = line_idx;
        let mut ci = col_idx;
        loop {
            if ci == 0 {
                if li == 0 {
                    return None;
                }
                li -= 1;
                ci = buffer.lines.get(li).map(|l| l.len()).unwrap_or(0);
                continue;
            }
            ci -= 1;
            let l = buffer.lines.get(li)?;
            let c = l.cell(ci).unwrap();
            if c.class == class {
                if c.codepoint == target {
                    depth -= 1;
                    if depth == 0 {
                        return Some((li + 1, ci + 1));
                    }
                } else if c.codepoint == cell.codepoint {
                    depth += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_matching_close_paren_on_same_line() {
        let mut buffer = Buffer::new();
        for (i, cp) in "f(a, b)".chars().enumerate() {
            buffer.insert(0, i, cp);
        }
        buffer.col_no = 2;
        assert_eq!(find_matching_paren(&buffer), Some((1, 7)));
    }

    #[test]
    fn finds_matching_open_paren_backward() {
        let mut buffer = Buffer::new();
        for (i, cp) in "f(a, b)".chars().enumerate() {
            buffer.insert(0, i, cp);
        }
        buffer.col_no = 7;
        assert_eq!(find_matching_paren(&buffer), Some((1, 2)));
    }

    #[test]
    fn non_bracket_cursor_yields_none() {
        let mut buffer = Buffer::new();
        for (i, cp) in "abc".chars().enumerate() {
            buffer.insert(0, i, cp);
        }
        buffer.col_no = 1;
        assert_eq!(find_matching_paren(&buffer), None);
    }
}
