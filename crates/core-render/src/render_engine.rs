//! Ties `viewport`/`gutter`/`status`/`style` together into full-frame and
//! selective redraws (spec §4.5). `core-render` has no dependency on
//! `core-actions`, so anything that lives in the dispatcher's
//! `EditorContext` (command-line text, yank count) arrives via
//! [`FrameContext`], assembled by the main loop each frame.

use core_model::{Focus, Layout, LayoutRegion, Model};
use core_state::{Buffer, Mode};
use core_terminal::TerminalCapabilities;
use core_text::Line;

use crate::gutter;
use crate::status::{self, CommandLine, StatusContext};
use crate::style;
use crate::writer::Writer;

/// Everything a frame needs that isn't already a plain field on `Model`
/// or `Buffer`.
pub struct FrameContext<'a> {
    pub command_line: CommandLine<'a>,
    pub yank_lines: usize,
}

const CHROME_ROWS: u16 = 3; // tab bar + status line + command line

pub struct RenderEngine {
    caps: TerminalCapabilities,
}

impl RenderEngine {
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self { caps }
    }

    pub fn text_height(&self, term_height: u16) -> usize {
        term_height.saturating_sub(CHROME_ROWS) as usize
    }

    /// Repaint everything: tab bar, every visible pane, status line,
    /// command line.
    pub fn render_full(
        &self,
        writer: &mut Writer,
        model: &Model,
        term_width: u16,
        term_height: u16,
        frame: &FrameContext,
    ) {
        let height = self.text_height(term_height);
        render_tab_bar(writer, model, term_width);
        let geometry = model.geometry(term_width);
        match model.layout {
            Layout::Single { buffer } => {
                if let Some(buf) = model.registry.get(buffer) {
                    self.render_pane(writer, buf, geometry.left, height, buf.offset, true);
                }
            }
            Layout::TwoPane { left, right } => {
                if let Some(buf) = model.registry.get(left) {
                    let active = model.self_split.focus == Focus::Left;
                    self.render_pane(writer, buf, geometry.left, height, buf.offset, active);
                }
                if let (Some(region), Some(buf)) = (geometry.right, model.registry.get(right)) {
                    let active = model.self_split.focus == Focus::Right;
                    self.render_pane(writer, buf, region, height, buf.offset, active);
                }
            }
            Layout::SelfSplit { buffer } => {
                if let Some(buf) = model.registry.get(buffer) {
                    let (left_off, right_off) = match model.self_split.focus {
                        Focus::Left => (buf.offset, model.self_split.view_right_offset),
                        Focus::Right => (model.self_split.view_left_offset, buf.offset),
                    };
                    self.render_pane(
                        writer,
                        buf,
                        geometry.left,
                        height,
                        left_off,
                        model.self_split.focus == Focus::Left,
                    );
                    if let Some(region) = geometry.right {
                        self.render_pane(
                            writer,
                            buf,
                            region,
                            height,
                            right_off,
                            model.self_split.focus == Focus::Right,
                        );
                    }
                }
            }
        }
        render_status_and_command(writer, model.registry.active(), term_width, term_height, frame);
    }

    /// Selective redraw for a plain cursor move within the focused pane
    /// (spec §4.5): repaint only the previously-current and
    /// newly-current lines, plus the status line (the position changed).
    /// Returns `false` (and does nothing else) if the move also requires
    /// a scroll, since that needs [`Self::render_full`] instead.
    pub fn render_cursor_move(
        &self,
        writer: &mut Writer,
        model: &Model,
        term_width: u16,
        term_height: u16,
        old_line: usize,
        new_line: usize,
        frame: &FrameContext,
    ) -> bool {
        let height = self.text_height(term_height);
        let (region, view_offset) = self.active_region(model, term_width);
        let buffer = model.registry.active();
        if new_line < view_offset || new_line >= view_offset + height {
            return false;
        }
        for line in [old_line, new_line] {
            if line >= view_offset && line - view_offset < height {
                let row = (line - view_offset) as u16 + 1;
                self.render_line(writer, buffer, line, region, row, line == new_line);
            }
        }
        render_status_and_command(writer, buffer, term_width, term_height, frame);
        true
    }

    /// Toggle the `SELECT` flag's two paren-match cells without touching
    /// the rest of either line (spec §4.5's narrowest selective-redraw
    /// case).
    pub fn render_paren_match(
        &self,
        writer: &mut Writer,
        model: &Model,
        term_width: u16,
        line: usize,
        is_current_line: bool,
    ) {
        let (region, view_offset) = self.active_region(model, term_width);
        if line < view_offset {
            return;
        }
        let row = (line - view_offset) as u16 + 1;
        let buffer = model.registry.active();
        self.render_line(writer, buffer, line, region, row, is_current_line);
    }

    fn active_region(&self, model: &Model, term_width: u16) -> (LayoutRegion, usize) {
        let geometry = model.geometry(term_width);
        let offset = model.registry.active().offset;
        let region = match model.layout {
            Layout::Single { .. } => geometry.left,
            Layout::TwoPane { left, .. } => {
                if model.registry.active_index() == left {
                    geometry.left
                } else {
                    geometry.right.unwrap_or(geometry.left)
                }
            }
            Layout::SelfSplit { .. } => match model.self_split.focus {
                Focus::Left => geometry.left,
                Focus::Right => geometry.right.unwrap_or(geometry.left),
            },
        };
        (region, offset)
    }

    fn render_pane(
        &self,
        writer: &mut Writer,
        buffer: &Buffer,
        region: LayoutRegion,
        height: usize,
        view_offset: usize,
        is_active_pane: bool,
    ) {
        let line_count = buffer.line_count();
        for row in 0..height {
            let line_idx = view_offset + row;
            let screen_row = row as u16 + 1; // row 0 is the tab bar
            writer.move_to(region.left, screen_row);
            writer.clear_line();
            if line_idx >= line_count {
                continue;
            }
            let is_current = is_active_pane && line_idx + 1 == buffer.line_no;
            self.render_line(writer, buffer, line_idx, region, screen_row, is_current);
        }
    }

    fn render_line(
        &self,
        writer: &mut Writer,
        buffer: &Buffer,
        line_idx: usize,
        region: LayoutRegion,
        screen_row: u16,
        is_current: bool,
    ) {
        let Some(line) = buffer.lines.get(line_idx) else {
            return;
        };
        writer.move_to(region.left, screen_row);
        writer.clear_line();
        let number_width = gutter::line_number_width(buffer.line_count());
        let out = self.compose_line(line, line_idx, buffer.coffset, region.width, number_width, is_current);
        writer.print(out);
    }

    fn compose_line(
        &self,
        line: &Line,
        line_idx: usize,
        coffset: usize,
        pane_width: u16,
        number_width: usize,
        is_current: bool,
    ) -> String {
        let mut out = String::new();

        let bar = gutter::gutter_sgr(line.rev_status);
        if bar.is_empty() {
            out.push(' ');
        } else {
            out.push_str(bar);
            out.push(' ');
            out.push_str(style::RESET);
        }

        let number = if coffset > 0 {
            format!("<{}", gutter::format_line_number(Some(line_idx + 1), number_width.saturating_sub(1)))
        } else {
            gutter::format_line_number(Some(line_idx + 1), number_width)
        };
        out.push_str(&number);
        out.push(' ');

        let reserved = 1 + number_width + 1;
        let content_width = (pane_width as usize).saturating_sub(reserved);
        let cells = line.cells();
        let mut col = 0usize;
        let mut printed = 0usize;
        let mut truncated = false;
        for (i, cell) in cells.iter().enumerate() {
            let w = cell.width.max(1) as usize;
            if col + w <= coffset {
                col += w;
                continue;
            }
            if printed + w > content_width {
                truncated = true;
                break;
            }
            if cell.codepoint == ' ' && i == cells.len() - 1 {
                out.push_str(&style::trailing_space_glyph());
            } else {
                out.push_str(&style::sgr_prefix(cell, is_current));
                out.push_str(&style::render_glyph(cell, self.caps.unicode));
                out.push_str(style::RESET);
            }
            col += w;
            printed += w;
        }
        if truncated {
            let marker = if self.caps.unicode { "→" } else { ">" };
            out.push_str(marker);
            printed += 1;
        }
        if is_current && printed < content_width {
            out.push_str(&style::current_line_fill(content_width - printed));
        }
        out
    }
}

fn render_tab_bar(writer: &mut Writer, model: &Model, term_width: u16) {
    writer.move_to(0, 0);
    writer.clear_line();
    let mut out = String::new();
    let mut used = 0usize;
    for (idx, buf) in model.registry.iter().enumerate() {
        let name = buf.file_name.as_deref().unwrap_or("[No Name]");
        let marker = if buf.modified() { "+" } else { "" };
        let label = format!(" {name}{marker} ");
        let label_width = label.chars().count();
        if used + label_width > term_width as usize {
            break;
        }
        if idx == model.registry.active_index() {
            out.push_str("\x1b[1m");
        } else {
            out.push_str("\x1b[4m");
        }
        out.push_str(&label);
        out.push_str(style::RESET);
        used += label_width;
    }
    writer.print(out);
}

fn render_status_and_command(
    writer: &mut Writer,
    buffer: &Buffer,
    term_width: u16,
    term_height: u16,
    frame: &FrameContext,
) {
    let status_row = term_height.saturating_sub(2);
    let command_row = term_height.saturating_sub(1);
    let ctx = StatusContext {
        syntax_name: buffer.syntax.map(|s| s.name()),
        modified: buffer.modified(),
        readonly: buffer.readonly,
        use_spaces: buffer.use_spaces,
        tabstop: buffer.tabstop,
        yank_lines: frame.yank_lines,
        auto_indent: buffer.auto_indent,
        file_name: buffer.file_name.as_deref(),
        line_no: buffer.line_no,
        line_count: buffer.line_count(),
        col_no: buffer.col_no,
        width: term_width as usize,
    };
    let segments = status::compose_status(&ctx);
    writer.move_to(0, status_row);
    writer.clear_line();
    writer.print(status::format_status(&ctx, &segments));

    writer.move_to(0, command_row);
    writer.clear_line();
    writer.print(status::format_command_line(&frame.command_line));
}

/// Mode label shown on the command line when no prompt/message is active.
pub fn mode_command_line(mode: Mode) -> CommandLine<'static> {
    CommandLine::Mode(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Model;

    fn caps() -> TerminalCapabilities {
        TerminalCapabilities::default()
    }

    fn frame() -> FrameContext<'static> {
        FrameContext { command_line: CommandLine::Mode(Mode::Normal), yank_lines: 0 }
    }

    #[test]
    fn full_frame_emits_tab_bar_panes_and_status() {
        let engine = RenderEngine::new(caps());
        let model = Model::new();
        let mut writer = Writer::new();
        engine.render_full(&mut writer, &model, 80, 24, &frame());
        assert!(!writer.is_empty());
    }

    #[test]
    fn cursor_move_outside_viewport_reports_scroll_needed() {
        let engine = RenderEngine::new(caps());
        let mut model = Model::new();
        for _ in 0..40 {
            model.registry.active_mut().add_line(model.registry.active().line_count());
        }
        let mut writer = Writer::new();
        let handled = engine.render_cursor_move(&mut writer, &model, 80, 24, 0, 39, &frame());
        assert!(!handled);
    }

    #[test]
    fn cursor_move_within_viewport_is_handled_locally() {
        let engine = RenderEngine::new(caps());
        let model = Model::new();
        let mut writer = Writer::new();
        let handled = engine.render_cursor_move(&mut writer, &model, 80, 24, 0, 0, &frame());
        assert!(handled);
    }

    #[test]
    fn text_height_reserves_three_chrome_rows() {
        let engine = RenderEngine::new(caps());
        assert_eq!(engine.text_height(24), 21);
    }
}
