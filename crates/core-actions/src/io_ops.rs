//! File load/save (spec §4.1/§6): a buffer's lines are read and written
//! back as plain UTF-8 text, one line per `\n`.

use std::fs;
use std::path::Path;

use core_config::Config;
use core_state::Buffer;
use core_text::Line;

pub fn open_file(path: &str) -> anyhow::Result<Buffer> {
    let text = fs::read_to_string(path)?;
    let mut buffer = Buffer::with_file_name(path);
    buffer.loading = true;
    let lines: Vec<Line> = if text.is_empty() {
        vec![Line::new()]
    } else {
        text.lines().map(Line::from_str).collect()
    };
    buffer.lines = core_text::LineStore::from_lines(lines);
    buffer.loading = false;
    buffer.mark_saved();
    Ok(buffer)
}

/// Like `open_file`, but restores the cursor from `~/.biminfo` (spec
/// §6) when this path has an entry there, instead of starting at 1,1.
pub fn open_file_restoring_cursor(path: &str, config: &Config) -> anyhow::Result<Buffer> {
    let mut buffer = open_file(path)?;
    if let Some((line, col)) = config.cursor_for(path) {
        buffer.line_no = line.clamp(1, buffer.line_count());
        buffer.col_no = col.max(1);
    }
    Ok(buffer)
}

pub fn write_file(buffer: &mut Buffer, path: &str) -> anyhow::Result<()> {
    let mut out = String::new();
    for line in buffer.lines.iter() {
        out.push_str(&line.to_text());
        out.push('\n');
    }
    fs::write(Path::new(path), out)?;
    buffer.mark_saved();
    Ok(())
}
