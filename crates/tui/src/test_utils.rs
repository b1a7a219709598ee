//! Helpers shared by the rendering tests.

use ratatui::buffer::Buffer;

/// Flattens a buffer into one line per row, trailing spaces trimmed.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in buf.area.top()..buf.area.bottom() {
        let start = result.len();
        for x in buf.area.left()..buf.area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        let trimmed = result[start..].trim_end_matches(' ').len();
        result.truncate(start + trimmed);
        result.push('\n');
    }
    result
}
