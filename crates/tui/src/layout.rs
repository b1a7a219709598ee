//! Column layout and virtualization.
//!
//! Cards have different heights, columns have a fixed line budget. These
//! functions decide how many cards of a column fit from its scroll offset,
//! move the offset so the cursor stays visible, and map a click to a card.
//! They only see card heights, so they are independent of rendering.

use std::time::Duration;

/// Lines below the board: a blank separator and the status bar.
pub const BOARD_CHROME: u16 = 2;

/// Extra line taken by the error banner when an error is shown.
pub const ERROR_CHROME: u16 = 1;

/// Horizontal space a card spends on border (2) and padding (2).
pub const CARD_CHROME: usize = 4;

/// Vertical space a card spends on its border.
pub const CARD_BORDER_LINES: usize = 2;

/// Maximum number of body preview lines on a card.
pub const MAX_BODY_LINES: usize = 4;

/// Widest a column may get.
pub const MAX_COLUMN_WIDTH: u16 = 75;

/// Column width used before the terminal size is known.
pub const DEFAULT_COLUMN_WIDTH: u16 = 30;

/// Two clicks on the same card closer than this activate it.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Width of each column: the terminal split evenly, capped at
/// [`MAX_COLUMN_WIDTH`].
///
/// # Examples
///
/// ```
/// use taskwatch_tui::layout::column_width;
///
/// assert_eq!(column_width(120, 4), 30);
/// assert_eq!(column_width(400, 2), 75);
/// assert_eq!(column_width(0, 3), 30);
/// ```
#[must_use]
pub fn column_width(terminal_width: u16, columns: usize) -> u16 {
    if terminal_width == 0 || columns == 0 {
        return DEFAULT_COLUMN_WIDTH;
    }
    let columns = u16::try_from(columns).unwrap_or(u16::MAX);
    (terminal_width / columns).min(MAX_COLUMN_WIDTH)
}

/// Lines below the board for the given error state.
#[must_use]
pub const fn chrome_height(has_error: bool) -> u16 {
    if has_error {
        BOARD_CHROME + ERROR_CHROME
    } else {
        BOARD_CHROME
    }
}

/// Greedily counts cards from `offset` that fit in `avail` lines.
///
/// The first card is always counted even if it is taller than `avail`. An
/// empty column, or one with no room at all, reports 1.
#[must_use]
pub fn fit_cards(heights: &[usize], offset: usize, avail: i32) -> usize {
    if heights.is_empty() || avail < 1 {
        return 1;
    }

    let avail = usize::try_from(avail).unwrap_or(usize::MAX);
    let mut used = 0;
    let mut count = 0;
    for &height in heights.iter().skip(offset) {
        if count > 0 && used + height > avail {
            break;
        }
        count += 1;
        used += height;
        if used >= avail {
            break;
        }
    }
    count.max(1)
}

/// Number of cards to draw for a column with `budget` lines.
///
/// The header takes one line, and the "more above" and "more below"
/// indicators take one line each when they are shown.
///
/// # Examples
///
/// ```
/// use taskwatch_tui::layout::visible_cards;
///
/// // Five 3-line cards, 11 lines: header, three cards, "more below".
/// assert_eq!(visible_cards(&[3; 5], 0, 11), 3);
/// // Scrolled to the end: header, "more above", three cards.
/// assert_eq!(visible_cards(&[3; 5], 2, 11), 3);
/// ```
#[must_use]
pub fn visible_cards(heights: &[usize], offset: usize, budget: i32) -> usize {
    if budget < 1 {
        return 1;
    }

    let mut avail = budget - 1;
    if offset > 0 {
        avail -= 1;
    }

    let n = fit_cards(heights, offset, avail);
    if offset + n < heights.len() {
        return fit_cards(heights, offset, avail - 1).max(1);
    }
    n
}

/// Returns the scroll offset that keeps `row` within the visible window.
///
/// `visible` reports how many cards fit for a given offset. Because that
/// count depends on the offset, the adjustment is repeated until it settles,
/// at most `len + 1` times.
///
/// # Examples
///
/// ```
/// use taskwatch_tui::layout::{ensure_visible, visible_cards};
///
/// let heights = [3; 5];
/// let offset = ensure_visible(4, 0, heights.len(), |off| visible_cards(&heights, off, 11));
/// assert_eq!(offset, 2);
/// ```
#[must_use]
pub fn ensure_visible(
    row: usize,
    offset: usize,
    len: usize,
    visible: impl Fn(usize) -> usize,
) -> usize {
    let mut offset = offset;
    for _ in 0..=len {
        let shown = visible(offset).max(1);
        if row >= offset + shown {
            offset = row + 1 - shown;
        } else if row < offset {
            offset = row;
        } else {
            break;
        }
    }
    offset
}

/// Maps a line inside a column's card area to a card index.
///
/// Only the drawn cards `offset..end` are hit. `line` counts from the first
/// card line below the header (and below the "more above" indicator when
/// scrolled). Returns `None` when the line is past the last drawn card,
/// which includes the "more below" indicator.
#[must_use]
pub fn card_at_line(heights: &[usize], offset: usize, end: usize, line: usize) -> Option<usize> {
    let end = end.min(heights.len());
    let mut top = 0;
    for (index, &height) in heights.iter().enumerate().take(end).skip(offset) {
        if line < top + height {
            return Some(index);
        }
        top += height;
    }
    None
}
