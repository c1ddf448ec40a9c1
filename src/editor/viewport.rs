//! Scroll state of the three editor surfaces

/// Scroll offsets of one surface, in lines and columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub top: usize,
    pub left: usize,
}

/// The raw-text input surface, the highlighted overlay drawn over it, and the
/// line-number gutter beside it.
///
/// Only the input surface is scrolled directly; the other two follow it
/// through [`Surfaces::sync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Surfaces {
    pub input: ScrollOffset,
    pub overlay: ScrollOffset,
    pub gutter: ScrollOffset,
}

impl Surfaces {
    /// Mirror the input offsets: both axes onto the overlay, vertical onto the gutter
    pub fn sync(&mut self) {
        self.overlay = self.input;
        self.gutter.top = self.input.top;
    }

    /// Scroll the input surface so `(line, col)` lies inside a `height` x `width` window
    pub fn reveal(&mut self, line: usize, col: usize, height: usize, width: usize) {
        let height = height.max(1);
        let width = width.max(1);
        let input = &mut self.input;
        if line < input.top {
            input.top = line;
        } else if line >= input.top + height {
            input.top = line + 1 - height;
        }
        if col < input.left {
            input.left = col;
        } else if col >= input.left + width {
            input.left = col + 1 - width;
        }
    }

    /// Scroll the input surface by a signed number of lines and columns,
    /// never past `max_top`
    pub fn scroll_by(&mut self, lines: isize, cols: isize, max_top: usize) {
        let input = &mut self.input;
        input.top = input.top.saturating_add_signed(lines).min(max_top);
        input.left = input.left.saturating_add_signed(cols);
    }
}
