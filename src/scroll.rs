//! Bounded scroll window over the playlist.
//!
//! A fixed-capacity view: `offset` is the first visible index and is always
//! clamped into `[0, max(0, len - window_size)]`, including after playlist
//! mutations that shrink the list below the current offset.

pub const DEFAULT_WINDOW_SIZE: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct ScrollWindow {
    offset: usize,
    window_size: usize,
}

impl Default for ScrollWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl ScrollWindow {
    pub fn new(window_size: usize) -> Self {
        Self {
            offset: 0,
            window_size: window_size.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    fn max_offset(&self, len: usize) -> usize {
        len.saturating_sub(self.window_size)
    }

    pub fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub fn can_scroll_down(&self, len: usize) -> bool {
        self.offset < self.max_offset(len)
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, len: usize) {
        self.offset = (self.offset + 1).min(self.max_offset(len));
    }

    /// Re-clamp the offset after the underlying list changed length.
    pub fn clamp(&mut self, len: usize) {
        self.offset = self.offset.min(self.max_offset(len));
    }

    /// The visible slice `[offset, min(len, offset + window_size))`.
    pub fn visible<'a, T>(&self, entries: &'a [T]) -> &'a [T] {
        let start = self.offset.min(entries.len());
        let end = (self.offset + self.window_size).min(entries.len());
        &entries[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_slice_length_is_bounded() {
        let entries: Vec<usize> = (0..25).collect();
        let mut win = ScrollWindow::new(10);

        assert_eq!(win.visible(&entries), &entries[0..10]);

        for _ in 0..100 {
            win.scroll_down(entries.len());
        }
        // Offset saturates at len - window_size.
        assert_eq!(win.offset(), 15);
        assert_eq!(win.visible(&entries), &entries[15..25]);
    }

    #[test]
    fn short_lists_never_scroll() {
        let entries: Vec<usize> = (0..3).collect();
        let mut win = ScrollWindow::new(10);

        assert!(!win.can_scroll_up());
        assert!(!win.can_scroll_down(entries.len()));
        win.scroll_down(entries.len());
        assert_eq!(win.offset(), 0);
        assert_eq!(win.visible(&entries).len(), 3);
    }

    #[test]
    fn clamp_recovers_from_shrinking_list() {
        let mut win = ScrollWindow::new(10);
        for _ in 0..5 {
            win.scroll_down(15);
        }
        assert_eq!(win.offset(), 5);

        // List shrinks below the offset: clamp pulls it back in range.
        win.clamp(7);
        assert_eq!(win.offset(), 0);

        win.clamp(0);
        assert_eq!(win.offset(), 0);
        let empty: [u8; 0] = [];
        assert!(win.visible(&empty).is_empty());
    }

    #[test]
    fn scroll_up_saturates_at_zero() {
        let mut win = ScrollWindow::new(10);
        win.scroll_up();
        assert_eq!(win.offset(), 0);
        assert!(!win.can_scroll_up());

        win.scroll_down(12);
        assert!(win.can_scroll_up());
        win.scroll_up();
        assert_eq!(win.offset(), 0);
    }
}
