/// Narrowest either side of the divider may get.
pub const MIN_PANE_WIDTH: i32 = 160;

/// Geometry captured when a drag starts on the divider. Dropped on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragGesture {
    /// Left edge of the editor/preview row in window coordinates.
    origin: i32,
    /// Width of that row.
    span: i32,
}

/// Editor pane width and the divider drag in progress, if any.
#[derive(Debug)]
pub struct PanelResizer {
    width: i32,
    gesture: Option<DragGesture>,
}

impl PanelResizer {
    pub fn new(width: i32) -> Self {
        Self { width, gesture: None }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn is_resizing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a drag over a row that begins at `origin` and is `span` wide.
    pub fn press(&mut self, origin: i32, span: i32) {
        self.gesture = Some(DragGesture { origin, span });
    }

    /// Follow the pointer. Returns the new width, or `None` when no drag is active.
    pub fn drag(&mut self, pointer_x: i32) -> Option<i32> {
        let gesture = self.gesture?;
        self.width = clamp_width(pointer_x - gesture.origin, gesture.span);
        Some(self.width)
    }

    pub fn release(&mut self) {
        self.gesture = None;
    }

    /// Re-fit the width after the row itself was resized.
    pub fn fit(&mut self, span: i32) -> i32 {
        self.width = clamp_width(self.width, span);
        self.width
    }
}

fn clamp_width(width: i32, span: i32) -> i32 {
    let max = (span - MIN_PANE_WIDTH).max(MIN_PANE_WIDTH);
    width.clamp(MIN_PANE_WIDTH, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_only_while_pressed() {
        let mut resizer = PanelResizer::new(500);
        assert_eq!(resizer.drag(300), None);
        assert_eq!(resizer.width(), 500);

        resizer.press(0, 1200);
        assert!(resizer.is_resizing());
        assert_eq!(resizer.drag(300), Some(300));
        assert_eq!(resizer.drag(650), Some(650));

        resizer.release();
        assert!(!resizer.is_resizing());
        assert_eq!(resizer.drag(100), None);
        assert_eq!(resizer.width(), 650);
    }

    #[test]
    fn test_drag_is_relative_to_row_and_clamped() {
        let mut resizer = PanelResizer::new(400);
        resizer.press(20, 1000);
        assert_eq!(resizer.drag(420), Some(400));
        assert_eq!(resizer.drag(-50), Some(MIN_PANE_WIDTH));
        assert_eq!(resizer.drag(5000), Some(1000 - MIN_PANE_WIDTH));
    }

    #[test]
    fn test_fit_after_window_shrinks() {
        let mut resizer = PanelResizer::new(900);
        assert_eq!(resizer.fit(800), 800 - MIN_PANE_WIDTH);
        // Too narrow for both minimums; editor keeps its minimum
        assert_eq!(resizer.fit(200), MIN_PANE_WIDTH);
    }
}
