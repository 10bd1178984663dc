//! CupCanvas: the terminal's [`Renderer`] collaborator.
//!
//! The driver owns one handle and tells it where cups go; the game loop
//! keeps a clone and reads the placements back when drawing a frame.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Cup, Layout};
use crate::engine::Renderer;
use crate::types::Point;

/// Cup width in terminal columns.
pub const CUP_COLS: u16 = 5;
/// Cup height in terminal rows.
pub const CUP_ROWS: u16 = 3;

/// Cup geometry in terminal cells. Levels do not overlap.
pub fn terminal_layout() -> Layout {
    Layout::with_metrics(CUP_COLS as f32, CUP_ROWS as f32, CUP_ROWS as f32, 6.0)
}

/// Where a cup was last placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub cup: Cup,
    pub at: Point,
}

#[derive(Debug, Clone, Default)]
pub struct CupCanvas {
    slots: Rc<RefCell<Vec<Option<Placement>>>>,
}

impl CupCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placement(&self, index: usize) -> Option<Placement> {
        self.slots.borrow().get(index).copied().flatten()
    }

    /// Copy of every slot, indexed like the session's cups.
    pub fn placements(&self) -> Vec<Option<Placement>> {
        self.slots.borrow().clone()
    }

    pub fn placed_count(&self) -> usize {
        self.slots.borrow().iter().flatten().count()
    }
}

impl Renderer for CupCanvas {
    fn render(&mut self, index: usize, cup: &Cup, at: Point) {
        let mut slots = self.slots.borrow_mut();
        if slots.len() <= index {
            slots.resize(index + 1, None);
        }
        slots[index] = Some(Placement { cup: *cup, at });
    }

    fn clear(&mut self) {
        self.slots.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn cup(letter: char) -> Cup {
        Cup {
            letter,
            side: Side::Left,
            stack_index: 0,
            level: 0,
            position: 0,
            max_level: 0,
            is_stacked: false,
            single_stack: false,
        }
    }

    #[test]
    fn test_clones_share_placements() {
        let canvas = CupCanvas::new();
        let mut handle = canvas.clone();
        handle.render(2, &cup('K'), Point::new(3.0, 4.0));
        handle.render(2, &cup('K'), Point::new(3.0, 4.0));

        assert_eq!(canvas.placed_count(), 1);
        assert!(canvas.placement(0).is_none());
        assert_eq!(canvas.placement(2).unwrap().at, Point::new(3.0, 4.0));

        handle.clear();
        assert_eq!(canvas.placed_count(), 0);
    }

    #[test]
    fn test_terminal_layout_fits_default_terminal() {
        use crate::types::AreaSize;
        let layout = terminal_layout();
        let area = AreaSize::new(80.0, 24.0);
        let top = Cup {
            max_level: 4,
            single_stack: true,
            ..cup('A')
        };
        let at = layout.stack_position(&top, area);
        assert!(at.y >= 1.0, "top cup at {at:?} collides with the HUD");
        let corner = Cup {
            level: 4,
            position: 0,
            ..top
        };
        assert!(layout.stack_position(&corner, area).x >= 0.0);
    }
}
