//! Layout engine - pyramid slot indexing and cup coordinates.
//!
//! A pyramid of height `h` holds `h·(h+1)/2` cups. Level `L` (0 = top) holds
//! exactly `L + 1` slots. The deepest level sits on the base line and every
//! shallower level is lifted by one level offset.

use crate::cup::Cup;
use crate::types::*;

/// Map a linear stack index to `(level, position_in_level)`.
///
/// Walks levels, accumulating slot counts, until the cumulative count
/// exceeds `index`.
///
/// # Panics
///
/// Panics if `index >= total`. Round generation only produces in-range
/// indices, so an out-of-range call is a logic error.
///
/// # Examples
///
/// ```
/// use cupstack_core::layout::level_and_position;
///
/// assert_eq!(level_and_position(6, 0), (0, 0));
/// assert_eq!(level_and_position(6, 2), (1, 1));
/// assert_eq!(level_and_position(6, 5), (2, 2));
/// ```
pub fn level_and_position(total: u32, index: u32) -> (u32, u32) {
    assert!(
        index < total,
        "stack index {index} out of range for a stack of {total} cups"
    );

    let mut before = 0u32;
    let mut level = 0u32;
    loop {
        let slots = level + 1;
        if before + slots > index {
            return (level, index - before);
        }
        before += slots;
        level += 1;
    }
}

/// Geometry used to place cups inside a play area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub cup_width: f32,
    pub cup_height: f32,
    pub level_offset: f32,
    pub cup_spacing: f32,
    pub base_y_percent: f32,
    pub left_x_percent: f32,
    pub right_x_percent: f32,
    pub center_x_percent: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cup_width: CUP_WIDTH,
            cup_height: CUP_HEIGHT,
            level_offset: LEVEL_OFFSET,
            cup_spacing: CUP_SPACING,
            base_y_percent: BASE_Y_PERCENT,
            left_x_percent: LEFT_STACK_X_PERCENT,
            right_x_percent: RIGHT_STACK_X_PERCENT,
            center_x_percent: CENTER_STACK_X_PERCENT,
        }
    }
}

impl Layout {
    /// Same proportions, different cup metrics (e.g. terminal cells).
    pub fn with_metrics(cup_width: f32, cup_height: f32, level_offset: f32, cup_spacing: f32) -> Self {
        Self {
            cup_width,
            cup_height,
            level_offset,
            cup_spacing,
            ..Self::default()
        }
    }

    /// Horizontal centre of the cup's pyramid.
    pub fn stack_center_x(&self, cup: &Cup, area: AreaSize) -> f32 {
        let percent = if cup.single_stack {
            self.center_x_percent
        } else {
            match cup.side {
                Side::Left => self.left_x_percent,
                Side::Right => self.right_x_percent,
            }
        };
        area.width * (percent / 100.0)
    }

    /// Top-left corner of the cup's slot.
    pub fn stack_position(&self, cup: &Cup, area: AreaSize) -> Point {
        let center_x = self.stack_center_x(cup, area);
        let base_y = area.height * (self.base_y_percent / 100.0) - self.cup_height;
        let y = base_y - (cup.max_level - cup.level) as f32 * self.level_offset;

        let level_width = cup.level as f32 * self.cup_spacing;
        let start_x = center_x - level_width / 2.0;
        let x = start_x + cup.position as f32 * self.cup_spacing;

        Point::new(x - self.cup_width / 2.0, y)
    }
}

/// [`Layout::stack_position`] with the default pixel metrics.
pub fn stack_position(cup: &Cup, area: AreaSize) -> Point {
    Layout::default().stack_position(cup, area)
}
