//! Pixel layout constants
//!
//! Every distance is a multiple of the pixel scale so the board keeps its
//! proportions at any scale. At the default scale of 3 a card is 51x69 and
//! consecutive cards in a fan sit 24 pixels apart.

use crate::core::geometry::Size;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub pixel_scale: i32,
    /// Size of a single card
    pub card: Size,
    /// Vertical offset between consecutive cards in a fan
    pub card_spacing: i32,
    /// Gap between neighbouring piles
    pub pile_spacing: i32,
    /// Gap separating the stock column and the foundation column from the tableau
    pub extra_pile_spacing: i32,
}

impl Layout {
    pub fn from_pixel_scale(pixel_scale: i32) -> Self {
        Layout {
            pixel_scale,
            card: Size::new(17 * pixel_scale, 23 * pixel_scale),
            card_spacing: 8 * pixel_scale,
            pile_spacing: pixel_scale,
            extra_pile_spacing: 5 * pixel_scale,
        }
    }

    /// Size of the whole board: tableau columns plus the stock and foundation
    /// columns, tall enough for a full descending run
    pub fn board_size(&self, tableau_piles: usize, max_rank: u8) -> Size {
        let columns = tableau_piles as i32 * (self.card.width + self.pile_spacing)
            + 2 * (self.card.width + self.extra_pile_spacing);
        let height = self.card.height + self.card_spacing * (max_rank as i32 - 1);
        Size::new(columns, height)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::from_pixel_scale(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let layout = Layout::default();
        assert_eq!(layout.card, Size::new(51, 69));
        assert_eq!(layout.card_spacing, 24);
        assert_eq!(layout.pile_spacing, 3);
        assert_eq!(layout.extra_pile_spacing, 15);
    }

    #[test]
    fn test_board_size() {
        let layout = Layout::default();
        let size = layout.board_size(7, 13);
        assert_eq!(size.width, 7 * 54 + 2 * 66);
        assert_eq!(size.height, 69 + 24 * 12);
    }
}
