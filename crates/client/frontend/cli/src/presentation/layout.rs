//! Screen geometry of the board and hit-testing of mouse positions.
//!
//! The same [`BoardRects`] is used to draw the board and to resolve clicks,
//! so what the player sees is what the pointer hits.
use board_core::layout::QUADRANT_SIZE;
use board_core::{Alignment, DiceSide, Geometry, POINT_COUNT, Quadrant, VisualSlot};
use ratatui::layout::{Position, Rect};

/// Width of each dice pane beside the fields.
pub const PANE_WIDTH: u16 = 10;
/// Width of the bar column between the fields.
pub const BAR_WIDTH: u16 = 5;

/// What a mouse position lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardHit {
    Slot(VisualSlot),
    Dice(DiceSide),
}

/// Rectangles of the board interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardRects {
    pub inner: Rect,
    pub left_pane: Rect,
    pub left_field: Rect,
    pub bar: Rect,
    pub right_field: Rect,
    pub right_pane: Rect,
    pub column_width: u16,
    pub half_height: u16,
}

impl BoardRects {
    pub fn compute(inner: Rect) -> Self {
        let columns = 2 * QUADRANT_SIZE as u16;
        let fields = inner.width.saturating_sub(2 * PANE_WIDTH + BAR_WIDTH);
        let column_width = (fields / columns).max(1);
        let field_width = column_width * QUADRANT_SIZE as u16;

        let column = |x: u16, width: u16| Rect::new(x, inner.y, width, inner.height);
        let left_pane = column(inner.x, PANE_WIDTH);
        let left_field = column(left_pane.right(), field_width);
        let bar = column(left_field.right(), BAR_WIDTH);
        let right_field = column(bar.right(), field_width);
        let right_pane = column(right_field.right(), PANE_WIDTH);

        Self {
            inner,
            left_pane,
            left_field,
            bar,
            right_field,
            right_pane,
            column_width,
            half_height: inner.height / 2,
        }
    }

    /// Extents handed to the runtime, one terminal row per piece.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            point_extent: f64::from(self.half_height),
            // One row of the bar is kept for its label.
            bar_extent: f64::from(self.half_height.saturating_sub(1).max(1)),
            piece_extent: 1.0,
        }
    }

    /// Column occupied by `slot`.
    pub fn slot_rect(&self, slot: VisualSlot) -> Rect {
        match slot {
            VisualSlot::Point(index) => {
                let (quadrant, position) = locate(index);
                let field = match quadrant {
                    Quadrant::TopLeft | Quadrant::BottomLeft => self.left_field,
                    Quadrant::TopRight | Quadrant::BottomRight => self.right_field,
                };
                let x = field.x + position * self.column_width;
                self.half(x, self.column_width, quadrant.is_top())
            }
            VisualSlot::TopBar => self.half(self.bar.x, self.bar.width, true),
            VisualSlot::BottomBar => self.half(self.bar.x, self.bar.width, false),
        }
    }

    pub fn dice_pane(&self, side: DiceSide) -> Rect {
        match side {
            DiceSide::Left => self.left_pane,
            DiceSide::Right => self.right_pane,
        }
    }

    /// Cell of the piece at `offset_percent` in `slot`, counted from its
    /// alignment edge. Deep stacks are clamped to the far edge.
    pub fn piece_cell(
        &self,
        slot: VisualSlot,
        offset_percent: f64,
        alignment: Alignment,
    ) -> (u16, u16) {
        let rect = self.slot_rect(slot);
        let rows = ((offset_percent / 100.0).floor().max(0.0) as u16)
            .min(rect.height.saturating_sub(1));
        let x = rect.x + rect.width / 2;
        let y = match alignment {
            Alignment::Top => rect.y + rows,
            Alignment::Bottom => rect.bottom().saturating_sub(1 + rows),
        };
        (x, y)
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<BoardHit> {
        let position = Position::new(column, row);
        if !self.inner.contains(position) {
            return None;
        }
        if self.left_pane.contains(position) {
            return Some(BoardHit::Dice(DiceSide::Left));
        }
        if self.right_pane.contains(position) {
            return Some(BoardHit::Dice(DiceSide::Right));
        }

        all_slots()
            .find(|slot| self.slot_rect(*slot).contains(position))
            .map(BoardHit::Slot)
    }

    fn half(&self, x: u16, width: u16, top: bool) -> Rect {
        let y = if top {
            self.inner.y
        } else {
            self.inner.bottom().saturating_sub(self.half_height)
        };
        Rect::new(x, y, width, self.half_height)
    }
}

/// Every visual slot: the 24 points, then both bars.
pub fn all_slots() -> impl Iterator<Item = VisualSlot> {
    (0..POINT_COUNT as u8)
        .map(VisualSlot::Point)
        .chain([VisualSlot::TopBar, VisualSlot::BottomBar])
}

fn locate(index: u8) -> (Quadrant, u16) {
    Quadrant::ALL
        .into_iter()
        .find_map(|quadrant| {
            quadrant
                .visual_points()
                .iter()
                .position(|visual| *visual == index)
                .map(|position| (quadrant, position as u16))
        })
        .unwrap_or((Quadrant::BottomRight, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects() -> BoardRects {
        // 2 panes + bar = 25 columns, 12 point columns of 3.
        BoardRects::compute(Rect::new(1, 1, 61, 20))
    }

    #[test]
    fn columns_follow_quadrant_order() {
        let rects = rects();
        assert_eq!(rects.column_width, 3);
        assert_eq!(rects.slot_rect(VisualSlot::Point(12)).x, rects.left_field.x);
        assert_eq!(rects.slot_rect(VisualSlot::Point(11)).x, rects.left_field.x);
        assert_eq!(rects.slot_rect(VisualSlot::Point(23)).right(), rects.right_field.right());
        assert_eq!(rects.slot_rect(VisualSlot::Point(0)).right(), rects.right_field.right());
        assert_eq!(rects.slot_rect(VisualSlot::Point(0)).bottom(), rects.inner.bottom());
    }

    #[test]
    fn hit_resolves_points_bars_and_dice() {
        let rects = rects();
        let top_left = rects.left_field;
        assert_eq!(
            rects.hit(top_left.x, top_left.y),
            Some(BoardHit::Slot(VisualSlot::Point(12)))
        );
        assert_eq!(
            rects.hit(top_left.x + 3, rects.inner.bottom() - 1),
            Some(BoardHit::Slot(VisualSlot::Point(10)))
        );
        assert_eq!(
            rects.hit(rects.bar.x, rects.inner.bottom() - 1),
            Some(BoardHit::Slot(VisualSlot::BottomBar))
        );
        assert_eq!(
            rects.hit(rects.right_pane.x + 1, 5),
            Some(BoardHit::Dice(DiceSide::Right))
        );
        assert_eq!(rects.hit(0, 0), None);
    }

    #[test]
    fn every_slot_hits_itself() {
        let rects = rects();
        for slot in all_slots() {
            let rect = rects.slot_rect(slot);
            assert_eq!(rects.hit(rect.x, rect.y), Some(BoardHit::Slot(slot)));
        }
    }

    #[test]
    fn piece_cells_grow_from_alignment_edge() {
        let rects = rects();
        let rect = rects.slot_rect(VisualSlot::Point(0));
        assert_eq!(
            rects.piece_cell(VisualSlot::Point(0), 0.0, Alignment::Bottom),
            (rect.x + 1, rect.bottom() - 1)
        );
        assert_eq!(
            rects.piece_cell(VisualSlot::Point(0), 250.0, Alignment::Bottom),
            (rect.x + 1, rect.bottom() - 3)
        );
        // Clamped to the far edge.
        assert_eq!(
            rects.piece_cell(VisualSlot::Point(0), 5000.0, Alignment::Bottom).1,
            rect.y
        );
        assert_eq!(rects.geometry().point_extent, 10.0);
        assert_eq!(rects.geometry().bar_extent, 9.0);
    }
}
