//! Orientation-aware mapping between canonical board positions and the visual
//! slots drawn on screen.
//!
//! The server numbers the 24 points independently of who is looking at the
//! board. The board is always drawn from the local player's side, so for the
//! black player every point is rotated by half a board. The local bar is drawn
//! at the top, the opponent's bar at the bottom.
//!
//! ```text
//! +12-13-14-15-16-17------18-19-20-21-22-23-+
//! |   top-left       |   |   top-right      |
//! |                  |   |                  |
//! |   bottom-left    |   |   bottom-right   |
//! +11-10--9--8--7--6-------5--4--3--2--1--0-+
//! ```
//!
//! The numbers above are visual indices. The mapping is an involution for
//! both colors, so [`BoardLayout::project`] and [`BoardLayout::unproject`]
//! share one formula.
use core::fmt;

use crate::piece::PieceType;

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

/// Number of points in one quadrant.
pub const QUADRANT_SIZE: usize = 6;

/// Canonical point index (0..24) as numbered by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Point(u8);

impl Point {
    /// Creates a point, returning `None` outside 0..24.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < POINT_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Point> {
        (0..POINT_COUNT as u8).map(Point)
    }
}

impl TryFrom<u8> for Point {
    type Error = PointOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Point::new(value).ok_or(PointOutOfRange(value))
    }
}

impl From<Point> for u8 {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("point index {0} is outside 0..24")]
pub struct PointOutOfRange(pub u8);

/// A canonical container: one of the 24 points or the bar of one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContainerId {
    Point(Point),
    Bar(PieceType),
}

impl ContainerId {
    pub fn all() -> impl Iterator<Item = ContainerId> {
        Point::all()
            .map(ContainerId::Point)
            .chain(PieceType::ALL.into_iter().map(ContainerId::Bar))
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Point(point) => write!(f, "{point}"),
            ContainerId::Bar(kind) => write!(f, "bar-{kind}"),
        }
    }
}

/// A slot as placed on screen.
///
/// `Point(i)` uses the visual numbering of the module diagram, which is the
/// canonical numbering seen from the white side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualSlot {
    Point(u8),
    TopBar,
    BottomBar,
}

/// Edge a stack grows from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    Top,
    Bottom,
}

/// Parity class used to alternate point colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

/// One of the four fields of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
    ];

    /// Visual point indices in the quadrant, ordered left to right.
    pub const fn visual_points(self) -> [u8; QUADRANT_SIZE] {
        match self {
            Quadrant::TopLeft => [12, 13, 14, 15, 16, 17],
            Quadrant::BottomLeft => [11, 10, 9, 8, 7, 6],
            Quadrant::TopRight => [18, 19, 20, 21, 22, 23],
            Quadrant::BottomRight => [5, 4, 3, 2, 1, 0],
        }
    }

    pub const fn is_top(self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::TopRight)
    }
}

/// Orientation of the board for one local color.
///
/// Fixed for a match; rebuilt only on reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    local: PieceType,
}

impl BoardLayout {
    pub const fn new(local: PieceType) -> Self {
        Self { local }
    }

    pub const fn local(&self) -> PieceType {
        self.local
    }

    /// Projects a canonical container onto its visual slot.
    pub fn project(&self, container: ContainerId) -> VisualSlot {
        match container {
            ContainerId::Point(point) => VisualSlot::Point(rotate(self.local, point.0)),
            ContainerId::Bar(kind) if kind == self.local => VisualSlot::TopBar,
            ContainerId::Bar(_) => VisualSlot::BottomBar,
        }
    }

    /// Inverse of [`BoardLayout::project`]. Returns `None` only for visual
    /// point indices outside 0..24.
    pub fn unproject(&self, slot: VisualSlot) -> Option<ContainerId> {
        match slot {
            VisualSlot::Point(index) if (index as usize) < POINT_COUNT => {
                Point::new(rotate(self.local, index)).map(ContainerId::Point)
            }
            VisualSlot::Point(_) => None,
            VisualSlot::TopBar => Some(ContainerId::Bar(self.local)),
            VisualSlot::BottomBar => Some(ContainerId::Bar(self.local.opponent())),
        }
    }

    /// Edge the stack in `container` grows from.
    pub fn alignment(&self, container: ContainerId) -> Alignment {
        match self.project(container) {
            VisualSlot::Point(index) if index >= 12 => Alignment::Top,
            VisualSlot::Point(_) => Alignment::Bottom,
            VisualSlot::TopBar => Alignment::Top,
            VisualSlot::BottomBar => Alignment::Bottom,
        }
    }

    /// Alignment of the bar holding pieces of `kind`.
    pub fn bar_alignment(&self, kind: PieceType) -> Alignment {
        self.alignment(ContainerId::Bar(kind))
    }

    /// Canonical points of a quadrant, in drawing order.
    pub fn quadrant_points(&self, quadrant: Quadrant) -> [Point; QUADRANT_SIZE] {
        quadrant
            .visual_points()
            .map(|visual| Point(rotate(self.local, visual)))
    }

    /// Parity class of a canonical point, by its visual index.
    pub fn parity(&self, point: Point) -> Parity {
        if rotate(self.local, point.0) % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

const fn rotate(local: PieceType, index: u8) -> u8 {
    match local {
        PieceType::White => index,
        PieceType::Black => (index + 12) % POINT_COUNT as u8,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn point(index: u8) -> Point {
        Point::new(index).unwrap()
    }

    #[test]
    fn projection_is_bijective_for_both_colors() {
        for local in PieceType::ALL {
            let layout = BoardLayout::new(local);
            let slots: HashSet<_> = ContainerId::all().map(|c| layout.project(c)).collect();
            assert_eq!(slots.len(), POINT_COUNT + 2);

            for container in ContainerId::all() {
                let slot = layout.project(container);
                assert_eq!(layout.unproject(slot), Some(container));
            }
        }
    }

    #[test]
    fn black_orientation_rotates_half_a_board() {
        let layout = BoardLayout::new(PieceType::Black);
        assert_eq!(
            layout.project(ContainerId::Point(point(0))),
            VisualSlot::Point(12)
        );
        assert_eq!(
            layout.project(ContainerId::Point(point(23))),
            VisualSlot::Point(11)
        );
        assert_eq!(
            layout.project(ContainerId::Bar(PieceType::Black)),
            VisualSlot::TopBar
        );
        assert_eq!(
            layout.project(ContainerId::Bar(PieceType::White)),
            VisualSlot::BottomBar
        );
    }

    #[test]
    fn alignment_follows_visual_half() {
        let white = BoardLayout::new(PieceType::White);
        assert_eq!(white.alignment(ContainerId::Point(point(3))), Alignment::Bottom);
        assert_eq!(white.alignment(ContainerId::Point(point(15))), Alignment::Top);

        let black = BoardLayout::new(PieceType::Black);
        assert_eq!(black.alignment(ContainerId::Point(point(3))), Alignment::Top);
        assert_eq!(black.alignment(ContainerId::Point(point(15))), Alignment::Bottom);
        assert_eq!(black.bar_alignment(PieceType::Black), Alignment::Top);
        assert_eq!(black.bar_alignment(PieceType::White), Alignment::Bottom);
    }

    #[test]
    fn quadrants_cover_every_point_once() {
        for local in PieceType::ALL {
            let layout = BoardLayout::new(local);
            let points: HashSet<_> = Quadrant::ALL
                .iter()
                .flat_map(|q| layout.quadrant_points(*q))
                .collect();
            assert_eq!(points.len(), POINT_COUNT);
        }
    }

    #[test]
    fn unproject_rejects_out_of_range_visual_index() {
        let layout = BoardLayout::new(PieceType::White);
        assert_eq!(layout.unproject(VisualSlot::Point(24)), None);
    }
}
