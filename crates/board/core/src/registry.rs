//! Exclusive index of visual piece elements and the ordered containers that
//! hold them.
//!
//! Every live element is reachable both by piece id and through exactly one
//! container sequence. The last id in a sequence is the top of the stack,
//! which is what a pointer interaction acts on.
use std::collections::HashMap;

use thiserror::Error;

use crate::layout::{Alignment, ContainerId, POINT_COUNT};
use crate::piece::{Piece, PieceId, PieceType};

/// Invariant violations raised by the registry.
///
/// These indicate a desync between the server state and the board and must
/// not be swallowed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{0} is already registered")]
    DuplicatePiece(PieceId),

    #[error("{0} is not registered")]
    UnknownPiece(PieceId),
}

/// Render style of a resting element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieceStyle {
    pub alignment: Alignment,
    /// Offset from the alignment edge in percent of one piece extent.
    pub offset_percent: f64,
}

impl Default for PieceStyle {
    fn default() -> Self {
        Self {
            alignment: Alignment::Top,
            offset_percent: 0.0,
        }
    }
}

/// The visual projection of one piece.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceElement {
    pub piece: Piece,
    pub container: ContainerId,
    pub style: PieceStyle,
}

/// Ordered piece sequence of one container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    pieces: Vec<PieceId>,
}

impl Slot {
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    pub fn top(&self) -> Option<PieceId> {
        self.pieces.last().copied()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    fn remove(&mut self, id: PieceId) -> bool {
        match self.pieces.iter().position(|p| *p == id) {
            Some(index) => {
                self.pieces.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Indexed collection of the 24 point slots and the two bars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotRegistry {
    points: [Slot; POINT_COUNT],
    bars: [Slot; 2],
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self {
            points: std::array::from_fn(|_| Slot::default()),
            bars: [Slot::default(), Slot::default()],
        }
    }
}

impl SlotRegistry {
    pub fn get(&self, container: ContainerId) -> &Slot {
        match container {
            ContainerId::Point(point) => &self.points[point.index()],
            ContainerId::Bar(kind) => &self.bars[kind.index()],
        }
    }

    fn get_mut(&mut self, container: ContainerId) -> &mut Slot {
        match container {
            ContainerId::Point(point) => &mut self.points[point.index()],
            ContainerId::Bar(kind) => &mut self.bars[kind.index()],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContainerId, &Slot)> {
        ContainerId::all().map(move |id| (id, self.get(id)))
    }
}

/// Exclusive bidirectional map between piece ids and visual elements.
#[derive(Clone, Debug, Default)]
pub struct PieceRegistry {
    elements: HashMap<PieceId, PieceElement>,
    slots: SlotRegistry,
}

impl PieceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new element on top of `container`.
    pub fn create(&mut self, piece: Piece, container: ContainerId) -> Result<(), RegistryError> {
        if self.elements.contains_key(&piece.id) {
            return Err(RegistryError::DuplicatePiece(piece.id));
        }

        self.elements.insert(
            piece.id,
            PieceElement {
                piece,
                container,
                style: PieceStyle::default(),
            },
        );
        self.slots.get_mut(container).pieces.push(piece.id);
        Ok(())
    }

    /// Destroys an element, returning it.
    pub fn remove(&mut self, id: PieceId) -> Result<PieceElement, RegistryError> {
        let element = self
            .elements
            .remove(&id)
            .ok_or(RegistryError::UnknownPiece(id))?;
        self.slots.get_mut(element.container).remove(id);
        Ok(element)
    }

    /// Moves an element on top of `destination`, returning its previous
    /// container.
    pub fn reparent(
        &mut self,
        id: PieceId,
        destination: ContainerId,
    ) -> Result<ContainerId, RegistryError> {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(RegistryError::UnknownPiece(id))?;
        let source = element.container;
        element.container = destination;

        self.slots.get_mut(source).remove(id);
        self.slots.get_mut(destination).pieces.push(id);
        Ok(source)
    }

    pub fn by_id(&self, id: PieceId) -> Option<&PieceElement> {
        self.elements.get(&id)
    }

    pub fn by_id_mut(&mut self, id: PieceId) -> Option<&mut PieceElement> {
        self.elements.get_mut(&id)
    }

    pub fn container_of(&self, id: PieceId) -> Option<ContainerId> {
        self.elements.get(&id).map(|element| element.container)
    }

    /// The most recently placed piece in `container`.
    pub fn top_of(&self, container: ContainerId) -> Option<&PieceElement> {
        self.slots
            .get(container)
            .top()
            .and_then(|id| self.elements.get(&id))
    }

    pub fn pieces_in(&self, container: ContainerId) -> &[PieceId] {
        self.slots.get(container).pieces()
    }

    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of live elements of one color.
    pub fn count_of(&self, kind: PieceType) -> usize {
        self.elements
            .values()
            .filter(|element| element.piece.kind == kind)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceElement> {
        self.elements.values()
    }

    /// Destroys every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.slots = SlotRegistry::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;

    fn point(index: u8) -> ContainerId {
        ContainerId::Point(Point::new(index).unwrap())
    }

    #[test]
    fn create_rejects_duplicate_ids() {
        let mut registry = PieceRegistry::new();
        let piece = Piece::new(1, PieceType::White);
        registry.create(piece, point(0)).unwrap();

        let err = registry.create(piece, point(5)).unwrap_err();
        assert_eq!(err, RegistryError::DuplicatePiece(piece.id));
        assert!(registry.pieces_in(point(5)).is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn top_of_is_last_inserted() {
        let mut registry = PieceRegistry::new();
        registry.create(Piece::new(1, PieceType::White), point(3)).unwrap();
        registry.create(Piece::new(2, PieceType::White), point(3)).unwrap();
        assert_eq!(registry.top_of(point(3)).unwrap().piece.id, PieceId(2));
        assert!(registry.top_of(point(4)).is_none());
    }

    #[test]
    fn reparent_moves_between_sequences() {
        let mut registry = PieceRegistry::new();
        registry.create(Piece::new(1, PieceType::Black), point(3)).unwrap();
        registry.create(Piece::new(2, PieceType::Black), point(3)).unwrap();
        registry.create(Piece::new(3, PieceType::Black), point(7)).unwrap();

        let source = registry.reparent(PieceId(1), point(7)).unwrap();
        assert_eq!(source, point(3));
        assert_eq!(registry.pieces_in(point(3)), &[PieceId(2)]);
        assert_eq!(registry.pieces_in(point(7)), &[PieceId(3), PieceId(1)]);
        assert_eq!(registry.container_of(PieceId(1)), Some(point(7)));
    }

    #[test]
    fn remove_and_clear_release_elements() {
        let mut registry = PieceRegistry::new();
        registry.create(Piece::new(1, PieceType::Black), point(0)).unwrap();
        registry
            .create(Piece::new(2, PieceType::White), ContainerId::Bar(PieceType::White))
            .unwrap();

        let removed = registry.remove(PieceId(1)).unwrap();
        assert_eq!(removed.container, point(0));
        assert_eq!(registry.remove(PieceId(1)), Err(RegistryError::UnknownPiece(PieceId(1))));
        assert_eq!(registry.count_of(PieceType::White), 1);

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.pieces_in(ContainerId::Bar(PieceType::White)).is_empty());
    }
}
