//! Explicit board view state and the synchronous operations on it.
//!
//! [`BoardView`] bundles everything the board shows: orientation, piece
//! registry, packing of every container, the authoritative match it was built
//! from and the dice jitter. Reset and the end state of each action are pure
//! state transitions here; timing lives in the playback engine.
use std::collections::HashMap;

use crate::action::{Action, ActionKind, InvalidActionError, InvalidActionReason};
use crate::controls::Controls;
use crate::dice::{DiceJitter, PointerButton, TurnDice};
use crate::interaction::{PointerOutcome, resolve_pointer};
use crate::layout::{BoardLayout, ContainerId, VisualSlot};
use crate::packing::Packing;
use crate::piece::{PieceId, PieceType};
use crate::registry::{PieceRegistry, RegistryError};
use crate::snapshot::{GameSnapshot, MatchSnapshot, Rule, Seats};
use crate::summary::Scoreboard;

/// Extents along the stacking axis, in board units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub point_extent: f64,
    pub bar_extent: f64,
    pub piece_extent: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            point_extent: 5.0,
            bar_extent: 4.0,
            piece_extent: 1.0,
        }
    }
}

impl Geometry {
    pub fn extent_of(&self, container: ContainerId) -> f64 {
        match container {
            ContainerId::Point(_) => self.point_extent,
            ContainerId::Bar(_) => self.bar_extent,
        }
    }
}

/// A piece travelling between containers during playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flight {
    /// Position of the action in its list.
    pub index: usize,
    pub piece: PieceId,
    pub kind: ActionKind,
    pub source: ContainerId,
    /// `None` for bear-off.
    pub destination: Option<ContainerId>,
}

/// Containers whose stacks changed when a flight landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landing {
    pub source: ContainerId,
    pub destination: Option<ContainerId>,
}

/// Which side of the board the dice are shown on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiceSide {
    /// Local player's dice, right pane.
    Right,
    /// Opponent's dice, left pane.
    Left,
}

/// What the dice panel shows.
#[derive(Clone, Debug, PartialEq)]
pub struct DiceDisplay {
    pub dice: TurnDice,
    pub owner: PieceType,
    pub side: DiceSide,
    pub played: bool,
    pub angles: Vec<f64>,
}

/// Board view state passed explicitly into every operation.
#[derive(Clone, Debug)]
pub struct BoardView {
    seats: Seats,
    layout: BoardLayout,
    registry: PieceRegistry,
    geometry: Geometry,
    packings: HashMap<ContainerId, Packing>,
    current: Option<MatchSnapshot>,
    rule: Rule,
    jitter: DiceJitter,
    flight: Option<Flight>,
    controls: Controls,
}

impl BoardView {
    pub fn new(seats: Seats, geometry: Geometry) -> Self {
        Self {
            seats,
            layout: BoardLayout::new(seats.local),
            registry: PieceRegistry::new(),
            geometry,
            packings: HashMap::new(),
            current: None,
            rule: Rule::default(),
            jitter: DiceJitter::default(),
            flight: None,
            controls: Controls::empty(),
        }
    }

    /// Destroys every element and rebuilds the board from a full snapshot.
    ///
    /// A duplicate piece id leaves the board empty and returns the error: a
    /// half-built board would silently desync from the server.
    pub fn reset(
        &mut self,
        current: MatchSnapshot,
        rule: Rule,
        seats: Seats,
        jitter: DiceJitter,
    ) -> Result<(), RegistryError> {
        self.registry.clear();
        self.packings.clear();
        self.flight = None;
        self.seats = seats;
        self.layout = BoardLayout::new(seats.local);
        self.rule = rule;
        self.jitter = jitter;

        let built = match current.current_game.as_ref() {
            Some(game) => game
                .state
                .placements()
                .try_for_each(|(container, piece)| self.registry.create(piece, container)),
            None => Ok(()),
        };

        match built {
            Ok(()) => {
                self.current = Some(current);
            }
            Err(err) => {
                self.registry.clear();
                self.current = None;
                self.repack_all();
                self.update_controls();
                return Err(err);
            }
        }

        self.repack_all();
        self.update_controls();
        Ok(())
    }

    /// Replaces the authoritative match without touching pieces.
    ///
    /// Used for turn, dice and score updates that come without actions.
    pub fn sync_match(&mut self, current: MatchSnapshot) {
        self.current = Some(current);
        self.update_controls();
    }

    /// Recomputes spacing of one container.
    pub fn repack(&mut self, container: ContainerId) {
        let packing = Packing::compute(
            self.geometry.extent_of(container),
            self.geometry.piece_extent,
            self.registry.pieces_in(container).len(),
            self.layout.alignment(container),
        );

        let ids = self.registry.pieces_in(container).to_vec();
        for (index, id) in ids.into_iter().enumerate() {
            if let Some(element) = self.registry.by_id_mut(id) {
                element.style.alignment = packing.alignment;
                element.style.offset_percent = packing.offset_percent(index);
            }
        }

        self.packings.insert(container, packing);
    }

    pub fn repack_all(&mut self) {
        for container in ContainerId::all() {
            self.repack(container);
        }
    }

    /// Applies new extents and repacks every container.
    pub fn resize(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        self.repack_all();
    }

    /// Validates `action` against the current board and describes its flight.
    pub fn prepare(&self, index: usize, action: &Action) -> Result<Flight, InvalidActionError> {
        let invalid = |reason| InvalidActionError {
            index,
            piece: action.piece,
            kind: action.kind,
            reason,
        };

        let element = self
            .registry
            .by_id(action.piece)
            .ok_or_else(|| invalid(InvalidActionReason::UnknownPiece))?;
        let destination = action.destination(element.piece.kind).map_err(invalid)?;

        Ok(Flight {
            index,
            piece: action.piece,
            kind: action.kind,
            source: element.container,
            destination,
        })
    }

    /// Marks `flight` as the piece currently animating.
    pub fn begin(&mut self, flight: Flight) {
        self.flight = Some(flight);
    }

    /// Applies the end state of `flight`: reparent or delete, then repack the
    /// affected containers.
    pub fn land(&mut self, flight: Flight) -> Result<Landing, RegistryError> {
        self.flight = None;

        let source = match flight.destination {
            Some(destination) => self.registry.reparent(flight.piece, destination)?,
            None => self.registry.remove(flight.piece)?.container,
        };

        self.repack(source);
        if let Some(destination) = flight.destination
            && destination != source
        {
            self.repack(destination);
        }

        Ok(Landing {
            source,
            destination: flight.destination,
        })
    }

    /// Recomputes and stores control visibility.
    pub fn update_controls(&mut self) -> Controls {
        self.controls = Controls::for_match(self.current.as_ref(), self.seats.local);
        self.controls
    }

    /// Rotates dice order of the current game when moves remain.
    pub fn rotate_dice(&mut self) -> bool {
        let rotated = self
            .current
            .as_mut()
            .and_then(|m| m.current_game.as_mut())
            .and_then(|game| game.turn_dice.as_mut())
            .is_some_and(TurnDice::rotate_left);
        self.update_controls();
        rotated
    }

    /// Resolves a pointer press. Only the local player's remaining moves can
    /// be played.
    pub fn pointer(&self, slot: VisualSlot, button: PointerButton) -> PointerOutcome {
        let dice = self
            .game()
            .filter(|game| game.is_player_turn(self.seats.local))
            .and_then(|game| game.turn_dice.as_ref());
        resolve_pointer(&self.registry, &self.layout, dice, slot, button)
    }

    pub fn set_jitter(&mut self, jitter: DiceJitter) {
        self.jitter = jitter;
    }

    pub fn scoreboard(&self) -> Option<Scoreboard> {
        Scoreboard::build(self.current.as_ref()?, &self.rule, self.seats)
    }

    /// Dice panel contents, `None` while the panel is hidden.
    pub fn dice_display(&self) -> Option<DiceDisplay> {
        if !self.controls.contains(Controls::DICE) {
            return None;
        }
        let game = self.game()?;
        let owner = game.turn_player?;
        let dice = game.turn_dice.clone()?;
        let angles = (0..dice.values.len()).map(|i| self.jitter.angle(i)).collect();

        Some(DiceDisplay {
            played: dice.all_played(),
            side: if owner == self.seats.local {
                DiceSide::Right
            } else {
                DiceSide::Left
            },
            owner,
            dice,
            angles,
        })
    }

    pub fn game(&self) -> Option<&GameSnapshot> {
        self.current.as_ref()?.current_game.as_ref()
    }

    pub fn current_match(&self) -> Option<&MatchSnapshot> {
        self.current.as_ref()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn seats(&self) -> Seats {
        self.seats
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn registry(&self) -> &PieceRegistry {
        &self.registry
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn packing(&self, container: ContainerId) -> Option<&Packing> {
        self.packings.get(&container)
    }

    pub fn flight(&self) -> Option<Flight> {
        self.flight
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn jitter(&self) -> &DiceJitter {
        &self.jitter
    }
}
