//! Board model and view logic for a two-player backgammon table.
//!
//! `board-core` is pure and synchronous. It defines the canonical board
//! containers, the local-perspective projection, stack packing, the piece
//! registry and the derivation rules for controls, pointer input and
//! animation curves. All view mutation flows through [`view::BoardView`];
//! the runtime crate adds timing and the command loop on top.
pub mod action;
pub mod animation;
pub mod controls;
pub mod dice;
pub mod interaction;
pub mod layout;
pub mod packing;
pub mod piece;
pub mod registry;
pub mod snapshot;
pub mod summary;
pub mod view;

pub use action::{Action, ActionKind, InvalidActionError, InvalidActionReason};
pub use animation::{
    ACTION_GAP, AnimationPhase, AnimationPlan, CubicBezier, FlightFrame, PhaseEffect,
};
pub use controls::{ControlInputs, Controls};
pub use dice::{DiceJitter, JITTER_SLOTS, MAX_DICE, PointerButton, TurnDice};
pub use interaction::{MoveRequest, PointerOutcome, resolve_pointer};
pub use layout::{
    Alignment, BoardLayout, ContainerId, POINT_COUNT, Parity, Point, PointOutOfRange, Quadrant,
    VisualSlot,
};
pub use packing::{FULL_RATIO, MIN_RATIO, Packing, margin_ratio};
pub use piece::{Piece, PieceId, PieceType};
pub use registry::{PieceElement, PieceRegistry, PieceStyle, RegistryError, Slot, SlotRegistry};
pub use snapshot::{BoardSnapshot, GameSnapshot, MatchSnapshot, Rule, Seats};
pub use summary::{GameResult, NOTICE_TIMEOUT, Notice, NoticeTone, RESULT_TIMEOUT, Scoreboard};
pub use view::{BoardView, DiceDisplay, DiceSide, Flight, Geometry, Landing};
