//! Piece identity and color.
//!
//! Pieces are owned by the game model on the server. The board only keeps a
//! visual projection keyed by [`PieceId`], so these types stay small and `Copy`.
use core::fmt;

use strum::{Display, EnumIter, EnumString};

/// Server-assigned piece identifier, unique for the lifetime of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece#{}", self.0)
    }
}

/// One of the two piece colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PieceType {
    #[strum(to_string = "white", serialize = "w")]
    White,
    #[strum(to_string = "black", serialize = "b")]
    Black,
}

impl PieceType {
    pub const ALL: [PieceType; 2] = [PieceType::White, PieceType::Black];

    /// Returns the other color.
    pub const fn opponent(self) -> Self {
        match self {
            PieceType::White => PieceType::Black,
            PieceType::Black => PieceType::White,
        }
    }

    /// Index into per-color arrays (scores, bars).
    pub const fn index(self) -> usize {
        match self {
            PieceType::White => 0,
            PieceType::Black => 1,
        }
    }
}

/// A piece as delivered by the remote game service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub id: PieceId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: PieceType,
}

impl Piece {
    pub const fn new(id: u32, kind: PieceType) -> Self {
        Self {
            id: PieceId(id),
            kind,
        }
    }
}
