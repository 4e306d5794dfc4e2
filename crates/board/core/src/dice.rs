//! Turn dice and the ordered list of moves left.
use arrayvec::ArrayVec;

/// Maximum number of die values in one turn (doubles play four times).
pub const MAX_DICE: usize = 4;

/// Number of jitter angles kept for the dice display.
pub const JITTER_SLOTS: usize = 10;

/// Maximum absolute jitter angle in degrees.
pub const JITTER_DEGREES: f64 = 15.0;

/// Dice rolled for the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TurnDice {
    pub values: ArrayVec<u8, MAX_DICE>,
    /// Remaining usable values, in play order.
    pub moves_left: ArrayVec<u8, MAX_DICE>,
}

/// Which end of "moves left" a gesture consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Plays the first value.
    Primary,
    /// Plays the last value.
    Secondary,
}

impl TurnDice {
    /// Builds dice whose moves left equal the rolled values.
    pub fn rolled(values: &[u8]) -> Self {
        let values: ArrayVec<u8, MAX_DICE> = values.iter().copied().take(MAX_DICE).collect();
        Self {
            moves_left: values.clone(),
            values,
        }
    }

    pub fn with_moves_left(mut self, moves_left: &[u8]) -> Self {
        self.moves_left = moves_left.iter().copied().take(MAX_DICE).collect();
        self
    }

    pub fn was_rolled(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn has_more_moves(&self) -> bool {
        !self.moves_left.is_empty()
    }

    pub fn all_played(&self) -> bool {
        self.moves_left.is_empty()
    }

    /// Steps played by a gesture, or `None` when no moves are left.
    pub fn steps_for(&self, button: PointerButton) -> Option<u8> {
        match button {
            PointerButton::Primary => self.moves_left.first().copied(),
            PointerButton::Secondary => self.moves_left.last().copied(),
        }
    }

    /// Swaps play order by rotating both lists left by one.
    ///
    /// Returns `false` without changes when no moves are left.
    pub fn rotate_left(&mut self) -> bool {
        if self.moves_left.is_empty() {
            return false;
        }
        if !self.values.is_empty() {
            self.values.rotate_left(1);
        }
        self.moves_left.rotate_left(1);
        true
    }
}

/// Rotation angles giving the dice display a hand-thrown look.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiceJitter {
    angles: [f64; JITTER_SLOTS],
}

impl Default for DiceJitter {
    fn default() -> Self {
        Self {
            angles: [0.0; JITTER_SLOTS],
        }
    }
}

impl DiceJitter {
    /// Builds jitter from unit samples in `[0, 1)`, mapped to
    /// `[-15°, 15°)`.
    pub fn from_unit_samples(samples: [f64; JITTER_SLOTS]) -> Self {
        Self {
            angles: samples.map(|s| s.clamp(0.0, 1.0) * JITTER_DEGREES * 2.0 - JITTER_DEGREES),
        }
    }

    pub fn angle(&self, index: usize) -> f64 {
        self.angles.get(index).copied().unwrap_or(0.0)
    }

    pub fn angles(&self) -> &[f64; JITTER_SLOTS] {
        &self.angles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gestures_pick_opposite_ends() {
        let dice = TurnDice::rolled(&[3, 5]);
        assert_eq!(dice.steps_for(PointerButton::Primary), Some(3));
        assert_eq!(dice.steps_for(PointerButton::Secondary), Some(5));
    }

    #[test]
    fn no_moves_left_yields_nothing() {
        let dice = TurnDice::rolled(&[6, 6]).with_moves_left(&[]);
        assert!(dice.was_rolled());
        assert!(!dice.has_more_moves());
        assert_eq!(dice.steps_for(PointerButton::Primary), None);
    }

    #[test]
    fn rotate_swaps_play_order() {
        let mut dice = TurnDice::rolled(&[2, 4]);
        assert!(dice.rotate_left());
        assert_eq!(dice.values.as_slice(), &[4, 2]);
        assert_eq!(dice.moves_left.as_slice(), &[4, 2]);

        let mut spent = TurnDice::rolled(&[2, 4]).with_moves_left(&[]);
        assert!(!spent.rotate_left());
        assert_eq!(spent.values.as_slice(), &[2, 4]);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let jitter = DiceJitter::from_unit_samples([0.0, 0.5, 0.999, 0.25, 0.75, 0.1, 0.2, 0.3, 0.4, 0.6]);
        assert_eq!(jitter.angle(0), -15.0);
        assert_eq!(jitter.angle(1), 0.0);
        assert!(jitter.angles().iter().all(|a| (-15.0..15.0).contains(a)));
        assert_eq!(jitter.angle(42), 0.0);
    }
}
