//! Animation timing and easing for action playback.
//!
//! Each action kind maps to a fixed [`AnimationPlan`]: one or more phases with
//! a duration, an easing curve and the visual properties they drive. The
//! playback engine awaits the phases; renderers sample them with
//! [`AnimationPlan::sample`] to draw in-flight pieces.
use std::time::Duration;

use crate::action::ActionKind;

/// Fixed spacing between the starts of consecutive actions of one list.
pub const ACTION_GAP: Duration = Duration::from_millis(450);
/// Glide used by MOVE and RECOVER.
pub const GLIDE: Duration = Duration::from_millis(400);
/// Impact pulse before a hit piece flies to the bar.
pub const HIT_PULSE: Duration = Duration::from_millis(150);
/// Bounce glide of a hit piece.
pub const HIT_GLIDE: Duration = Duration::from_millis(300);
/// Fade and rise of a borne-off piece.
pub const BEAR_FADE: Duration = Duration::from_millis(500);

/// Scale reached at the top of the hit pulse.
pub const HIT_PULSE_SCALE: f64 = 1.2;
/// Scale a borne-off piece shrinks to.
pub const BEAR_SCALE: f64 = 0.5;
/// Distance a borne-off piece rises, in board units.
pub const BEAR_RISE: f64 = 50.0;

/// CSS-style cubic Bézier timing curve through (0,0) and (1,1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const STANDARD: Self = Self::new(0.4, 0.0, 0.2, 1.0);
    pub const BOUNCE: Self = Self::new(0.68, -0.55, 0.265, 1.55);
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn curve(p1: f64, p2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn slope(p1: f64, p2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Eased progress for linear time `x` in `[0, 1]`.
    ///
    /// Solves the curve's x(t) = x with Newton steps, falling back to
    /// bisection where the slope is too flat.
    pub fn ease(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }

        let mut t = x;
        for _ in 0..8 {
            let error = Self::curve(self.x1, self.x2, t) - x;
            if error.abs() < 1e-7 {
                return Self::curve(self.y1, self.y2, t);
            }
            let slope = Self::slope(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= error / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..32 {
            let value = Self::curve(self.x1, self.x2, t);
            if (value - x).abs() < 1e-7 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::curve(self.y1, self.y2, t)
    }
}

/// What a phase animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseEffect {
    /// Travel from source to destination.
    Glide,
    /// Scale up in place.
    Pulse,
    /// Fade out while shrinking and rising.
    FadeRise,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationPhase {
    pub effect: PhaseEffect,
    pub duration: Duration,
    pub easing: CubicBezier,
}

/// Visual state of an in-flight piece at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightFrame {
    /// Travel progress from source (0) to destination (1). May overshoot
    /// with bounce easing.
    pub travel: f64,
    pub scale: f64,
    pub opacity: f64,
    pub rise: f64,
}

impl FlightFrame {
    pub const AT_REST: Self = Self {
        travel: 0.0,
        scale: 1.0,
        opacity: 1.0,
        rise: 0.0,
    };
}

/// Ordered phases played for one action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationPlan {
    phases: &'static [AnimationPhase],
}

const MOVE_PHASES: &[AnimationPhase] = &[AnimationPhase {
    effect: PhaseEffect::Glide,
    duration: GLIDE,
    easing: CubicBezier::STANDARD,
}];

const HIT_PHASES: &[AnimationPhase] = &[
    AnimationPhase {
        effect: PhaseEffect::Pulse,
        duration: HIT_PULSE,
        easing: CubicBezier::BOUNCE,
    },
    AnimationPhase {
        effect: PhaseEffect::Glide,
        duration: HIT_GLIDE,
        easing: CubicBezier::BOUNCE,
    },
];

const BEAR_PHASES: &[AnimationPhase] = &[AnimationPhase {
    effect: PhaseEffect::FadeRise,
    duration: BEAR_FADE,
    easing: CubicBezier::EASE_OUT,
}];

impl AnimationPlan {
    pub const fn for_kind(kind: ActionKind) -> Self {
        let phases = match kind {
            ActionKind::Move | ActionKind::Recover => MOVE_PHASES,
            ActionKind::Hit => HIT_PHASES,
            ActionKind::Bear => BEAR_PHASES,
        };
        Self { phases }
    }

    pub fn phases(&self) -> &'static [AnimationPhase] {
        self.phases
    }

    pub fn total(&self) -> Duration {
        self.phases.iter().map(|phase| phase.duration).sum()
    }

    /// Visual state `elapsed` after the animation started.
    pub fn sample(&self, elapsed: Duration) -> FlightFrame {
        let mut frame = FlightFrame::AT_REST;
        let mut remaining = elapsed;

        for phase in self.phases {
            let progress = if remaining >= phase.duration {
                1.0
            } else {
                remaining.as_secs_f64() / phase.duration.as_secs_f64()
            };
            let eased = phase.easing.ease(progress);

            match phase.effect {
                PhaseEffect::Pulse => {
                    frame.scale = 1.0 + (HIT_PULSE_SCALE - 1.0) * eased;
                }
                PhaseEffect::Glide => {
                    frame.travel = eased;
                    // A glide that follows a pulse eases back to normal size.
                    if frame.scale != 1.0 {
                        frame.scale = HIT_PULSE_SCALE + (1.0 - HIT_PULSE_SCALE) * eased;
                    }
                }
                PhaseEffect::FadeRise => {
                    frame.opacity = 1.0 - eased;
                    frame.scale = 1.0 + (BEAR_SCALE - 1.0) * eased;
                    frame.rise = BEAR_RISE * eased;
                }
            }

            if remaining < phase.duration {
                break;
            }
            remaining -= phase.duration;
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_use_fixed_durations() {
        assert_eq!(AnimationPlan::for_kind(ActionKind::Move).total(), GLIDE);
        assert_eq!(AnimationPlan::for_kind(ActionKind::Recover).total(), GLIDE);
        assert_eq!(
            AnimationPlan::for_kind(ActionKind::Hit).total(),
            Duration::from_millis(450)
        );
        assert_eq!(AnimationPlan::for_kind(ActionKind::Bear).total(), BEAR_FADE);
    }

    #[test]
    fn easing_hits_endpoints_and_is_monotonic_for_standard() {
        let curve = CubicBezier::STANDARD;
        assert_eq!(curve.ease(0.0), 0.0);
        assert_eq!(curve.ease(1.0), 1.0);
        let mut last = 0.0;
        for step in 1..=20 {
            let value = curve.ease(step as f64 / 20.0);
            assert!(value >= last - 1e-9);
            last = value;
        }
    }

    #[test]
    fn bounce_overshoots() {
        let curve = CubicBezier::BOUNCE;
        let samples: Vec<_> = (1..20).map(|s| curve.ease(s as f64 / 20.0)).collect();
        assert!(samples.iter().any(|v| *v < 0.0));
        assert!(samples.iter().any(|v| *v > 1.0));
    }

    #[test]
    fn hit_pulses_then_travels() {
        let plan = AnimationPlan::for_kind(ActionKind::Hit);
        let pulsed = plan.sample(HIT_PULSE);
        assert!((pulsed.scale - HIT_PULSE_SCALE).abs() < 1e-6);
        assert_eq!(pulsed.travel, 0.0);

        let done = plan.sample(plan.total());
        assert!((done.travel - 1.0).abs() < 1e-6);
        assert!((done.scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bear_fades_out_completely() {
        let plan = AnimationPlan::for_kind(ActionKind::Bear);
        let start = plan.sample(Duration::ZERO);
        assert_eq!(start, FlightFrame::AT_REST);
        let end = plan.sample(BEAR_FADE + Duration::from_millis(5));
        assert!(end.opacity.abs() < 1e-6);
        assert!((end.scale - BEAR_SCALE).abs() < 1e-6);
        assert!((end.rise - BEAR_RISE).abs() < 1e-6);
    }
}
