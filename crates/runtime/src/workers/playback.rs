//! Sequential playback of one move's action list.
//!
//! Each action is validated, animated phase by phase and then landed. The next
//! action starts [`ACTION_GAP`] after the previous one started, or when it
//! ended if its animation ran longer, so two pieces never fly at once.
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use board_core::{ACTION_GAP, Action, AnimationPlan, BoardView};

use crate::api::{PlaybackReport, Result};
use crate::events::{BoardEvent, Event, EventBus};

/// Drives action lists against the view.
pub(crate) struct PlaybackEngine {
    /// Latest requested generation, present under the snap policy.
    generation: Option<watch::Receiver<u64>>,
}

impl PlaybackEngine {
    pub(crate) fn new(generation: Option<watch::Receiver<u64>>) -> Self {
        Self { generation }
    }

    /// A newer list has been requested since `generation`.
    fn superseded(&self, generation: u64) -> bool {
        self.generation
            .as_ref()
            .is_some_and(|rx| *rx.borrow() > generation)
    }

    /// Sleeps until `deadline`. Returns `false` when a newer list preempted
    /// the wait.
    async fn wait_until(&mut self, deadline: Instant, generation: u64) -> bool {
        if self.superseded(generation) {
            return false;
        }
        let Some(rx) = self.generation.as_mut() else {
            sleep_until(deadline).await;
            return true;
        };

        let sleep = sleep_until(deadline);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                () = &mut sleep => return true,
                changed = rx.changed() => match changed {
                    Ok(()) => {
                        if *rx.borrow_and_update() > generation {
                            return false;
                        }
                    }
                    Err(_) => {
                        // Every handle is gone; nothing can preempt anymore.
                        (&mut sleep).await;
                        return true;
                    }
                },
            }
        }
    }

    /// Plays `actions` in order.
    ///
    /// An invalid action stops the list. Actions before it stay applied.
    pub(crate) async fn play(
        &mut self,
        view: &mut BoardView,
        event_bus: &EventBus,
        actions: &[Action],
        generation: u64,
    ) -> Result<PlaybackReport> {
        let mut report = PlaybackReport {
            applied: 0,
            fast_forwarded: self.superseded(generation),
        };

        for (index, action) in actions.iter().enumerate() {
            let flight = match view.prepare(index, action) {
                Ok(flight) => flight,
                Err(error) => {
                    warn!(%error, applied = report.applied, "action list stopped");
                    event_bus.publish(Event::Board(BoardEvent::PlaybackFailed { error }));
                    return Err(error.into());
                }
            };

            let started = Instant::now();
            let mut animated = false;
            if !report.fast_forwarded {
                view.begin(flight);
                event_bus.publish(Event::Board(BoardEvent::FlightStarted { flight }));

                let mut phase_end = started;
                animated = true;
                for phase in AnimationPlan::for_kind(flight.kind).phases() {
                    phase_end += phase.duration;
                    if !self.wait_until(phase_end, generation).await {
                        debug!(index, "playback preempted mid-flight, snapping");
                        report.fast_forwarded = true;
                        animated = false;
                        break;
                    }
                }
            }

            let landing = view.land(flight)?;
            report.applied += 1;
            event_bus.publish(Event::Board(BoardEvent::FlightLanded {
                flight,
                landing,
                animated,
            }));

            let has_next = index + 1 < actions.len();
            if has_next && !report.fast_forwarded {
                let next_start = (started + ACTION_GAP).max(Instant::now());
                if !self.wait_until(next_start, generation).await {
                    debug!(index, "playback preempted between actions");
                    report.fast_forwarded = true;
                }
            }
        }

        event_bus.publish(Event::Board(BoardEvent::PlaybackFinished {
            applied: report.applied,
            fast_forwarded: report.fast_forwarded,
        }));
        Ok(report)
    }
}
